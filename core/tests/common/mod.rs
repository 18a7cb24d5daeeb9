// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use burgerbox::error::StoreError;
use burgerbox::{FlowError, FlowState, KeyValueStore, PriceTable, Product, StepControl};
use burgerbox::catalog::Category;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::Level;

// --- Catalog fixtures ---

pub fn product(id: &str, prices: &[(&str, u64)]) -> Product {
  Product {
    id: id.to_string(),
    name: format!("Burger {}", id),
    description: "Test burger".to_string(),
    category: Category::Veg,
    variants: prices.iter().map(|(v, _)| v.to_string()).collect(),
    prices: prices.iter().map(|(v, p)| (*v, *p)).collect::<PriceTable>(),
    image: format!("https://img.test/{}.png", id),
  }
}

/// A burger sold in small (100) and large (250).
pub fn classic() -> Product {
  product("b1", &[("small", 100), ("large", 250)])
}

pub fn paneer() -> Product {
  product("b2", &[("medium", 180)])
}

// --- Stores ---

/// Reads work, writes fail. Simulates a full or read-only disk.
#[derive(Debug, Default)]
pub struct FailingStore {
  entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for FailingStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn put(&self, key: &str, _value: &str) -> Result<(), StoreError> {
    Err(StoreError::Io {
      key: key.to_string(),
      source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    })
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.entries.lock().remove(key);
    Ok(())
  }
}

// --- Flow fixtures ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub halt_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  // FlowError is not PartialEq, keep its Debug text.
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(e: FlowError) -> Self {
    TestError::Flow(format!("{:?}", e))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> impl Fn(FlowState<TestContext>) -> std::future::Ready<Result<StepControl, TestError>> + Send + Sync + 'static {
  move |state: FlowState<TestContext>| {
    let mut guard = state.write();
    guard.counter += 1;
    guard.message.push_str(message_to_append);
    guard.steps_executed.push(step_name.to_string());
    tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
    let control = match &guard.halt_at {
      Some(halt_at) if halt_at == step_name => StepControl::Halt,
      _ => StepControl::Continue,
    };
    std::future::ready(Ok(control))
  }
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> impl Fn(FlowState<TestContext>) -> std::future::Ready<Result<StepControl, TestError>> + Send + Sync + 'static {
  move |state: FlowState<TestContext>| {
    state.write().steps_executed.push(step_name.to_string());
    tracing::warn!(target: "test_handlers", step = step_name, "failing with: '{}'", error_message);
    std::future::ready(Err(TestError::Handler(error_message.to_string())))
  }
}

// --- Tracing setup, once per test binary ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
