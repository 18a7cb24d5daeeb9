// burgerbox/src/store/memory.rs
use super::KeyValueStore;
use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a store with one entry, e.g. a cart persisted by a previous session.
  pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
    let store = Self::new();
    store.entries.lock().insert(key.to_string(), value.into());
    store
  }

  pub fn contains(&self, key: &str) -> bool {
    self.entries.lock().contains_key(key)
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.entries.lock().remove(key);
    Ok(())
  }
}
