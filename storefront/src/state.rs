// burgerbox_storefront/src/state.rs
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{CheckoutStatus, UserSession};
use crate::notices::NoticeBoard;
use crate::services::{CheckoutWidget, StorefrontApi};
use crate::session::SessionStore;
use crate::workflows::Workflows;
use burgerbox::{Cart, CartEvent, CartResult, FlowState, KeyValueStore, LineKey, Product};
use std::sync::Arc;

/// Everything a workflow or front-end action needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub api: Arc<dyn StorefrontApi>,
  pub widget: Arc<dyn CheckoutWidget>,
  pub cart: FlowState<Cart>,
  pub session: FlowState<Option<UserSession>>,
  pub session_store: SessionStore,
  pub checkout: FlowState<CheckoutStatus>,
  pub notices: NoticeBoard,
  pub flows: Arc<Workflows>,
}

impl AppState {
  /// Restores the cart and session from `store` and builds the workflows.
  pub fn new(
    config: Arc<AppConfig>,
    api: Arc<dyn StorefrontApi>,
    widget: Arc<dyn CheckoutWidget>,
    store: Arc<dyn KeyValueStore>,
  ) -> Self {
    let session_store = SessionStore::new(store.clone());
    let session = session_store.load();
    Self {
      config,
      api,
      widget,
      cart: FlowState::new(Cart::load(store)),
      session: FlowState::new(session),
      session_store,
      checkout: FlowState::new(CheckoutStatus::default()),
      notices: NoticeBoard::new(),
      flows: Arc::new(crate::workflows::build_all()),
    }
  }

  /// Queues the error's notice before handing the result back.
  pub fn report<T>(&self, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
      tracing::warn!(error = %e, "Action failed.");
      self.notices.push(e.notice());
    }
    result
  }

  fn report_cart(&self, result: CartResult<CartEvent>) -> Result<CartEvent> {
    let result = result.map_err(AppError::from);
    if let Ok(event) = &result {
      if let Some(notice) = event.notice() {
        self.notices.push(notice);
      }
    }
    self.report(result)
  }

  // --- Cart actions, as the product cards and the cart page trigger them ---

  pub fn add_to_cart(&self, product: &Product, quantity: i64, variant: &str) -> Result<CartEvent> {
    let result = self.cart.update(|cart| cart.add_to_cart(product, quantity, variant));
    self.report_cart(result)
  }

  pub fn adjust_line(&self, key: &LineKey, delta: i64) -> Result<CartEvent> {
    let result = self.cart.update(|cart| cart.adjust_line(key, delta));
    self.report_cart(result)
  }

  pub fn remove_from_cart(&self, key: &LineKey) -> Result<CartEvent> {
    let result = self.cart.update(|cart| cart.remove_from_cart(key));
    self.report_cart(result)
  }

  pub fn clear_cart(&self) -> Result<CartEvent> {
    let result = self.cart.update(|cart| cart.clear());
    self.report_cart(result)
  }

  // --- Session ---

  pub fn current_user(&self) -> Option<UserSession> {
    self.session.read().clone()
  }

  pub fn require_session(&self) -> Result<UserSession> {
    self
      .current_user()
      .ok_or_else(|| AppError::Auth("Please login to continue.".to_string()))
  }

  pub fn require_admin(&self) -> Result<UserSession> {
    let user = self.require_session()?;
    if !user.is_admin {
      return Err(AppError::Auth("Admin access required.".to_string()));
    }
    Ok(user)
  }

  pub fn checkout_status(&self) -> CheckoutStatus {
    self.checkout.read().clone()
  }
}
