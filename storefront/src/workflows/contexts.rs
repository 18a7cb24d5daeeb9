// burgerbox_storefront/src/workflows/contexts.rs

//! Data the workflow handlers share. Handlers receive these wrapped in
//! `burgerbox::FlowState`.

use crate::forms::{LoginForm, RegisterForm};
use crate::models::{ContactDetails, OrderSummary, PaymentConfirmation, PaymentOrder, UserSession};
use crate::state::AppState;
use burgerbox::CartLine;
use uuid::Uuid;

pub struct CheckoutCtxData {
  pub app_state: AppState,
  /// Correlates the log lines of one checkout attempt.
  pub attempt_id: Uuid,
  pub contact: ContactDetails,
  pub token: String,

  // Filled in as the steps run
  pub items: Vec<CartLine>,
  pub subtotal: u64,
  pub amount: u64,
  pub payment_order: Option<PaymentOrder>,
  pub confirmation: Option<PaymentConfirmation>,
  pub order_id: Option<String>,
  pub summary: Option<OrderSummary>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, attempt_id: Uuid, contact: ContactDetails, token: String) -> Self {
    Self {
      app_state,
      attempt_id,
      contact,
      token,
      items: Vec::new(),
      subtotal: 0,
      amount: 0,
      payment_order: None,
      confirmation: None,
      order_id: None,
      summary: None,
    }
  }
}

pub struct RegisterCtxData {
  pub app_state: AppState,
  pub form: RegisterForm,
  pub session: Option<UserSession>,
}

pub struct LoginCtxData {
  pub app_state: AppState,
  pub form: LoginForm,
  pub session: Option<UserSession>,
}
