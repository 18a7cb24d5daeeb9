// burgerbox_storefront/src/models/checkout.rs

use super::user::UserSession;
use burgerbox::CartLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The delivery form on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
  pub user_id: String,
  pub name: String,
  pub email: String,
  pub address: String,
  pub phone: String,
}

impl ContactDetails {
  /// Prefills name and email from the signed-in user.
  pub fn for_user(user: &UserSession) -> Self {
    Self {
      user_id: user.id.clone(),
      name: user.name.clone(),
      email: user.email.clone(),
      ..Default::default()
    }
  }
}

/// What the order summary page shows after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
  pub order_id: String,
  pub name: String,
  pub email: String,
  pub address: String,
  pub phone: String,
  pub order_items: Vec<CartLine>,
  pub subtotal: u64,
  pub delivery_fee: u64,
  pub amount: u64,
  pub placed_at: DateTime<Utc>,
}

/// Checkout progress visible to the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutStatus {
  pub is_processing: bool,
  pub error: Option<String>,
  pub order_details: Option<OrderSummary>,
}
