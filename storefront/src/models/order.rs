// burgerbox_storefront/src/models/order.rs

use burgerbox::CartLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fulfilment state of a placed order, as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
  Placed,
  Processing,
  #[serde(rename = "Out for Delivery")]
  OutForDelivery,
  Delivered,
  Failed,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Placed,
    OrderStatus::Processing,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Failed,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Placed => "Placed",
      OrderStatus::Processing => "Processing",
      OrderStatus::OutForDelivery => "Out for Delivery",
      OrderStatus::Delivered => "Delivered",
      OrderStatus::Failed => "Failed",
    }
  }

  /// Failed orders are frozen; admins cannot move them to another status.
  pub fn can_change(&self) -> bool {
    !matches!(self, OrderStatus::Failed)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str().to_ascii_lowercase() == wanted)
      .ok_or_else(|| format!("unknown order status '{}'", s))
  }
}

/// A stored order as returned by the payment endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  #[serde(rename = "_id", default)]
  pub id: String,
  #[serde(rename = "razorpay_order_id", default)]
  pub gateway_order_id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub shipping_address: String,
  #[serde(default)]
  pub order_items: Vec<CartLine>,
  pub amount: u64,
  pub order_status: OrderStatus,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
  pub fn item_count(&self) -> u64 {
    self.order_items.iter().map(|l| u64::from(l.quantity())).sum()
  }
}

/// `GET /payment/user/{userId}`
#[derive(Debug, Deserialize)]
pub struct UserOrdersResponse {
  #[serde(default)]
  pub orders: Vec<Order>,
}

/// `GET /payment/orders/{id}` wraps the single order in a list.
#[derive(Debug, Deserialize)]
pub struct OrderDetailResponse {
  #[serde(default)]
  pub order: Vec<Order>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
  pub order_status: OrderStatus,
}
