// burgerbox_storefront/src/models/payment.rs

//! Wire types of the payment endpoints and the checkout widget.

use burgerbox::CartLine;
use serde::{Deserialize, Serialize};

/// `POST /payment/order`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderRequest {
  pub amount: u64,
  pub name: String,
  pub email: String,
  pub order_items: Vec<CartLine>,
  pub phone: String,
  pub shipping_address: String,
  pub user_id: String,
}

/// The gateway order created for a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
  pub id: String,
  /// In the currency's minor unit, as the gateway reports it.
  pub amount: u64,
  pub currency: String,
}

/// `POST /payment/order` response. A body without `data` means no order was created.
#[derive(Debug, Deserialize)]
pub struct PaymentOrderEnvelope {
  #[serde(default)]
  pub data: Option<PaymentOrder>,
}

/// What the checkout widget hands back once the shopper paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
  pub razorpay_order_id: String,
  pub razorpay_payment_id: String,
  pub razorpay_signature: String,
}

/// `POST /payment/verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentRequest {
  #[serde(flatten)]
  pub confirmation: PaymentConfirmation,
  #[serde(rename = "userId")]
  pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub order_id: Option<String>,
}

/// Prefill shown by the checkout widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPrefill {
  pub name: String,
  pub email: String,
  pub contact: String,
}

/// Everything the checkout widget needs to collect a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRequest {
  pub key_id: String,
  pub amount: u64,
  pub currency: String,
  pub order_id: String,
  pub prefill: WidgetPrefill,
}
