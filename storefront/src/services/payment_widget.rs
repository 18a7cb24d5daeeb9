// burgerbox_storefront/src/services/payment_widget.rs

//! The hosted checkout widget, seen from the client.
//!
//! The real widget is a third-party UI that collects payment for a gateway
//! order and hands back a signed confirmation, or reports that the shopper
//! closed it. [`PromptWidget`] plays that role in a terminal.

use crate::errors::{AppError, Result};
use crate::models::{PaymentConfirmation, WidgetRequest};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
  Paid(PaymentConfirmation),
  /// The shopper closed the widget without paying.
  Dismissed,
}

#[async_trait]
pub trait CheckoutWidget: Send + Sync {
  async fn open(&self, request: &WidgetRequest) -> Result<WidgetOutcome>;
}

/// Reads the payment id and signature from a line-based reader.
///
/// A blank answer to either prompt, or end of input, counts as dismissal.
pub struct PromptWidget {
  input: Mutex<Box<dyn AsyncBufRead + Send + Unpin>>,
}

impl PromptWidget {
  pub fn stdin() -> Self {
    Self::from_reader(BufReader::new(tokio::io::stdin()))
  }

  pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
    Self {
      input: Mutex::new(Box::new(reader)),
    }
  }

  async fn ask<R: AsyncBufRead + Unpin + ?Sized>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    println!("{}", prompt);
    let mut line = String::new();
    let read = input
      .read_line(&mut line)
      .await
      .map_err(|e| AppError::Internal(format!("could not read payment input: {}", e)))?;
    let answer = line.trim();
    if read == 0 || answer.is_empty() {
      return Ok(None);
    }
    Ok(Some(answer.to_string()))
  }
}

#[async_trait]
impl CheckoutWidget for PromptWidget {
  #[instrument(name = "PromptWidget::open", skip_all, fields(order = %request.order_id, amount = request.amount))]
  async fn open(&self, request: &WidgetRequest) -> Result<WidgetOutcome> {
    println!(
      "Pay {} {} for order {} (key {}), as {} <{}>, {}",
      request.amount,
      request.currency,
      request.order_id,
      request.key_id,
      request.prefill.name,
      request.prefill.email,
      request.prefill.contact
    );
    let mut input = self.input.lock().await;
    let Some(payment_id) = Self::ask(&mut *input, "Payment id (blank to cancel):").await? else {
      info!("Checkout widget dismissed.");
      return Ok(WidgetOutcome::Dismissed);
    };
    let Some(signature) = Self::ask(&mut *input, "Payment signature (blank to cancel):").await? else {
      info!("Checkout widget dismissed.");
      return Ok(WidgetOutcome::Dismissed);
    };
    Ok(WidgetOutcome::Paid(PaymentConfirmation {
      razorpay_order_id: request.order_id.clone(),
      razorpay_payment_id: payment_id,
      razorpay_signature: signature,
    }))
  }
}
