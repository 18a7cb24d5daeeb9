// burgerbox_storefront/src/workflows/checkout_flow.rs
use crate::errors::{AppError, Result};
use crate::forms::validate_contact;
use crate::models::payment::VerifyPaymentRequest;
use crate::models::{ContactDetails, OrderSummary, PaymentOrderRequest, WidgetPrefill, WidgetRequest};
use crate::services::WidgetOutcome;
use crate::state::AppState;
use crate::workflows::contexts::CheckoutCtxData;
use burgerbox::{Flow, FlowOutcome, FlowState, Notice, StepControl};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const CHECKOUT_STEPS: [&str; 7] = [
  "validate_contact_details",
  "price_cart",
  "create_payment_order",
  "collect_payment",
  "verify_payment",
  "record_order_summary",
  "clear_cart",
];

/// How a checkout attempt that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
  Paid(OrderSummary),
  /// The shopper closed the checkout widget. The cart is untouched.
  Cancelled,
}

pub fn build_checkout_flow() -> Flow<CheckoutCtxData, AppError> {
  let mut p = Flow::<CheckoutCtxData, AppError>::with_steps("checkout", &CHECKOUT_STEPS);

  // Step 1: Delivery form
  p.on("validate_contact_details", |ctx: FlowState<CheckoutCtxData>| async move {
    let errors = validate_contact(&ctx.read().contact);
    errors.into_result()?;
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 2: Snapshot the cart and work out what to charge
  p.on("price_cart", |ctx: FlowState<CheckoutCtxData>| async move {
    let (cart, delivery_fee) = {
      let guard = ctx.read();
      (guard.app_state.cart.clone(), guard.app_state.config.delivery_fee)
    };
    let (items, subtotal) = {
      let cart = cart.read();
      (cart.snapshot(), cart.total_price())
    };
    if items.is_empty() {
      return Err(AppError::Validation("Your cart is empty!".to_string()));
    }
    let amount = subtotal + delivery_fee;
    info!(lines = items.len(), subtotal, delivery_fee, amount, "Cart priced for checkout.");
    {
      let mut guard = ctx.write();
      guard.items = items;
      guard.subtotal = subtotal;
      guard.amount = amount;
    }
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 3: Ask the API for a gateway order
  p.on("create_payment_order", |ctx: FlowState<CheckoutCtxData>| async move {
    let (api, token, request) = {
      let guard = ctx.read();
      let request = PaymentOrderRequest {
        amount: guard.amount,
        name: guard.contact.name.clone(),
        email: guard.contact.email.clone(),
        order_items: guard.items.clone(),
        phone: guard.contact.phone.clone(),
        shipping_address: guard.contact.address.clone(),
        user_id: guard.contact.user_id.clone(),
      };
      (guard.app_state.api.clone(), guard.token.clone(), request)
    };
    let order = api
      .create_payment_order(&token, &request)
      .await?
      .ok_or_else(|| AppError::Payment("Error creating order!".to_string()))?;
    info!(gateway_order = %order.id, amount = order.amount, "Payment order created.");
    ctx.write().payment_order = Some(order);
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 4: Hand over to the checkout widget
  p.on("collect_payment", |ctx: FlowState<CheckoutCtxData>| async move {
    let (widget, notices, request) = {
      let guard = ctx.read();
      let order = guard
        .payment_order
        .clone()
        .ok_or_else(|| AppError::Internal("payment order missing before collection".to_string()))?;
      let request = WidgetRequest {
        key_id: guard.app_state.config.payment_key_id.clone(),
        amount: order.amount,
        currency: order.currency,
        order_id: order.id,
        prefill: WidgetPrefill {
          name: guard.contact.name.clone(),
          email: guard.contact.email.clone(),
          contact: guard.contact.phone.clone(),
        },
      };
      (guard.app_state.widget.clone(), guard.app_state.notices.clone(), request)
    };
    match widget.open(&request).await? {
      WidgetOutcome::Paid(confirmation) => {
        ctx.write().confirmation = Some(confirmation);
        Ok::<_, AppError>(StepControl::Continue)
      }
      WidgetOutcome::Dismissed => {
        notices.push(Notice::info("Payment cancelled"));
        Ok(StepControl::Halt)
      }
    }
  });

  // Step 5: Server-side signature check
  p.on("verify_payment", |ctx: FlowState<CheckoutCtxData>| async move {
    let (api, token, request, gateway_order) = {
      let guard = ctx.read();
      let confirmation = guard
        .confirmation
        .clone()
        .ok_or_else(|| AppError::Internal("payment confirmation missing before verification".to_string()))?;
      let gateway_order = confirmation.razorpay_order_id.clone();
      let request = VerifyPaymentRequest {
        confirmation,
        user_id: guard.contact.user_id.clone(),
      };
      (guard.app_state.api.clone(), guard.token.clone(), request, gateway_order)
    };
    let response = api.verify_payment(&token, &request).await?;
    if !response.success {
      warn!(gateway_order = %gateway_order, "Payment verification rejected.");
      return Err(AppError::Payment("Payment verification failed.".to_string()));
    }
    let order_id = response.order_id.unwrap_or(gateway_order);
    info!(order_id = %order_id, "Payment verified.");
    ctx.write().order_id = Some(order_id);
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 6: Keep what the summary page shows
  p.on("record_order_summary", |ctx: FlowState<CheckoutCtxData>| async move {
    let (summary, app_state) = {
      let guard = ctx.read();
      let summary = OrderSummary {
        order_id: guard.order_id.clone().unwrap_or_default(),
        name: guard.contact.name.clone(),
        email: guard.contact.email.clone(),
        address: guard.contact.address.clone(),
        phone: guard.contact.phone.clone(),
        order_items: guard.items.clone(),
        subtotal: guard.subtotal,
        delivery_fee: guard.amount.saturating_sub(guard.subtotal),
        amount: guard.amount,
        placed_at: Utc::now(),
      };
      (summary, guard.app_state.clone())
    };
    app_state.checkout.write().order_details = Some(summary.clone());
    app_state.notices.push(Notice::success("Payment successful!"));
    ctx.write().summary = Some(summary);
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 7: Only reached after a verified payment
  p.on("clear_cart", |ctx: FlowState<CheckoutCtxData>| async move {
    let cart = ctx.read().app_state.cart.clone();
    // Payment is verified at this point; storage failures are only logged.
    if let Err(e) = cart.update(|cart| cart.clear()) {
      warn!(error = %e, "Could not delete the persisted cart after payment.");
    }
    Ok::<_, AppError>(StepControl::Continue)
  });

  p
}

/// Runs one checkout attempt for the signed-in user.
///
/// The checkout status shows `is_processing` for the whole attempt and is always
/// reset afterwards. Failures are recorded on the status and queued as notices.
pub async fn place_order(app_state: &AppState, contact: ContactDetails) -> Result<CheckoutOutcome> {
  let attempt_id = Uuid::new_v4();
  app_state.checkout.update(|status| {
    status.is_processing = true;
    status.error = None;
    status.order_details = None;
  });

  let result = run_checkout(app_state, contact, attempt_id).await;

  app_state.checkout.update(|status| {
    status.is_processing = false;
    if let Err(e) = &result {
      status.error = Some(e.notice().message);
    }
  });
  app_state.report(result)
}

#[instrument(name = "checkout::run", skip_all, fields(attempt_id = %attempt_id), err(Display))]
async fn run_checkout(app_state: &AppState, mut contact: ContactDetails, attempt_id: Uuid) -> Result<CheckoutOutcome> {
  let user = app_state.require_session()?;
  contact.user_id = user.id.clone();

  let ctx = FlowState::new(CheckoutCtxData::new(app_state.clone(), attempt_id, contact, user.token));
  match app_state.flows.checkout.run(ctx.clone()).await? {
    FlowOutcome::Completed => {
      let summary = ctx
        .read()
        .summary
        .clone()
        .ok_or_else(|| AppError::Internal("checkout completed without an order summary".to_string()))?;
      Ok(CheckoutOutcome::Paid(summary))
    }
    FlowOutcome::Halted { step } => {
      info!(step = %step, "Checkout stopped before payment.");
      Ok(CheckoutOutcome::Cancelled)
    }
  }
}
