// burgerbox_storefront/src/workflows/admin.rs

//! Back-office actions. Every call requires a signed-in admin.

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderStatus, UserRecord};
use crate::state::AppState;
use burgerbox::{Notice, Product, ProductDraft};
use tracing::{info, instrument};

#[instrument(name = "admin::users", skip_all)]
pub async fn users(app_state: &AppState) -> Result<Vec<UserRecord>> {
  let result = async {
    let admin = app_state.require_admin()?;
    app_state.api.list_users(&admin.token).await
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "admin::delete_user", skip(app_state))]
pub async fn delete_user(app_state: &AppState, user_id: &str) -> Result<()> {
  let result = async {
    let admin = app_state.require_admin()?;
    app_state.api.delete_user(&admin.token, user_id).await?;
    info!("User deleted.");
    app_state
      .notices
      .push(Notice::success("User and associated orders deleted successfully"));
    Ok::<_, AppError>(())
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "admin::orders", skip_all)]
pub async fn orders(app_state: &AppState) -> Result<Vec<Order>> {
  let result = async {
    let admin = app_state.require_admin()?;
    app_state.api.all_orders(&admin.token).await
  }
  .await;
  app_state.report(result)
}

/// Moves `order` to `status`. Failed orders stay failed.
#[instrument(name = "admin::update_order_status", skip(app_state, order), fields(order = %order.id, from = %order.order_status))]
pub async fn update_order_status(app_state: &AppState, order: &Order, status: OrderStatus) -> Result<Order> {
  let result = async {
    let admin = app_state.require_admin()?;
    if !order.order_status.can_change() {
      return Err(AppError::Validation("Failed orders cannot be updated.".to_string()));
    }
    let updated = app_state.api.update_order_status(&admin.token, &order.id, status).await?;
    app_state.notices.push(Notice::success("Order status updated successfully!"));
    Ok(updated)
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "admin::add_burger", skip_all, fields(name = %draft.name))]
pub async fn add_burger(app_state: &AppState, draft: &ProductDraft) -> Result<Product> {
  let result = async {
    let admin = app_state.require_admin()?;
    let payload = draft.to_payload()?;
    let product = app_state.api.create_burger(&admin.token, &payload).await?;
    app_state.notices.push(Notice::success("Burger added successfully!"));
    Ok::<_, AppError>(product)
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "admin::update_burger", skip(app_state, draft))]
pub async fn update_burger(app_state: &AppState, id: &str, draft: &ProductDraft) -> Result<Product> {
  let result = async {
    let admin = app_state.require_admin()?;
    let payload = draft.to_payload()?;
    let product = app_state.api.update_burger(&admin.token, id, &payload).await?;
    app_state.notices.push(Notice::success("Burger updated successfully!"));
    Ok::<_, AppError>(product)
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "admin::delete_burger", skip(app_state))]
pub async fn delete_burger(app_state: &AppState, id: &str) -> Result<()> {
  let result = async {
    let admin = app_state.require_admin()?;
    app_state.api.delete_burger(&admin.token, id).await?;
    app_state.notices.push(Notice::success("Burger deleted successfully!"));
    Ok::<_, AppError>(())
  }
  .await;
  app_state.report(result)
}
