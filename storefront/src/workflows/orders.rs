// burgerbox_storefront/src/workflows/orders.rs
use crate::errors::Result;
use crate::models::Order;
use crate::state::AppState;
use tracing::instrument;

/// The signed-in user's order history.
#[instrument(name = "orders::history", skip_all)]
pub async fn history(app_state: &AppState) -> Result<Vec<Order>> {
  let result = async {
    let user = app_state.require_session()?;
    app_state.api.user_orders(&user.token, &user.id).await
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "orders::detail", skip(app_state))]
pub async fn detail(app_state: &AppState, order_id: &str) -> Result<Order> {
  let result = async {
    let user = app_state.require_session()?;
    app_state.api.order_detail(&user.token, order_id).await
  }
  .await;
  app_state.report(result)
}
