// burgerbox_storefront/src/workflows/catalog.rs
use crate::errors::Result;
use crate::state::AppState;
use burgerbox::{Category, Product};
use tracing::instrument;

/// The home page list, filtered server-side by name and category.
#[instrument(name = "catalog::browse", skip(app_state))]
pub async fn browse(app_state: &AppState, search: &str, category: Option<Category>) -> Result<Vec<Product>> {
  let result = app_state.api.list_burgers(search.trim(), category).await;
  app_state.report(result)
}

#[instrument(name = "catalog::product", skip(app_state))]
pub async fn product(app_state: &AppState, id: &str) -> Result<Product> {
  let result = app_state.api.get_burger(id).await;
  app_state.report(result)
}
