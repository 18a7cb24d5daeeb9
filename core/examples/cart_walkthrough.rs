// burgerbox/examples/cart_walkthrough.rs

use burgerbox::{
  Cart, Category, Flow, FlowError, FlowState, MemoryStore, PriceTable, Product, StepControl, CART_KEY,
};
use std::sync::Arc;
use tracing::info;

fn classic() -> Product {
  Product {
    id: "b1".to_string(),
    name: "Classic".to_string(),
    description: "Grilled veg patty".to_string(),
    category: Category::Veg,
    variants: vec!["small".to_string(), "large".to_string()],
    prices: [("small", 100), ("large", 250)].into_iter().collect::<PriceTable>(),
    image: String::new(),
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cart walkthrough ---");

  // 1. A cart backed by an in-memory store
  let store = Arc::new(MemoryStore::new());
  let mut cart = Cart::load(store.clone());

  // 2. Add, merge, clamp and step down
  let burger = classic();
  for (delta, variant) in [(2, "small"), (1, "large"), (9, "small"), (-1, "large")] {
    let event = cart.add_to_cart(&burger, delta, variant)?;
    if let Some(notice) = event.notice() {
      info!("{}", notice);
    }
  }
  info!(items = cart.item_count(), total = cart.total_price(), "Cart after edits.");
  info!(persisted = ?store.contains(CART_KEY), "Write-through persistence.");

  // 3. A two-step flow over the shared cart
  let mut flow = Flow::<Cart, FlowError>::with_steps("price_and_clear", &["price", "clear"]);
  flow.on("price", |cart: FlowState<Cart>| async move {
    info!(total = cart.read().total_price(), "Priced.");
    Ok::<_, FlowError>(StepControl::Continue)
  });
  flow.on("clear", |cart: FlowState<Cart>| async move {
    cart
      .update(|c| c.clear())
      .map_err(|e| FlowError::Internal(e.to_string()))?;
    Ok::<_, FlowError>(StepControl::Continue)
  });

  let shared = FlowState::new(cart);
  let outcome = flow.run(shared.clone()).await?;
  info!(?outcome, empty = shared.read().is_empty(), "Flow finished.");
  Ok(())
}
