// burgerbox/src/cart/state.rs

use super::event::CartEvent;
use super::line::{CartLine, LineKey};
use super::MAX_LINE_QUANTITY;
use crate::catalog::Product;
use crate::error::{CartError, CartResult, StoreError};
use crate::store::{KeyValueStore, CART_KEY};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The shopper's cart.
///
/// Lines keep insertion order. Every applied transition, including a clamp at
/// the per-line limit, is written through to the injected store before the
/// operation returns. `Unchanged` outcomes write nothing.
#[derive(Debug)]
pub struct Cart {
  lines: Vec<CartLine>,
  store: Arc<dyn KeyValueStore>,
}

impl Cart {
  /// An empty cart backed by `store`. Does not read or write anything.
  pub fn empty(store: Arc<dyn KeyValueStore>) -> Self {
    Self { lines: Vec::new(), store }
  }

  /// Restores the cart persisted in `store`.
  ///
  /// A missing entry, a read failure or a malformed document all yield an empty
  /// cart. Restored lines are normalized so the cart invariants hold.
  #[instrument(name = "Cart::load", skip_all)]
  pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
    let raw = match store.get(CART_KEY) {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        debug!("No persisted cart, starting empty.");
        return Self::empty(store);
      }
      Err(e) => {
        warn!(error = %e, "Could not read persisted cart, starting empty.");
        return Self::empty(store);
      }
    };
    let lines = match serde_json::from_str::<Vec<CartLine>>(&raw) {
      Ok(lines) => normalize(lines),
      Err(e) => {
        warn!(error = %e, "Persisted cart is malformed, starting empty.");
        Vec::new()
      }
    };
    info!(lines = lines.len(), "Cart restored.");
    Self { lines, store }
  }

  // --- Mutations ---

  /// Applies a signed quantity delta to `variant` of `product`.
  ///
  /// Positive deltas add (creating the line if needed), negative deltas
  /// decrement and remove the line once it reaches zero. Merging into an
  /// existing line caps it at [`MAX_LINE_QUANTITY`]; a new line takes the
  /// delta as given.
  pub fn add_to_cart(&mut self, product: &Product, delta: i64, variant: &str) -> CartResult<CartEvent> {
    check_variant(product, variant)?;
    let key = LineKey::new(&product.id, variant);
    let event = match self.position(&key) {
      Some(idx) => {
        let proposed = i64::from(self.lines[idx].quantity()).saturating_add(delta);
        self.apply_quantity(idx, proposed)
      }
      None if delta > 0 => self.insert_line(product, variant, u32::try_from(delta).unwrap_or(u32::MAX)),
      None => CartEvent::Unchanged,
    };
    self.commit(event)
  }

  /// Same as a positive [`add_to_cart`](Self::add_to_cart).
  pub fn increment(&mut self, product: &Product, variant: &str, by: u32) -> CartResult<CartEvent> {
    self.add_to_cart(product, i64::from(by), variant)
  }

  /// Lowers the quantity of an existing line; removes it at zero.
  pub fn decrement(&mut self, key: &LineKey, by: u32) -> CartResult<CartEvent> {
    self.adjust_line(key, -i64::from(by))
  }

  /// Applies a signed delta to an existing line (the cart page's +/- stepper).
  /// Absent keys are left alone.
  pub fn adjust_line(&mut self, key: &LineKey, delta: i64) -> CartResult<CartEvent> {
    let event = match self.position(key) {
      Some(idx) => {
        let proposed = i64::from(self.lines[idx].quantity()).saturating_add(delta);
        self.apply_quantity(idx, proposed)
      }
      None => CartEvent::Unchanged,
    };
    self.commit(event)
  }

  /// Sets an absolute quantity. Zero removes the line.
  ///
  /// Unlike `add_to_cart`, a line created here is capped at
  /// [`MAX_LINE_QUANTITY`] as well.
  pub fn set_quantity(&mut self, product: &Product, variant: &str, quantity: u32) -> CartResult<CartEvent> {
    check_variant(product, variant)?;
    let key = LineKey::new(&product.id, variant);
    let event = match self.position(&key) {
      Some(idx) => self.apply_quantity(idx, i64::from(quantity)),
      None if quantity > MAX_LINE_QUANTITY => {
        self.insert_line(product, variant, MAX_LINE_QUANTITY);
        CartEvent::LimitReached { key }
      }
      None if quantity > 0 => self.insert_line(product, variant, quantity),
      None => CartEvent::Unchanged,
    };
    self.commit(event)
  }

  pub fn remove_from_cart(&mut self, key: &LineKey) -> CartResult<CartEvent> {
    let event = match self.position(key) {
      Some(idx) => {
        self.lines.remove(idx);
        CartEvent::Removed { key: key.clone() }
      }
      None => CartEvent::Unchanged,
    };
    self.commit(event)
  }

  /// Empties the cart and deletes the persisted entry.
  #[instrument(name = "Cart::clear", skip(self), fields(lines = self.lines.len()))]
  pub fn clear(&mut self) -> CartResult<CartEvent> {
    self.lines.clear();
    self.store.delete(CART_KEY)?;
    info!("Cart cleared.");
    Ok(CartEvent::Cleared)
  }

  // --- Queries (always derived from the current lines) ---

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.matches(key))
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Sum of quantities over all lines.
  pub fn item_count(&self) -> u64 {
    self.lines.iter().fold(0u64, |acc, l| acc.saturating_add(u64::from(l.quantity())))
  }

  /// Sum of line totals, saturating at `u64::MAX`.
  pub fn total_price(&self) -> u64 {
    self.lines.iter().fold(0u64, |acc, l| acc.saturating_add(l.line_total()))
  }

  /// Owned copy of the lines, e.g. for an order request.
  pub fn snapshot(&self) -> Vec<CartLine> {
    self.lines.clone()
  }

  // --- Internals ---

  fn position(&self, key: &LineKey) -> Option<usize> {
    self.lines.iter().position(|l| l.matches(key))
  }

  /// The shared quantity policy for existing lines.
  fn apply_quantity(&mut self, idx: usize, proposed: i64) -> CartEvent {
    let key = self.lines[idx].key();
    if proposed > i64::from(MAX_LINE_QUANTITY) {
      self.lines[idx].set_quantity(MAX_LINE_QUANTITY);
      CartEvent::LimitReached { key }
    } else if proposed <= 0 {
      self.lines.remove(idx);
      CartEvent::Removed { key }
    } else {
      let quantity = proposed as u32;
      self.lines[idx].set_quantity(quantity);
      CartEvent::Updated { key, quantity }
    }
  }

  fn insert_line(&mut self, product: &Product, variant: &str, quantity: u32) -> CartEvent {
    let line = CartLine::from_product(product, variant, quantity);
    let key = line.key();
    self.lines.push(line);
    CartEvent::Added { key, quantity }
  }

  fn commit(&mut self, event: CartEvent) -> CartResult<CartEvent> {
    if event.is_unchanged() {
      debug!("Cart operation was a no-op.");
      return Ok(event);
    }
    self.persist()?;
    debug!(?event, lines = self.lines.len(), total = self.total_price(), "Cart updated.");
    Ok(event)
  }

  fn persist(&self) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(&self.lines).map_err(|source| StoreError::Encode {
      key: CART_KEY.to_string(),
      source,
    })?;
    self.store.put(CART_KEY, &encoded)
  }
}

fn check_variant(product: &Product, variant: &str) -> CartResult<()> {
  product.validate()?;
  match product.price_for(variant) {
    Some(_) => Ok(()),
    None => Err(CartError::UnknownVariant {
      product_id: product.id.clone(),
      variant: variant.to_string(),
    }),
  }
}

/// Restores the cart invariants on lines read from storage.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
  let before = lines.len();
  let mut seen = HashSet::new();
  let normalized: Vec<CartLine> = lines
    .into_iter()
    .filter(|l| l.quantity() > 0 && l.unit_prices().get(l.variant()).is_some())
    .filter(|l| seen.insert(l.key()))
    .map(|mut l| {
      l.set_quantity(l.quantity());
      l
    })
    .collect();
  if normalized.len() != before {
    warn!(dropped = before - normalized.len(), "Dropped invalid persisted cart lines.");
  }
  normalized
}
