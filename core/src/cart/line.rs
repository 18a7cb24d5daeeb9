// burgerbox/src/cart/line.rs

use crate::catalog::{PriceTable, Product};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: one product in one variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
  pub product_id: String,
  pub variant: String,
}

impl LineKey {
  pub fn new(product_id: impl Into<String>, variant: impl Into<String>) -> Self {
    Self {
      product_id: product_id.into(),
      variant: variant.into(),
    }
  }
}

impl fmt::Display for LineKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.product_id, self.variant)
  }
}

/// One product + variant in the cart.
///
/// The price table and display fields are copied from the product when the line
/// is created and never refreshed. `line_total` is kept equal to
/// `quantity * unit price` by every mutation. Field names on the wire match what
/// the storefront API expects for `orderItems`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  #[serde(rename = "_id")]
  product_id: String,
  name: String,
  #[serde(default)]
  image: String,
  #[serde(rename = "prices")]
  unit_prices: PriceTable,
  variant: String,
  quantity: u32,
  #[serde(rename = "price")]
  line_total: u64,
}

impl CartLine {
  /// Builds a line for `variant` of `product`. The caller has already checked the
  /// variant is priced.
  pub(crate) fn from_product(product: &Product, variant: &str, quantity: u32) -> Self {
    let mut line = Self {
      product_id: product.id.clone(),
      name: product.name.clone(),
      image: product.image.clone(),
      unit_prices: product.prices.clone(),
      variant: variant.to_string(),
      quantity: 0,
      line_total: 0,
    };
    line.set_quantity(quantity);
    line
  }

  pub fn key(&self) -> LineKey {
    LineKey::new(&self.product_id, &self.variant)
  }

  pub(crate) fn matches(&self, key: &LineKey) -> bool {
    self.product_id == key.product_id && self.variant == key.variant
  }

  pub fn product_id(&self) -> &str {
    &self.product_id
  }

  pub fn variant(&self) -> &str {
    &self.variant
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn image(&self) -> &str {
    &self.image
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  pub fn unit_prices(&self) -> &PriceTable {
    &self.unit_prices
  }

  /// Unit price of this line's variant. Zero only for a line whose table lost
  /// the variant, which [`Cart::load`](super::Cart::load) filters out.
  pub fn unit_price(&self) -> u64 {
    self.unit_prices.get(&self.variant).unwrap_or(0)
  }

  pub fn line_total(&self) -> u64 {
    self.line_total
  }

  pub(crate) fn set_quantity(&mut self, quantity: u32) {
    self.quantity = quantity;
    self.line_total = self.unit_price().saturating_mul(u64::from(quantity));
  }
}
