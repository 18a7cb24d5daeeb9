// burgerbox/src/catalog.rs

//! Products ("burgers"), their price tables and the admin product form.

use crate::error::{CartError, CartResult, DraftError};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Variants an admin can offer.
pub const KNOWN_VARIANTS: [&str; 3] = ["small", "medium", "large"];

/// Unit price per variant, in whole currency units.
///
/// The remote API wraps the table in a one-element array (`[{"small": 100}]`).
/// Deserialization accepts that or a bare map, and prices as numbers or numeric
/// strings. Entries that are not a whole non-negative number are dropped.
/// Serialization always emits the array form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable(BTreeMap<String, u64>);

impl PriceTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, variant: &str) -> Option<u64> {
    self.0.get(variant).copied()
  }

  pub fn insert(&mut self, variant: impl Into<String>, price: u64) -> Option<u64> {
    self.0.insert(variant.into(), price)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }
}

impl<K: Into<String>> FromIterator<(K, u64)> for PriceTable {
  fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
    PriceTable(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

impl Serialize for PriceTable {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(std::iter::once(&self.0))
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
  Whole(u64),
  Fractional(f64),
  Text(String),
}

impl RawPrice {
  fn whole(&self) -> Option<u64> {
    match self {
      RawPrice::Whole(v) => Some(*v),
      RawPrice::Fractional(v) if v.fract() == 0.0 && *v >= 0.0 => Some(*v as u64),
      RawPrice::Fractional(_) => None,
      RawPrice::Text(s) => s.trim().parse().ok(),
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTable {
  Wrapped(Vec<BTreeMap<String, RawPrice>>),
  Bare(BTreeMap<String, RawPrice>),
}

impl<'de> Deserialize<'de> for PriceTable {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let maps = match RawTable::deserialize(deserializer)? {
      RawTable::Wrapped(maps) => maps,
      RawTable::Bare(map) => vec![map],
    };
    let mut table = BTreeMap::new();
    for (variant, raw) in maps.into_iter().flatten() {
      match raw.whole() {
        Some(price) => {
          table.insert(variant, price);
        }
        None => warn!(%variant, "Dropping unparseable price."),
      }
    }
    Ok(PriceTable(table))
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  #[default]
  Veg,
  NonVeg,
  #[serde(other)]
  Other,
}

impl Category {
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Veg => "veg",
      Category::NonVeg => "nonveg",
      Category::Other => "other",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "veg" => Ok(Category::Veg),
      "nonveg" | "non-veg" => Ok(Category::NonVeg),
      other => Err(format!("unknown category '{}'", other)),
    }
  }
}

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category: Category,
  #[serde(default)]
  pub variants: Vec<String>,
  #[serde(default)]
  pub prices: PriceTable,
  #[serde(default)]
  pub image: String,
}

impl Product {
  /// Rejects products the cart cannot key or display.
  pub fn validate(&self) -> CartResult<()> {
    if self.id.trim().is_empty() {
      return Err(CartError::InvalidProduct("missing product id".to_string()));
    }
    if self.name.trim().is_empty() {
      return Err(CartError::InvalidProduct(format!("product '{}' has no name", self.id)));
    }
    Ok(())
  }

  /// Unit price of a variant the product actually offers.
  pub fn price_for(&self, variant: &str) -> Option<u64> {
    if !self.variants.iter().any(|v| v == variant) {
      return None;
    }
    self.prices.get(variant)
  }

  /// The variant a product card preselects.
  pub fn default_variant(&self) -> Option<&str> {
    self.variants.first().map(String::as_str)
  }
}

/// The admin "add / edit burger" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
  pub name: String,
  pub description: String,
  pub category: Category,
  /// Selected variants in selection order, each with a price once entered.
  pub variants: Vec<(String, Option<u64>)>,
  pub image: String,
}

/// Request body for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
  pub name: String,
  pub description: String,
  pub category: Category,
  pub variants: Vec<String>,
  pub prices: PriceTable,
  pub image: String,
}

impl ProductDraft {
  /// Prefills the edit form from an existing product.
  pub fn from_product(product: &Product) -> Self {
    Self {
      name: product.name.clone(),
      description: product.description.clone(),
      category: product.category,
      variants: product
        .variants
        .iter()
        .map(|v| (v.clone(), product.prices.get(v)))
        .collect(),
      image: product.image.clone(),
    }
  }

  /// Selecting adds an unpriced entry; deselecting drops the variant and its price.
  pub fn toggle_variant(&mut self, variant: &str) -> Result<(), DraftError> {
    if !KNOWN_VARIANTS.contains(&variant) {
      return Err(DraftError::UnknownVariant(variant.to_string()));
    }
    match self.variants.iter().position(|(v, _)| v == variant) {
      Some(idx) => {
        self.variants.remove(idx);
      }
      None => self.variants.push((variant.to_string(), None)),
    }
    Ok(())
  }

  pub fn set_price(&mut self, variant: &str, price: u64) -> Result<(), DraftError> {
    let slot = self
      .variants
      .iter_mut()
      .find(|(v, _)| v == variant)
      .ok_or_else(|| DraftError::UnknownVariant(variant.to_string()))?;
    slot.1 = Some(price);
    Ok(())
  }

  pub fn validate(&self) -> Result<(), DraftError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&self.name) || blank(&self.description) || blank(&self.image) {
      return Err(DraftError::MissingFields);
    }
    if self.variants.is_empty() {
      return Err(DraftError::NoVariants);
    }
    if let Some((variant, _)) = self.variants.iter().find(|(_, p)| !matches!(p, Some(p) if *p > 0)) {
      return Err(DraftError::UnpricedVariant(variant.clone()));
    }
    Ok(())
  }

  /// Validates the form and builds the request body.
  pub fn to_payload(&self) -> Result<ProductPayload, DraftError> {
    self.validate()?;
    Ok(ProductPayload {
      name: self.name.trim().to_string(),
      description: self.description.trim().to_string(),
      category: self.category,
      variants: self.variants.iter().map(|(v, _)| v.clone()).collect(),
      prices: self
        .variants
        .iter()
        .filter_map(|(v, p)| p.map(|p| (v.clone(), p)))
        .collect(),
      image: self.image.trim().to_string(),
    })
  }
}
