// burgerbox/src/cart/event.rs

use super::line::LineKey;
use super::MAX_LINE_QUANTITY;
use crate::notice::Notice;

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
  /// A new line was created.
  Added { key: LineKey, quantity: u32 },
  /// An existing line's quantity changed.
  Updated { key: LineKey, quantity: u32 },
  /// The requested quantity was above the per-line limit and was capped.
  LimitReached { key: LineKey },
  Removed { key: LineKey },
  Cleared,
  /// Nothing to do (unknown key, or a non-positive amount for a missing line).
  Unchanged,
}

impl CartEvent {
  /// The toast shown to the shopper, if any.
  pub fn notice(&self) -> Option<Notice> {
    match self {
      CartEvent::Added { .. } => Some(Notice::success("Item added to cart!")),
      CartEvent::Updated { .. } => Some(Notice::success("Item quantity updated!")),
      CartEvent::LimitReached { .. } => Some(Notice::error(format!(
        "You can only have up to {} items of the same variant in the cart.",
        MAX_LINE_QUANTITY
      ))),
      CartEvent::Removed { .. } => Some(Notice::info("Item removed from cart.")),
      CartEvent::Cleared | CartEvent::Unchanged => None,
    }
  }

  pub fn key(&self) -> Option<&LineKey> {
    match self {
      CartEvent::Added { key, .. }
      | CartEvent::Updated { key, .. }
      | CartEvent::LimitReached { key }
      | CartEvent::Removed { key } => Some(key),
      CartEvent::Cleared | CartEvent::Unchanged => None,
    }
  }

  pub fn is_unchanged(&self) -> bool {
    matches!(self, CartEvent::Unchanged)
  }
}
