// burgerbox/src/cart/mod.rs

//! The cart state machine.
//!
//! A cart is an ordered list of [`CartLine`]s keyed by (product id, variant).
//! Increments that would push a line past `MAX_LINE_QUANTITY` are capped
//! there, and a line whose quantity drops to zero or below is removed. A new
//! line takes whatever positive quantity it was added with. Each
//! operation reports a [`CartEvent`] which maps to the notice shown to the
//! shopper.

mod event;
mod line;
mod state;

pub use event::CartEvent;
pub use line::{CartLine, LineKey};
pub use state::Cart;

/// Most units of one product variant a cart may hold.
pub const MAX_LINE_QUANTITY: u32 = 10;
