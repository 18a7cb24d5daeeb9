// burgerbox/src/store/mod.rs

//! Client-local key-value persistence.
//!
//! The cart and the signed-in user are each stored as one JSON document under a
//! fixed key and overwritten wholesale on every change. Implementations use
//! interior mutability so a single store can be shared behind an `Arc`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use std::fmt::Debug;

/// Key under which the cart lines are persisted.
pub const CART_KEY: &str = "cartItems";
/// Key under which the signed-in user is persisted.
pub const SESSION_KEY: &str = "currentUser";

pub trait KeyValueStore: Send + Sync + Debug {
  /// Returns `Ok(None)` when the key is absent.
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Inserts or overwrites a value.
  fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

  /// Removes a value. Succeeds when the key does not exist.
  fn delete(&self, key: &str) -> Result<(), StoreError>;
}
