// burgerbox/src/flow/state.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable state handed to every step handler of a [`Flow`](super::Flow).
///
/// Cloning is cheap and every clone points at the same data. The storefront also
/// uses it to share the cart between the front end and the checkout flow.
///
/// IMPORTANT: guards returned by `read`/`write` are blocking and MUST NOT be held
/// across `.await` suspension points.
#[derive(Debug)]
pub struct FlowState<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> FlowState<T> {
  pub fn new(data: T) -> Self {
    FlowState(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock. Drop the guard before any `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write lock. Drop the guard before any `.await`.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Runs `f` under the write lock and returns its result.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    f(&mut self.0.write())
  }
}

impl<T: Send + Sync + 'static> Clone for FlowState<T> {
  fn clone(&self) -> Self {
    FlowState(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for FlowState<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
