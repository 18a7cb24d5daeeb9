// burgerbox_storefront/src/notices.rs

use burgerbox::Notice;
use parking_lot::Mutex;
use std::sync::Arc;

/// Pending toasts, oldest first. The front end drains them after each action.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard(Arc<Mutex<Vec<Notice>>>);

impl NoticeBoard {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, notice: Notice) {
    tracing::debug!(severity = ?notice.severity, message = %notice.message, "Notice queued.");
    self.0.lock().push(notice);
  }

  pub fn drain(&self) -> Vec<Notice> {
    std::mem::take(&mut *self.0.lock())
  }

  pub fn latest(&self) -> Option<Notice> {
    self.0.lock().last().cloned()
  }

  pub fn len(&self) -> usize {
    self.0.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.lock().is_empty()
  }
}
