// burgerbox_storefront/src/session.rs

use crate::errors::Result;
use crate::models::UserSession;
use burgerbox::{KeyValueStore, SESSION_KEY};
use std::sync::Arc;
use tracing::{debug, warn};

/// Persists the signed-in user under `currentUser`.
#[derive(Debug, Clone)]
pub struct SessionStore {
  store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
  pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
    Self { store }
  }

  /// The stored session. Unreadable or malformed entries count as signed out.
  pub fn load(&self) -> Option<UserSession> {
    let raw = match self.store.get(SESSION_KEY) {
      Ok(raw) => raw?,
      Err(e) => {
        warn!(error = %e, "Could not read the stored session.");
        return None;
      }
    };
    match serde_json::from_str::<UserSession>(&raw) {
      Ok(session) => {
        debug!(user = %session.id, "Session restored.");
        Some(session)
      }
      Err(e) => {
        warn!(error = %e, "Stored session is malformed, ignoring it.");
        None
      }
    }
  }

  pub fn save(&self, session: &UserSession) -> Result<()> {
    let raw = serde_json::to_string(session).map_err(|e| crate::errors::AppError::Internal(e.to_string()))?;
    self.store.put(SESSION_KEY, &raw)?;
    Ok(())
  }

  pub fn clear(&self) -> Result<()> {
    self.store.delete(SESSION_KEY)?;
    Ok(())
  }
}
