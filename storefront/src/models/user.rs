// burgerbox_storefront/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as returned by register/login and persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub is_admin: bool,
  /// Bearer token for authenticated calls.
  pub token: String,
}

/// A row of the admin user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub is_admin: bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
  pub name: String,
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
  pub email: String,
  pub password: String,
}

/// Bodies of the password-recovery endpoints that only carry a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
  #[serde(default)]
  pub message: Option<String>,
}
