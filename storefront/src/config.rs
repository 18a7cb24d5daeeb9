// burgerbox_storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DELIVERY_FEE: u64 = 50;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter from `RUST_LOG`-style directives, or warnings and above when
/// they are missing or invalid.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
  directives
    .and_then(|d| EnvFilter::try_new(d).ok())
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Base URL of the storefront REST API, without a trailing slash.
  pub api_base_url: String,
  /// Where the cart and session documents live.
  pub data_dir: PathBuf,
  pub delivery_fee: u64,

  // Checkout widget
  pub payment_key_id: String,
  pub currency: String,

  pub http_timeout: Duration,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the process
  /// environment; tests pass a map.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let api_base_url = get("BURGERBOX_API_BASE_URL")
      .ok_or_else(|| AppError::Config("Missing environment variable 'BURGERBOX_API_BASE_URL'".to_string()))?
      .trim_end_matches('/')
      .to_string();
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
      return Err(AppError::Config(format!(
        "BURGERBOX_API_BASE_URL must be an http(s) URL, got '{}'",
        api_base_url
      )));
    }

    let data_dir = PathBuf::from(get("BURGERBOX_DATA_DIR").unwrap_or_else(|| ".burgerbox".to_string()));

    let delivery_fee = match get("BURGERBOX_DELIVERY_FEE") {
      Some(raw) => raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid BURGERBOX_DELIVERY_FEE: {}", e)))?,
      None => DEFAULT_DELIVERY_FEE,
    };

    let payment_key_id = get("BURGERBOX_PAYMENT_KEY_ID").unwrap_or_default();
    let currency = get("BURGERBOX_CURRENCY").unwrap_or_else(|| "INR".to_string());

    let timeout_secs = match get("BURGERBOX_HTTP_TIMEOUT_SECS") {
      Some(raw) => raw
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| AppError::Config(format!("Invalid BURGERBOX_HTTP_TIMEOUT_SECS value: '{}'", raw)))?,
      None => 30,
    };

    tracing::info!(api = %api_base_url, data_dir = %data_dir.display(), "Application configuration loaded successfully.");

    Ok(Self {
      api_base_url,
      data_dir,
      delivery_fee,
      payment_key_id,
      currency,
      http_timeout: Duration::from_secs(timeout_secs),
    })
  }
}
