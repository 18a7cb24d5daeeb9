// burgerbox/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the flow engine itself (as opposed to errors returned by
/// user-provided step handlers).
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Error in step handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error for step '{step_name}': {message}")]
  ConfigurationError { step_name: String, message: String },

  #[error("Internal flow error: {0}")]
  Internal(String),
}

// Lets handlers that work in `anyhow` land use `?` and still produce a FlowError.
impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;

/// Failures of the client-local key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Storage I/O failed for key '{key}': {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to encode value for key '{key}': {source}")]
  Encode {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid storage key '{0}'")]
  InvalidKey(String),
}

/// Errors returned by cart operations.
///
/// Quantity policy outcomes (clamping at the limit, removal at zero) are not
/// errors; they are reported through [`crate::cart::CartEvent`].
#[derive(Debug, Error)]
pub enum CartError {
  #[error("Product '{product_id}' has no priced variant '{variant}'")]
  UnknownVariant { product_id: String, variant: String },

  #[error("Invalid product: {0}")]
  InvalidProduct(String),

  #[error("Cart storage failed: {0}")]
  Storage(#[from] StoreError),
}

pub type CartResult<T> = std::result::Result<T, CartError>;

/// Why an admin product form cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
  #[error("Please fill all fields!")]
  MissingFields,

  #[error("Please select at least one variant!")]
  NoVariants,

  #[error("Please enter a price for the '{0}' variant!")]
  UnpricedVariant(String),

  #[error("Unknown variant '{0}'")]
  UnknownVariant(String),
}
