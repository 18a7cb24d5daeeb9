// burgerbox_storefront/src/errors.rs

use crate::forms::FieldErrors;
use burgerbox::{CartError, DraftError, FlowError, Notice, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// One or more form fields failed validation.
  #[error("Form Error: {0}")]
  Form(FieldErrors),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Payment Processing Error: {0}")]
  Payment(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// The HTTP client itself could not be built or used.
  #[error("HTTP Client Error: {0}")]
  Http(#[from] reqwest::Error),

  /// A remote call failed. `message` is the server's message when it sent one,
  /// otherwise the call's default text.
  #[error("API Error (status {status:?}): {message}")]
  Api { status: Option<u16>, message: String },

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),

  #[error("Storage Error: {0}")]
  Storage(#[from] StoreError),

  #[error("Product Form Error: {0}")]
  Draft(#[from] DraftError),

  #[error("Internal Error: {0}")]
  Internal(String),
}

// Handlers that work with anyhow can still use `?`.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl AppError {
  /// The error toast shown to the shopper.
  pub fn notice(&self) -> Notice {
    tracing::debug!(application_error = %self, "Rendering error notice");
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::Payment(m) | AppError::NotFound(m) => Notice::error(m.clone()),
      AppError::Form(_) => Notice::error("Please fix the errors in the form!"),
      AppError::Api { message, .. } => Notice::error(message.clone()),
      AppError::Draft(e) => Notice::error(e.to_string()),
      AppError::Cart(CartError::UnknownVariant { variant, .. }) => {
        Notice::error(format!("The '{}' variant is not available for this burger.", variant))
      }
      AppError::Cart(CartError::InvalidProduct(_)) => Notice::error("This burger cannot be added to the cart."),
      AppError::Cart(CartError::Storage(_)) | AppError::Storage(_) => {
        Notice::error("Could not save your changes on this device.")
      }
      AppError::Http(_) => Notice::error("Network error, please try again."),
      AppError::Config(m) => Notice::error(format!("Configuration issue: {}", m)),
      AppError::Workflow { .. } | AppError::Internal(_) => Notice::error("Something went wrong!"),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
