//! # API Error Type
//!
//! Unified error type for marketplace commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ArtVault                               │
//! │                                                                         │
//! │  artvault cart add <id>                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::QueryFailed("...") ─┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Rule broken?  ──── CoreError::NotSignedIn ─────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: { "code": "UNAUTHORIZED",                                     │
//! │            "message": "Please login to add items to cart" }            │
//! │  exit status 1                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use artvault_core::{CoreError, ValidationError};
use artvault_store::StoreError;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Listing not found: 0b1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message, also used as the error notification text
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Listing or artist not found
    NotFound,

    /// Form input failed validation
    ValidationError,

    /// Local storage failed
    StorageError,

    /// Action requires a signed-in account
    Unauthorized,

    /// Cart operation refused (empty cart, sold listing, totals out of range)
    CartError,

    /// Payment form or simulated payment failed
    PaymentError,

    /// Reading an image or config file failed
    IoError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates a payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentError, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::IoError, message)
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local storage is unavailable")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local storage migration failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Local storage is busy")
            }
            StoreError::Serialization { key, message } => {
                tracing::error!(key = %key, "Stored value is malformed: {}", message);
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Saved data under '{}' is corrupted", key),
                )
            }
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ListingNotFound(id) => ApiError::not_found("Listing", &id),
            CoreError::ListingSold(_) | CoreError::EmptyCart | CoreError::TotalOverflow => {
                ApiError::cart(message)
            }
            CoreError::NotSignedIn { .. } => ApiError::new(ErrorCode::Unauthorized, message),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => ApiError::io(format!("Config file error: {}", e)),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::not_signed_in("add items to cart").into();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Please login to add items to cart");

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Your cart is empty");

        let err: ApiError = CoreError::TotalOverflow.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::ListingNotFound("x1".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Listing not found: x1");
    }

    #[test]
    fn test_store_errors_hide_details() {
        let err: ApiError = StoreError::QueryFailed("near \"SELEC\": syntax error".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("title is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "title is required");
    }
}
