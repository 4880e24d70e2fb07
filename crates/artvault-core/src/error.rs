//! # Error Types
//!
//! Domain-specific error types for artvault-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  artvault-core errors (this file)                                      │
//! │  ├── CoreError        - Marketplace rule violations                    │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  artvault-store errors (separate crate)                                │
//! │  └── StoreError       - Local storage failures                         │
//! │                                                                         │
//! │  App errors (apps/artvault)                                            │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog filter and the cart aggregator never return these: they are
//! total functions. Errors come from the controller boundary, where user
//! input is validated and marketplace rules are checked.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Marketplace rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Listing id does not exist in the catalog.
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    /// Listing has already been sold and cannot be added to a cart.
    #[error("Listing {0} has already been sold")]
    ListingSold(String),

    /// The action requires a signed-in account.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Add to Cart" (signed out)
    ///      │
    ///      ▼
    /// NotSignedIn
    ///      │
    ///      ▼
    /// UI shows: "Please login to add items to cart"
    /// ```
    #[error("Please login to {action}")]
    NotSignedIn { action: String },

    /// Checkout was requested with no cart lines.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A cart edit would push the totals past what `Money` can hold.
    #[error("Cart total is too large")]
    TotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotSignedIn error for the given action.
    pub fn not_signed_in(action: impl Into<String>) -> Self {
        CoreError::NotSignedIn {
            action: action.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparsable price, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
