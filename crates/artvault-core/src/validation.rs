//! # Validation Module
//!
//! Input validation for the upload, account and payment forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (browser / CLI arguments)                               │
//! │  └── Raw strings, nothing trusted                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Page controller                                              │
//! │  └── THIS MODULE: coerce + check before touching state                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog filter / cart aggregator                             │
//! │  └── Assume well-formed records, never fail                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use artvault_core::validation::{parse_price, validate_title};
//!
//! validate_title("Abstract Dreams").unwrap();
//! assert_eq!(parse_price("450.00").unwrap().cents(), 45_000);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Category;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a listing title.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is present after trimming and returns the trimmed
/// value.
///
/// Used for passwords and every payment form field.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Validates a listing title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use artvault_core::validation::validate_title;
///
/// assert!(validate_title("Serenity").is_ok());
/// assert!(validate_title("   ").is_err());
/// assert!(validate_title(&"A".repeat(201)).is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<String> {
    let title = validate_required("title", title)?;

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(title)
}

/// Validates an email address.
///
/// Only the shape is checked: one `@` with something on both sides, and a
/// domain containing a dot.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    Ok(email)
}

/// Parses a category form value.
pub fn parse_category(raw: &str) -> ValidationResult<Category> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }
    raw.parse()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// Zero is allowed; negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Parses a decimal price string into [`Money`].
///
/// ## Rules
/// - Digits with an optional fractional part of at most two digits
/// - No currency symbol, sign or thousands separator
/// - Must be non-negative
///
/// ## User Workflow
/// ```text
/// Upload form: price = "450.5"
///      │
///      ▼
/// parse_price("450.5") ← THIS FUNCTION
///      │
///      ├── "" ─────────► Error: price is required
///      ├── "-5" ───────► Error: price must be between 0 and ...
///      ├── "4.999" ────► Error: at most two decimal places
///      │
///      └── OK ─────────► Money(45050)
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if raw.starts_with('-') {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    };

    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(invalid("must be a number like 450 or 450.00"));
    }
    if fraction.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("too large"))?
    };
    // "5" after the point means 50 cents
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
        _ => fraction.parse().map_err(|_| invalid("bad fraction"))?,
    };

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(cents))
        .map(Money::from_cents)
        .ok_or_else(|| invalid("too large"))
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
