//! # Validation Module
//!
//! Input validation utilities for SplitPay.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form UI (external)                                           │
//! │  └── Free text: amounts and names may be anything while typing         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field rules (amount, name, currency code, participant id)         │
//! │  └── Used by the split engine and the roster                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Split engine                                                 │
//! │  └── Collapses field errors into InvalidAmount / MissingName           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitpay_core::validation::{validate_total_amount, validate_currency_code};
//!
//! assert_eq!(validate_total_amount("300").unwrap(), 300.0);
//! assert!(validate_total_amount("0").is_err());
//! assert!(validate_currency_code("EUR").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::parse_amount;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest currency code accepted from providers or config.
pub const MAX_CURRENCY_CODE_LEN: usize = 10;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates the raw bill total and returns the parsed value.
///
/// ## Rules
/// - Must not be blank
/// - Must parse as a finite number
/// - Must be strictly greater than zero
pub fn validate_total_amount(raw: &str) -> ValidationResult<f64> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "total amount".to_string(),
        });
    }

    let amount = parse_amount(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: "total amount".to_string(),
        reason: "must be a number".to_string(),
    })?;

    if amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "total amount".to_string(),
        });
    }

    Ok(amount)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a participant name at calculation time.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// Blank names are allowed while editing; only a calculation rejects them.
pub fn validate_participant_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO-4217-like currency code.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_CURRENCY_CODE_LEN` characters
/// - ASCII letters and digits only
///
/// Case is preserved; lookups elsewhere are case-sensitive.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() > MAX_CURRENCY_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "currency".to_string(),
            max: MAX_CURRENCY_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a participant id string.
///
/// ## Example
/// ```rust
/// use splitpay_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
