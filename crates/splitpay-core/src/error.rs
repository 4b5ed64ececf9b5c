//! # Error Types
//!
//! Domain-specific error types for splitpay-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  splitpay-core errors (this file)                                      │
//! │  ├── SplitError       - Why a calculation produced no result           │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  └── CoreError        - Cache and roster failures, wraps the above     │
//! │                                                                         │
//! │  apps/splitpay errors (separate crate)                                 │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → SplitError → CoreError → ApiError → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing exchange rate is deliberately absent from this file: the engine
//! falls back to the unconverted share instead of failing.

use thiserror::Error;

// =============================================================================
// Split Error
// =============================================================================

/// Reasons a split request is rejected.
///
/// Only the first failure is reported, checked in declaration order.
///
/// ## User Workflow
/// ```text
/// Click "Calculate Split"
///      │
///      ▼
/// amount parses, finite, > 0 ? ──no──► InvalidAmount
///      │ yes
///      ▼
/// every name non-blank ? ─────────no──► MissingName
///      │ yes
///      ▼
/// SplitResult replaces the previous one
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Amount missing, non-numeric, non-finite, zero or negative.
    #[error("Please enter a valid total amount")]
    InvalidAmount,

    /// At least one participant has an empty or whitespace-only name.
    #[error("Please enter names for all people")]
    MissingName,

    /// The request carried no participants at all.
    #[error("Add at least one person to split the bill")]
    NoParticipants,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Calculation rejected.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// A rate refresh delivered no rates; the cached table is kept.
    #[error("Rate table for {base} is empty")]
    EmptyRateTable { base: String },

    /// A metadata refresh delivered no currencies; the cached list is kept.
    #[error("Currency list is empty")]
    EmptyCurrencyList,

    /// No participant carries this id.
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric amount, malformed code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_error_messages() {
        assert_eq!(
            SplitError::InvalidAmount.to_string(),
            "Please enter a valid total amount"
        );
        assert_eq!(
            SplitError::MissingName.to_string(),
            "Please enter names for all people"
        );
    }

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::EmptyRateTable {
            base: "USD".to_string(),
        };
        assert_eq!(err.to_string(), "Rate table for USD is empty");

        let err = CoreError::ParticipantNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Participant not found: abc");
    }

    #[test]
    fn test_split_error_converts_transparently() {
        let core_err: CoreError = SplitError::MissingName.into();
        assert!(matches!(core_err, CoreError::Split(SplitError::MissingName)));
        assert_eq!(core_err.to_string(), "Please enter names for all people");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "currency".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: currency is required"
        );
    }
}
