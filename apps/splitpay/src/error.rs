//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SplitPay                               │
//! │                                                                         │
//! │  UI action ──► command ──► Result<T, ApiError>                          │
//! │                               │                                         │
//! │     SplitError::InvalidAmount ├──► INVALID_AMOUNT   (form message)      │
//! │     SplitError::MissingName   ├──► MISSING_NAME     (form message)      │
//! │     SplitError::NoParticipants├──► NO_PARTICIPANTS  (form message)      │
//! │     ProviderError             ├──► RATES_UNAVAILABLE (old table kept)   │
//! │     ExportError               ├──► EXPORT_FAILED                        │
//! │     CoreError::...NotFound    └──► NOT_FOUND                            │
//! │                                                                         │
//! │  Every error is recoverable: the UI shows `message`, keeps the form    │
//! │  and the previous result, and the user retries.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use splitpay_core::{CoreError, SplitError};

use crate::export::ExportError;
use crate::provider::ProviderError;

/// Message shown when a rate refresh fails.
pub const RATES_UNAVAILABLE_MESSAGE: &str = "Failed to fetch exchange rates. Please try again.";

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_AMOUNT",
///   "message": "Please enter a valid total amount"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Total amount missing, non-numeric or not positive
    InvalidAmount,

    /// A participant has no name
    MissingName,

    /// Field-level input failure (bad currency code, bad id)
    ValidationError,

    /// Calculation requested with an empty roster
    NoParticipants,

    /// Participant id unknown
    NotFound,

    /// Rate or currency refresh failed
    RatesUnavailable,

    /// Copy/share requested before any calculation succeeded
    NoResult,

    /// Clipboard or share sink failed
    ExportFailed,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the "no result yet" error for export commands.
    pub fn no_result() -> Self {
        ApiError::new(ErrorCode::NoResult, "Calculate a split first")
    }
}

/// Converts split errors to API errors.
impl From<SplitError> for ApiError {
    fn from(err: SplitError) -> Self {
        let code = match err {
            SplitError::InvalidAmount => ErrorCode::InvalidAmount,
            SplitError::MissingName => ErrorCode::MissingName,
            SplitError::NoParticipants => ErrorCode::NoParticipants,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Split(e) => ApiError::from(e),
            CoreError::EmptyRateTable { .. } | CoreError::EmptyCurrencyList => {
                tracing::warn!(error = %err, "Rejected empty rate data");
                ApiError::new(ErrorCode::RatesUnavailable, RATES_UNAVAILABLE_MESSAGE)
            }
            CoreError::ParticipantNotFound(_) => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts provider failures to API errors.
///
/// The underlying cause is logged; the UI gets the fixed retry message.
impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        tracing::error!(error = %err, "Rate provider failed");
        ApiError::new(ErrorCode::RatesUnavailable, RATES_UNAVAILABLE_MESSAGE)
    }
}

/// Converts export sink failures to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::new(ErrorCode::ExportFailed, err.to_string())
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
    use splitpay_core::ValidationError;

    #[test]
    fn test_split_errors_map_to_codes() {
        let err = ApiError::from(SplitError::InvalidAmount);
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.message, "Please enter a valid total amount");

        let err = ApiError::from(CoreError::Split(SplitError::MissingName));
        assert_eq!(err.code, ErrorCode::MissingName);
    }

    #[test]
    fn test_empty_roster_has_its_own_code() {
        let err = ApiError::from(SplitError::NoParticipants);
        assert_eq!(err.code, ErrorCode::NoParticipants);
        assert_eq!(err.message, "Add at least one person to split the bill");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NO_PARTICIPANTS");
    }

    #[test]
    fn test_provider_error_uses_retry_message() {
        let err = ApiError::from(ProviderError::Unavailable("timeout".to_string()));
        assert_eq!(err.code, ErrorCode::RatesUnavailable);
        assert_eq!(err.message, RATES_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_empty_table_uses_retry_message() {
        let err = ApiError::from(CoreError::EmptyRateTable {
            base: "USD".to_string(),
        });
        assert_eq!(err.code, ErrorCode::RatesUnavailable);
        assert_eq!(err.message, RATES_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_validation_error_maps() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "currency".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "currency is required");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::no_result()).unwrap();
        assert_eq!(json["code"], "NO_RESULT");
        assert_eq!(json["message"], "Calculate a split first");
    }
}
