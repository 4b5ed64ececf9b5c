//! # Domain Types
//!
//! Core domain types used throughout SplitPay.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │  SplitRequest   │   │  SplitResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  total (raw)    │   │  total_amount   │       │
//! │  │  name           │──►│  base_currency  │──►│  per person     │       │
//! │  │  currency       │   │  participants   │   │  people[]       │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │  ┌─────────────────┐                         ┌────────▼────────┐       │
//! │  │CurrencyMetadata │                         │  ResultPerson   │       │
//! │  │  code/name/     │── symbol ──────────────►│  name, currency │       │
//! │  │  symbol         │                         │  amount, symbol │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Participants are keyed by a UUID assigned when the row is created, never by
//! position, so edits and removals stay well-defined whatever the display
//! order.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::{format_fixed, format_total, with_symbol};
use crate::rates::fallback_symbol;
use crate::validation::validate_uuid;

// =============================================================================
// Participant Id
// =============================================================================

/// Stable identifier of a participant row (UUID v4 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        ParticipantId(Uuid::new_v4().to_string())
    }

    /// Parses an identifier received from the UI.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        validate_uuid(id)?;
        Ok(ParticipantId(id.to_string()))
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Participant
// =============================================================================

/// One person sharing the bill.
///
/// `name` may be blank while the row is being edited; a calculation rejects
/// blank names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Currency this person pays in (case-sensitive code).
    pub currency: String,
}

impl Participant {
    /// Creates a participant with a fresh id.
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Participant {
            id: ParticipantId::generate(),
            name: name.into(),
            currency: currency.into(),
        }
    }

    /// Creates an unnamed row, as added by the "Add Person" action.
    pub fn blank(currency: impl Into<String>) -> Self {
        Participant::new(String::new(), currency)
    }

    /// Checks whether the name is empty after trimming.
    #[inline]
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

// =============================================================================
// Currency Metadata
// =============================================================================

/// Reference data for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyMetadata {
    /// Currency code (e.g., "EUR").
    pub code: String,
    /// Display name (e.g., "Euro").
    pub name: String,
    /// Display symbol (e.g., "€").
    pub symbol: String,
}

impl CurrencyMetadata {
    /// Creates metadata with an explicit symbol.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        CurrencyMetadata {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Builds metadata from a provider's `(code, name)` pair.
    ///
    /// Providers carry no symbols, so the symbol comes from the static
    /// fallback table, or is the code itself when the code is unknown.
    pub fn from_code_name(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let symbol = fallback_symbol(&code).unwrap_or(code.as_str()).to_string();
        CurrencyMetadata {
            name: name.into(),
            symbol,
            code,
        }
    }
}

// =============================================================================
// Split Request
// =============================================================================

/// Input of one calculation, built from the current form state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    /// Total exactly as typed; parsed by the engine.
    pub total_amount: String,
    /// Currency the total is denominated in.
    pub base_currency: String,
    /// Participants in display order.
    pub participants: Vec<Participant>,
}

impl SplitRequest {
    pub fn new(
        total_amount: impl Into<String>,
        base_currency: impl Into<String>,
        participants: Vec<Participant>,
    ) -> Self {
        SplitRequest {
            total_amount: total_amount.into(),
            base_currency: base_currency.into(),
            participants,
        }
    }
}

// =============================================================================
// Split Result
// =============================================================================

/// One line of a split result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultPerson {
    pub name: String,
    pub currency: String,
    /// Share in `currency`, unrounded.
    pub amount: f64,
    pub symbol: String,
}

impl ResultPerson {
    /// Renders the amount as `<symbol><amount .2>`, e.g. `"€92.00"`.
    pub fn display_amount(&self) -> String {
        with_symbol(&self.symbol, &format_fixed(self.amount))
    }
}

/// Output of one successful calculation.
///
/// Immutable once produced; a later calculation replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    /// Parsed total, unrounded.
    pub total_amount: f64,
    pub base_currency: String,
    /// Symbol of `base_currency` at calculation time.
    pub base_symbol: String,
    /// Total divided by the participant count, before conversion.
    pub amount_per_person: f64,
    /// One entry per participant, in request order.
    pub people: Vec<ResultPerson>,
}

impl SplitResult {
    /// Number of ways the bill was split.
    #[inline]
    pub fn participant_count(&self) -> usize {
        self.people.len()
    }

    /// Renders the total as `<symbol><grouped natural digits>`, e.g. `"$1,500"`.
    pub fn display_total(&self) -> String {
        with_symbol(&self.base_symbol, &format_total(self.total_amount))
    }

    /// Renders the total as `<symbol><natural digits>` with no grouping, e.g.
    /// `"$1500"`. Used in export text.
    pub fn export_total(&self) -> String {
        with_symbol(&self.base_symbol, &self.total_amount.to_string())
    }

    /// Renders the unconverted share as `<symbol><amount .2>`.
    pub fn display_share(&self) -> String {
        with_symbol(&self.base_symbol, &format_fixed(self.amount_per_person))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_ids_are_unique() {
        let a = Participant::blank("USD");
        let b = Participant::blank("USD");
        assert_ne!(a.id, b.id);
        assert!(ParticipantId::parse(a.id.as_str()).is_ok());
    }

    #[test]
    fn test_participant_id_parse_rejects_garbage() {
        assert!(ParticipantId::parse("7").is_err());
        assert!(ParticipantId::parse("").is_err());
    }

    #[test]
    fn test_blank_name_detection() {
        assert!(Participant::blank("USD").has_blank_name());
        assert!(Participant::new("   ", "USD").has_blank_name());
        assert!(!Participant::new("Ada", "USD").has_blank_name());
    }

    #[test]
    fn test_metadata_symbol_from_fallback() {
        let euro = CurrencyMetadata::from_code_name("EUR", "Euro");
        assert_eq!(euro.symbol, "€");

        let franc = CurrencyMetadata::from_code_name("CHF", "Swiss Franc");
        assert_eq!(franc.symbol, "CHF");
    }

    #[test]
    fn test_result_display_helpers() {
        let result = SplitResult {
            total_amount: 1500.0,
            base_currency: "USD".to_string(),
            base_symbol: "$".to_string(),
            amount_per_person: 500.0,
            people: vec![ResultPerson {
                name: "Carol".to_string(),
                currency: "NGN".to_string(),
                amount: 820000.0,
                symbol: "₦".to_string(),
            }],
        };

        assert_eq!(result.display_total(), "$1,500");
        assert_eq!(result.export_total(), "$1500");
        assert_eq!(result.display_share(), "$500.00");
        assert_eq!(result.people[0].display_amount(), "₦820000.00");
        assert_eq!(result.participant_count(), 1);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = SplitResult {
            total_amount: 10.0,
            base_currency: "USD".to_string(),
            base_symbol: "$".to_string(),
            amount_per_person: 10.0,
            people: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["amountPerPerson"], 10.0);
        assert_eq!(json["baseCurrency"], "USD");
    }
}
