//! # splitpay-core: Pure Business Logic for SplitPay
//!
//! This crate is the **heart** of SplitPay. It splits a bill evenly between
//! participants and converts each share into the participant's own currency,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SplitPay Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Form UI (external)                           │   │
//! │  │    Amount ──► People rows ──► Calculate ──► Copy / Share        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/splitpay (session layer)                │   │
//! │  │    refresh_rates, calculate_split, add_participant, export      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ splitpay-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  rates  │ │  split  │ │ summary │ │ roster  │ │  money  │  │   │
//! │  │   │RateCache│ │ engine  │ │  text   │ │ people  │ │ format  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Participant, SplitRequest, SplitResult, ...)
//! - [`rates`] - Rate table cache and currency symbol resolution
//! - [`split`] - The split-and-convert engine
//! - [`summary`] - Plain-text export of a result
//! - [`roster`] - Ordered participant list keyed by stable ids
//! - [`money`] - Amount parsing and display formatting
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use splitpay_core::{calculate_split, Participant, RateCache, RateTable, SplitRequest};
//!
//! let mut cache = RateCache::new();
//! let rates = BTreeMap::from([("EUR".to_string(), 0.92)]);
//! cache.set_rates(RateTable::new("USD", rates)).unwrap();
//!
//! let request = SplitRequest::new(
//!     "200",
//!     "USD",
//!     vec![Participant::new("Alice", "USD"), Participant::new("Bob", "EUR")],
//! );
//! let result = calculate_split(&request, cache.rates(), cache.currencies()).unwrap();
//!
//! assert_eq!(result.amount_per_person, 100.0);
//! assert_eq!(result.people[1].display_amount(), "€92.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rates;
pub mod roster;
pub mod split;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, SplitError, ValidationError};
pub use rates::{fallback_symbol, CurrencyTable, RateCache, RateTable};
pub use roster::ParticipantRoster;
pub use split::{calculate_split, missing_rates};
pub use summary::{headline, summary_text, SHARE_TITLE};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Base currency used until the caller picks another one.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Currency given to a participant row added after startup.
pub const DEFAULT_PARTICIPANT_CURRENCY: &str = "USD";

/// Currencies of the rows a fresh roster starts with.
pub const INITIAL_PARTICIPANT_CURRENCIES: [&str; 3] = ["NGN", "USD", "GBP"];

/// Minimum number of participants a roster keeps.
pub const MIN_PARTICIPANTS: usize = 1;
