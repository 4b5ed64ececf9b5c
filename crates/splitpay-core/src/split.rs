//! # Split Engine
//!
//! Validates a [`SplitRequest`] and computes a [`SplitResult`].
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_split(request, rates, currencies)                            │
//! │                                                                         │
//! │  1. total = parse(request.total_amount)      ──► InvalidAmount          │
//! │  2. every name non-blank                     ──► MissingName            │
//! │  3. share = total / participant count        (no pre-rounding)          │
//! │  4. for each participant, in order:                                     │
//! │       currency == base      → share                                     │
//! │       usable rate r         → share × r                                 │
//! │       no usable rate        → share          (stale-rate fallback)      │
//! │       symbol = resolve_symbol(currency)                                 │
//! │  5. SplitResult { people in request order }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is stateless and reads its inputs without mutating them, so
//! identical inputs always produce an identical result.

use crate::error::SplitError;
use crate::rates::{CurrencyTable, RateTable};
use crate::types::{Participant, ResultPerson, SplitRequest, SplitResult};
use crate::validation::{validate_participant_name, validate_total_amount};

/// Splits the bill evenly and converts each share.
///
/// ## Errors
/// - [`SplitError::InvalidAmount`] when the total is blank, non-numeric,
///   non-finite, zero or negative (checked first)
/// - [`SplitError::MissingName`] when any name is blank
/// - [`SplitError::NoParticipants`] when the request has no participants
///
/// ## Example
/// ```rust
/// use std::collections::BTreeMap;
/// use splitpay_core::rates::{CurrencyTable, RateTable};
/// use splitpay_core::{calculate_split, Participant, SplitRequest};
///
/// let rates = RateTable::new(
///     "USD",
///     BTreeMap::from([("EUR".to_string(), 0.92), ("NGN".to_string(), 1640.0)]),
/// );
/// let request = SplitRequest::new(
///     "300",
///     "USD",
///     vec![
///         Participant::new("Alice", "USD"),
///         Participant::new("Bob", "EUR"),
///         Participant::new("Carol", "NGN"),
///     ],
/// );
///
/// let result = calculate_split(&request, &rates, &CurrencyTable::new()).unwrap();
/// let shown: Vec<String> = result.people.iter().map(|p| p.display_amount()).collect();
/// assert_eq!(shown, ["$100.00", "€92.00", "₦164000.00"]);
/// ```
pub fn calculate_split(
    request: &SplitRequest,
    rates: &RateTable,
    currencies: &CurrencyTable,
) -> Result<SplitResult, SplitError> {
    let total_amount =
        validate_total_amount(&request.total_amount).map_err(|_| SplitError::InvalidAmount)?;

    if request
        .participants
        .iter()
        .any(|p| validate_participant_name(&p.name).is_err())
    {
        return Err(SplitError::MissingName);
    }

    if request.participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let amount_per_person = total_amount / request.participants.len() as f64;

    let people = request
        .participants
        .iter()
        .map(|participant| ResultPerson {
            name: participant.name.clone(),
            currency: participant.currency.clone(),
            amount: convert_share(
                amount_per_person,
                &request.base_currency,
                &participant.currency,
                rates,
            ),
            symbol: currencies.resolve_symbol(&participant.currency),
        })
        .collect();

    Ok(SplitResult {
        total_amount,
        base_currency: request.base_currency.clone(),
        base_symbol: currencies.resolve_symbol(&request.base_currency),
        amount_per_person,
        people,
    })
}

/// Converts one share from `base` into `currency`.
///
/// Falls back to the unconverted share when no usable rate exists.
pub fn convert_share(share: f64, base: &str, currency: &str, rates: &RateTable) -> f64 {
    if currency == base {
        return share;
    }

    match rates.rate(currency) {
        Some(rate) => share * rate,
        None => share,
    }
}

/// Currencies in `request` that will fall back to the unconverted share.
///
/// Each code is listed once, in first-appearance order.
pub fn missing_rates(request: &SplitRequest, rates: &RateTable) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();

    for Participant { currency, .. } in &request.participants {
        if currency == &request.base_currency || rates.rate(currency).is_some() {
            continue;
        }
        if !missing.contains(currency) {
            missing.push(currency.clone());
        }
    }

    missing
}

// =============================================================================
// Unit Tests
// =============================================================================
