//! # Bill Commands
//!
//! The total, the base currency and the calculation itself.
//!
//! ## Calculate Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Calculate Split"                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  roster.to_request(total, base)          (rows cloned, locks released)  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  rates.with_cache(|c| calculate_split(&request, rates, currencies))     │
//! │        │                                                                │
//! │        ├── Ok(result)  ──► bill.result = Some(result), error cleared    │
//! │        │                                                                │
//! │        └── Err(e)      ──► bill.error = message, previous result kept   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use splitpay_core::validation::validate_currency_code;
use splitpay_core::{headline, missing_rates, SplitResult};
use tracing::{debug, info, warn};

use crate::commands::rates::refresh_rates;
use crate::error::ApiError;
use crate::provider::RateProvider;
use crate::state::{Bill, BillState, RatesState, RatesStatus, RosterState};

/// Calculation response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResponse {
    pub result: SplitResult,

    /// Grouped total with symbol, e.g. `"$1,234.5"`
    pub display_total: String,

    /// e.g. `"Split 3 ways = $100.00 each"`
    pub headline: String,
}

impl From<SplitResult> for SplitResponse {
    fn from(result: SplitResult) -> Self {
        SplitResponse {
            display_total: result.display_total(),
            headline: headline(&result),
            result,
        }
    }
}

/// Gets the form fields and the last result.
pub fn get_bill(bill: &BillState) -> Bill {
    bill.with_bill(Bill::clone)
}

/// Stores the raw total as typed. Parsing happens at calculation time.
pub fn set_total_amount(bill: &BillState, total_amount: String) {
    debug!("set_total_amount command");
    bill.with_bill_mut(|b| b.total_amount = total_amount);
}

/// Changes the base currency and refreshes rates for it.
///
/// The form keeps the new base even when the refresh fails; the cache
/// then still holds the previous base's table until a retry succeeds.
pub async fn set_base_currency(
    bill: &BillState,
    rates: &RatesState,
    provider: &dyn RateProvider,
    base_currency: &str,
) -> Result<RatesStatus, ApiError> {
    debug!(base = %base_currency, "set_base_currency command");
    validate_currency_code(base_currency).map_err(|e| ApiError::validation(e.to_string()))?;

    bill.with_bill_mut(|b| b.base_currency = base_currency.to_string());
    refresh_rates(rates, provider, base_currency).await
}

/// Runs a calculation over the current form and rates.
///
/// ## Returns
/// The new result, or the form error. On error the previous result
/// stays visible.
pub fn calculate_split(
    bill: &BillState,
    roster: &RosterState,
    rates: &RatesState,
) -> Result<SplitResponse, ApiError> {
    let (total_amount, base_currency) =
        bill.with_bill(|b| (b.total_amount.clone(), b.base_currency.clone()));
    let request = roster.with_roster(|r| r.to_request(total_amount, base_currency));
    debug!(
        participants = request.participants.len(),
        base = %request.base_currency,
        "calculate_split command"
    );

    let outcome = rates.with_cache(|c| {
        if c.base_currency() != request.base_currency {
            warn!(
                form_base = %request.base_currency,
                table_base = %c.base_currency(),
                "Rate table base differs from form base"
            );
        }

        let missing = missing_rates(&request, c.rates());
        if !missing.is_empty() {
            debug!(?missing, "No usable rate, showing unconverted share");
        }

        splitpay_core::calculate_split(&request, c.rates(), c.currencies())
    });

    match outcome {
        Ok(result) => {
            info!(
                total = result.total_amount,
                ways = result.participant_count(),
                "Split calculated"
            );
            bill.with_bill_mut(|b| {
                b.result = Some(result.clone());
                b.error = None;
            });
            Ok(SplitResponse::from(result))
        }
        Err(e) => {
            debug!(error = %e, "Split rejected");
            bill.with_bill_mut(|b| b.error = Some(e.to_string()));
            Err(ApiError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use splitpay_core::{ParticipantRoster, RateTable};
    use std::collections::BTreeMap;

    fn rates() -> RatesState {
        let state = RatesState::default();
        state
            .with_cache_mut(|c| {
                c.set_rates(RateTable::new(
                    "USD",
                    BTreeMap::from([("EUR".to_string(), 0.92), ("NGN".to_string(), 1640.0)]),
                ))
            })
            .unwrap();
        state
    }

    fn named_roster() -> RosterState {
        let roster = RosterState::new(ParticipantRoster::with_currencies(["USD", "EUR", "NGN"]));
        roster.with_roster_mut(|r| {
            let ids: Vec<_> = r.participants().iter().map(|p| p.id.clone()).collect();
            for (id, name) in ids.iter().zip(["Alice", "Bob", "Carol"]) {
                r.rename(id, name).unwrap();
            }
        });
        roster
    }

    #[test]
    fn test_calculate_stores_result() {
        let bill = BillState::default();
        set_total_amount(&bill, "300".to_string());

        let response = calculate_split(&bill, &named_roster(), &rates()).unwrap();

        assert_eq!(response.headline, "Split 3 ways = $100.00 each");
        assert_eq!(response.display_total, "$300");
        assert_eq!(response.result.people[2].display_amount(), "₦164000.00");
        assert_eq!(get_bill(&bill).result, Some(response.result));
    }

    #[test]
    fn test_failed_calculation_keeps_previous_result() {
        let bill = BillState::default();
        let roster = named_roster();
        let rates = rates();

        set_total_amount(&bill, "300".to_string());
        let first = calculate_split(&bill, &roster, &rates).unwrap();

        set_total_amount(&bill, "-5".to_string());
        let err = calculate_split(&bill, &roster, &rates).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidAmount);
        let current = get_bill(&bill);
        assert_eq!(current.result, Some(first.result));
        assert_eq!(
            current.error.as_deref(),
            Some("Please enter a valid total amount")
        );
    }

    #[test]
    fn test_success_clears_error() {
        let bill = BillState::default();
        let roster = RosterState::default();
        let rates = rates();

        set_total_amount(&bill, "90".to_string());
        let err = calculate_split(&bill, &roster, &rates).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingName);

        let ids: Vec<_> =
            roster.with_roster(|r| r.participants().iter().map(|p| p.id.clone()).collect());
        roster.with_roster_mut(|r| {
            for id in &ids {
                r.rename(id, "Someone").unwrap();
            }
        });

        calculate_split(&bill, &roster, &rates).unwrap();
        assert!(get_bill(&bill).error.is_none());
    }
}
