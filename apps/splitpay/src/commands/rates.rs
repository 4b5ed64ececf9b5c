//! # Rate Commands
//!
//! Explicit refreshes of the rate table and currency list.
//!
//! Nothing here runs on a timer: a refresh happens at startup, when the
//! base currency changes, or when the user asks for one.

use splitpay_core::validation::validate_currency_code;
use splitpay_core::{CurrencyMetadata, CurrencyTable, RateTable};
use tracing::{debug, info, warn};

use crate::error::{ApiError, RATES_UNAVAILABLE_MESSAGE};
use crate::provider::RateProvider;
use crate::state::{RatesState, RatesStatus};

/// Fetches rates for `base` and swaps them into the cache.
///
/// ## Behavior
/// - Success: the new table replaces the old one, `last_error` clears
/// - Failure: the old table stays, `last_error` holds the retry message
/// - Concurrent refreshes: whichever finishes last wins
///
/// ## Returns
/// Cache status after the refresh
pub async fn refresh_rates(
    rates: &RatesState,
    provider: &dyn RateProvider,
    base: &str,
) -> Result<RatesStatus, ApiError> {
    debug!(base = %base, "refresh_rates command");
    validate_currency_code(base).map_err(|e| ApiError::validation(e.to_string()))?;

    let outcome = {
        let _guard = rates.begin_refresh();
        match provider.fetch_rates(base).await {
            Ok(quoted) => rates
                .with_cache_mut(|c| c.set_rates(RateTable::new(base, quoted)))
                .map_err(ApiError::from),
            Err(e) => Err(ApiError::from(e)),
        }
    };

    match outcome {
        Ok(()) => {
            rates.set_last_error(None);
            let status = rates.status();
            info!(base = %base, count = status.rate_count, "Exchange rates refreshed");
            Ok(status)
        }
        Err(e) => {
            warn!(base = %base, "Keeping previous exchange rates");
            rates.set_last_error(Some(RATES_UNAVAILABLE_MESSAGE.to_string()));
            Err(e)
        }
    }
}

/// Fetches currency names and swaps them into the cache.
///
/// Failures leave the previous list in place and are not surfaced as a
/// form error; symbols keep resolving through the fallback table.
///
/// ## Returns
/// Number of known currencies
pub async fn refresh_currency_metadata(
    rates: &RatesState,
    provider: &dyn RateProvider,
) -> Result<usize, ApiError> {
    debug!("refresh_currency_metadata command");

    let pairs = provider.fetch_currencies().await?;
    let table = CurrencyTable::from_pairs(pairs);
    let count = table.len();

    rates.with_cache_mut(|c| c.set_metadata(table))?;
    info!(count, "Currency metadata refreshed");
    Ok(count)
}

/// Gets the cache status for the loading hint and error banner.
pub fn get_rates_status(rates: &RatesState) -> RatesStatus {
    rates.status()
}

/// Lists known currencies for the currency pickers, sorted by code.
pub fn list_currencies(rates: &RatesState) -> Vec<CurrencyMetadata> {
    rates.with_cache(|c| c.currencies().iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::provider::{RateSnapshot, StaticRateProvider};
    use std::collections::BTreeMap;

    fn provider() -> StaticRateProvider {
        StaticRateProvider::new(
            RateSnapshot::new(
                "USD",
                BTreeMap::from([("USD".to_string(), 1.0), ("EUR".to_string(), 0.92)]),
            )
            .with_currencies([("USD", "United States Dollar"), ("EUR", "Euro")]),
        )
    }

    #[tokio::test]
    async fn test_refresh_rates_replaces_table() {
        let rates = RatesState::default();
        let status = refresh_rates(&rates, &provider(), "USD").await.unwrap();

        assert_eq!(status.base_currency, "USD");
        assert!(!status.refreshing);
        assert_eq!(rates.with_cache(|c| c.rate("EUR")), Some(0.92));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_table() {
        let rates = RatesState::default();
        let provider = provider();
        refresh_rates(&rates, &provider, "USD").await.unwrap();

        provider.set_failing(true);
        let err = refresh_rates(&rates, &provider, "EUR").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RatesUnavailable);
        assert_eq!(err.message, RATES_UNAVAILABLE_MESSAGE);
        assert_eq!(rates.with_cache(|c| c.base_currency().to_string()), "USD");
        assert_eq!(rates.with_cache(|c| c.rate("EUR")), Some(0.92));
        assert_eq!(
            rates.last_error().as_deref(),
            Some(RATES_UNAVAILABLE_MESSAGE)
        );
        assert!(!rates.is_refreshing());

        provider.set_failing(false);
        refresh_rates(&rates, &provider, "USD").await.unwrap();
        assert!(rates.last_error().is_none());
    }

    #[tokio::test]
    async fn test_refresh_rejects_bad_base() {
        let rates = RatesState::default();
        let err = refresh_rates(&rates, &provider(), "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_metadata_refresh_and_failure() {
        let rates = RatesState::default();
        let provider = provider();

        let count = refresh_currency_metadata(&rates, &provider).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(list_currencies(&rates)[0].code, "EUR");

        provider.set_failing(true);
        assert!(refresh_currency_metadata(&rates, &provider).await.is_err());
        assert_eq!(list_currencies(&rates).len(), 2);
        assert_eq!(rates.with_cache(|c| c.resolve_symbol("EUR")), "€");
    }
}
