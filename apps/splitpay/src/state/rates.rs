//! # Rates State
//!
//! Holds the cached rate table and currency list between refreshes.
//!
//! ## Thread Safety
//! The cache is wrapped in `Arc<RwLock<T>>`:
//! 1. Calculations only read, and may run while a refresh is in flight
//! 2. A refresh swaps the table in one short write section
//! 3. The last refresh to finish wins
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Rate Refresh                                         │
//! │                                                                         │
//! │  begin_refresh() ──► in_flight += 1      (UI shows a loading hint)      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  provider.fetch_rates(base).await        (no lock held)                 │
//! │        │                                                                │
//! │        ├── Ok(table) ──► with_cache_mut(|c| c.set_rates(table))         │
//! │        │                 last_error = None                              │
//! │        │                                                                │
//! │        └── Err(e) ─────► last_error = Some(msg), old table kept         │
//! │                                                                         │
//! │  guard dropped ────► in_flight -= 1                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use splitpay_core::RateCache;

/// Snapshot of the rate cache for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesStatus {
    /// Base of the cached table
    pub base_currency: String,

    /// Number of listed rates
    pub rate_count: usize,

    /// Number of known currency names
    pub currency_count: usize,

    /// When the cached table was fetched
    pub fetched_at: DateTime<Utc>,

    /// Whether any refresh is still running
    pub refreshing: bool,

    /// Message from the most recent failed refresh, cleared on success
    pub last_error: Option<String>,
}

/// Rate cache state.
#[derive(Debug, Clone)]
pub struct RatesState {
    cache: Arc<RwLock<RateCache>>,
    last_error: Arc<RwLock<Option<String>>>,
    in_flight: Arc<AtomicUsize>,
}

impl RatesState {
    /// Creates an empty cache with `base` as its base currency.
    pub fn new(base: &str) -> Self {
        RatesState {
            cache: Arc::new(RwLock::new(RateCache::with_base(base))),
            last_error: Arc::new(RwLock::new(None)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Executes a function with read access to the cache.
    pub fn with_cache<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RateCache) -> R,
    {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        f(&cache)
    }

    /// Executes a function with write access to the cache.
    pub fn with_cache_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RateCache) -> R,
    {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }

    /// Marks a refresh as running until the returned guard is dropped.
    pub fn begin_refresh(&self) -> RefreshGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        RefreshGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Whether any refresh is running.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Records the outcome of a refresh.
    pub fn set_last_error(&self, message: Option<String>) {
        let mut last_error = self
            .last_error
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *last_error = message;
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Builds a display snapshot.
    pub fn status(&self) -> RatesStatus {
        let (base_currency, rate_count, currency_count, fetched_at) = self.with_cache(|c| {
            (
                c.base_currency().to_string(),
                c.rates().len(),
                c.currencies().len(),
                c.rates().fetched_at,
            )
        });

        RatesStatus {
            base_currency,
            rate_count,
            currency_count,
            fetched_at,
            refreshing: self.is_refreshing(),
            last_error: self.last_error(),
        }
    }
}

impl Default for RatesState {
    fn default() -> Self {
        RatesState::new(splitpay_core::DEFAULT_BASE_CURRENCY)
    }
}

/// Decrements the in-flight refresh count on drop.
#[derive(Debug)]
pub struct RefreshGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitpay_core::RateTable;
    use std::collections::BTreeMap;

    #[test]
    fn test_refresh_guard_tracks_in_flight() {
        let state = RatesState::default();
        assert!(!state.is_refreshing());

        let first = state.begin_refresh();
        let second = state.begin_refresh();
        assert!(state.is_refreshing());

        drop(first);
        assert!(state.is_refreshing());
        drop(second);
        assert!(!state.is_refreshing());
    }

    #[test]
    fn test_status_reflects_cache() {
        let state = RatesState::new("EUR");
        state
            .with_cache_mut(|c| {
                c.set_rates(RateTable::new(
                    "EUR",
                    BTreeMap::from([("USD".to_string(), 1.08)]),
                ))
            })
            .unwrap();
        state.set_last_error(Some("boom".to_string()));

        let status = state.status();
        assert_eq!(status.base_currency, "EUR");
        assert_eq!(status.rate_count, 1);
        assert_eq!(status.last_error.as_deref(), Some("boom"));
        assert!(!status.refreshing);
    }

    #[test]
    fn test_clones_share_the_cache() {
        let state = RatesState::default();
        let other = state.clone();
        other.set_last_error(Some("x".to_string()));
        assert_eq!(state.last_error().as_deref(), Some("x"));
    }
}
