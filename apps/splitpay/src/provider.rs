//! # Rate Providers
//!
//! Sources of exchange rates and currency names.
//!
//! ## Provider Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RateProvider                                         │
//! │                                                                         │
//! │  fetch_rates("EUR")   ──► { "USD": 1.087, "GBP": 0.858, ... }           │
//! │                           1 EUR = rate units of each currency           │
//! │                                                                         │
//! │  fetch_currencies()   ──► [("EUR", "Euro"), ("USD", "US Dollar"), ...]  │
//! │                                                                         │
//! │  Failures are reported, never retried here. The caller keeps its        │
//! │  previous table and the user retries.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot File Format
//! ```json
//! {
//!   "base_code": "USD",
//!   "conversion_rates": { "USD": 1, "EUR": 0.92, "NGN": 1640 },
//!   "supported_codes": [["USD", "United States Dollar"], ["EUR", "Euro"]]
//! }
//! ```
//! A snapshot quoted against one base serves any other listed base by
//! cross-rate: `rate(new → X) = rate(base → X) / rate(base → new)`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by rate providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Rate source unavailable: {0}")]
    Unavailable(String),

    #[error("No rates quoted for base currency {0}")]
    UnknownBase(String),

    #[error("Failed to read rate snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed rate snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A source of exchange rates and currency metadata.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rates relative to `base`: one unit of `base` buys `rate` of each code.
    async fn fetch_rates(&self, base: &str) -> ProviderResult<BTreeMap<String, f64>>;

    /// `(code, display name)` pairs for every supported currency.
    async fn fetch_currencies(&self) -> ProviderResult<Vec<(String, String)>>;
}

// =============================================================================
// Snapshot
// =============================================================================

/// Rates quoted against a single base, plus currency names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    #[serde(rename = "base_code")]
    pub base: String,

    #[serde(rename = "conversion_rates")]
    pub rates: BTreeMap<String, f64>,

    #[serde(rename = "supported_codes", default)]
    pub currencies: Vec<(String, String)>,
}

impl RateSnapshot {
    pub fn new(base: impl Into<String>, rates: BTreeMap<String, f64>) -> Self {
        RateSnapshot {
            base: base.into(),
            rates,
            currencies: Vec::new(),
        }
    }

    /// Adds currency names.
    pub fn with_currencies<C, N>(mut self, pairs: impl IntoIterator<Item = (C, N)>) -> Self
    where
        C: Into<String>,
        N: Into<String>,
    {
        self.currencies = pairs
            .into_iter()
            .map(|(code, name)| (code.into(), name.into()))
            .collect();
        self
    }

    /// Rates relative to `base`, rebasing through a cross-rate if needed.
    ///
    /// ## Errors
    /// `UnknownBase` when `base` is neither the snapshot base nor a
    /// currency with a usable (finite, positive) rate.
    pub fn rates_for(&self, base: &str) -> ProviderResult<BTreeMap<String, f64>> {
        if base == self.base {
            return Ok(self.rates.clone());
        }

        let anchor = self
            .rates
            .get(base)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| ProviderError::UnknownBase(base.to_string()))?;

        debug!(from = %self.base, to = %base, "Rebasing rate snapshot");

        let mut rebased: BTreeMap<String, f64> = self
            .rates
            .iter()
            .map(|(code, rate)| (code.clone(), rate / anchor))
            .collect();
        rebased.insert(self.base.clone(), 1.0 / anchor);
        rebased.insert(base.to_string(), 1.0);
        Ok(rebased)
    }
}

// =============================================================================
// Static Provider
// =============================================================================

/// In-memory provider over a fixed snapshot.
///
/// Used for offline runs and tests. [`StaticRateProvider::set_failing`]
/// makes every fetch fail until cleared.
#[derive(Debug)]
pub struct StaticRateProvider {
    snapshot: RateSnapshot,
    failing: AtomicBool,
}

impl StaticRateProvider {
    pub fn new(snapshot: RateSnapshot) -> Self {
        StaticRateProvider {
            snapshot,
            failing: AtomicBool::new(false),
        }
    }

    /// Toggles simulated outages.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> ProviderResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_rates(&self, base: &str) -> ProviderResult<BTreeMap<String, f64>> {
        self.check_available()?;
        self.snapshot.rates_for(base)
    }

    async fn fetch_currencies(&self) -> ProviderResult<Vec<(String, String)>> {
        self.check_available()?;
        Ok(self.snapshot.currencies.clone())
    }
}

// =============================================================================
// Snapshot File Provider
// =============================================================================

/// Provider reading a JSON [`RateSnapshot`] from disk on every fetch.
///
/// Re-reading means a manual refresh picks up a file updated by some
/// other process.
#[derive(Debug, Clone)]
pub struct SnapshotFileProvider {
    path: PathBuf,
}

impl SnapshotFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFileProvider { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> ProviderResult<RateSnapshot> {
        debug!(path = ?self.path, "Reading rate snapshot");
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl RateProvider for SnapshotFileProvider {
    async fn fetch_rates(&self, base: &str) -> ProviderResult<BTreeMap<String, f64>> {
        self.read_snapshot().await?.rates_for(base)
    }

    async fn fetch_currencies(&self) -> ProviderResult<Vec<(String, String)>> {
        Ok(self.read_snapshot().await?.currencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_snapshot() -> RateSnapshot {
        RateSnapshot::new(
            "USD",
            BTreeMap::from([
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.5),
                ("NGN".to_string(), 1600.0),
                ("XXX".to_string(), 0.0),
            ]),
        )
        .with_currencies([("USD", "United States Dollar"), ("EUR", "Euro")])
    }

    #[test]
    fn test_rates_for_own_base() {
        let rates = usd_snapshot().rates_for("USD").unwrap();
        assert_eq!(rates["EUR"], 0.5);
    }

    #[test]
    fn test_rates_for_cross_base() {
        let rates = usd_snapshot().rates_for("EUR").unwrap();
        assert_eq!(rates["EUR"], 1.0);
        assert_eq!(rates["USD"], 2.0);
        assert_eq!(rates["NGN"], 3200.0);
    }

    #[test]
    fn test_rates_for_unknown_base() {
        let snapshot = usd_snapshot();
        assert!(matches!(
            snapshot.rates_for("JPY"),
            Err(ProviderError::UnknownBase(code)) if code == "JPY"
        ));
        assert!(matches!(
            snapshot.rates_for("XXX"),
            Err(ProviderError::UnknownBase(_))
        ));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "base_code": "USD",
            "conversion_rates": { "USD": 1, "EUR": 0.92 },
            "supported_codes": [["USD", "United States Dollar"], ["EUR", "Euro"]]
        }"#;
        let snapshot: RateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rates["EUR"], 0.92);
        assert_eq!(
            snapshot.currencies[1],
            ("EUR".to_string(), "Euro".to_string())
        );
    }

    #[tokio::test]
    async fn test_static_provider_outage() {
        let provider = StaticRateProvider::new(usd_snapshot());
        assert!(provider.fetch_rates("USD").await.is_ok());

        provider.set_failing(true);
        assert!(matches!(
            provider.fetch_rates("USD").await,
            Err(ProviderError::Unavailable(_))
        ));
        assert!(provider.fetch_currencies().await.is_err());

        provider.set_failing(false);
        assert_eq!(provider.fetch_currencies().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_file_provider_reads_and_reports_errors() {
        let dir = std::env::temp_dir().join(format!("splitpay-provider-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("rates.json");

        let provider = SnapshotFileProvider::new(&path);
        assert!(matches!(
            provider.fetch_rates("USD").await,
            Err(ProviderError::Io { .. })
        ));

        let json = serde_json::to_string(&usd_snapshot()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();
        assert_eq!(provider.fetch_rates("EUR").await.unwrap()["USD"], 2.0);
        assert_eq!(provider.fetch_currencies().await.unwrap().len(), 2);

        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(matches!(
            provider.fetch_currencies().await,
            Err(ProviderError::Parse(_))
        ));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
