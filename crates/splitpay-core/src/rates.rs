//! # Rates Module
//!
//! The rate table cache: the latest exchange rates against one base currency,
//! the currency metadata list, and symbol resolution.
//!
//! ## Cache Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         RateCache                                       │
//! │                                                                         │
//! │  refresh OK ──► set_rates(table)  ──► table replaces the old one       │
//! │                 set_metadata(list)     (wholesale, never merged)        │
//! │                                                                         │
//! │  refresh delivered nothing ──► Err(EmptyRateTable / EmptyCurrencyList) │
//! │                                previous table stays in place           │
//! │                                                                         │
//! │  refresh failed ──► caller never calls set_* ──► previous table stays  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Symbol Resolution
//! ```text
//! resolve_symbol("EUR")
//!      │
//!      ├── in metadata?        → metadata symbol
//!      ├── in fallback table?  → fallback symbol ("€")
//!      └── otherwise           → the code itself ("EUR")
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::CurrencyMetadata;
use crate::DEFAULT_BASE_CURRENCY;

// =============================================================================
// Fallback Symbols
// =============================================================================

/// Symbols for well-known codes, used when metadata has no entry.
pub const FALLBACK_SYMBOLS: [(&str, &str); 10] = [
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("NGN", "₦"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("INR", "₹"),
    ("ZAR", "R"),
];

/// Looks up a code in the static fallback table.
pub fn fallback_symbol(code: &str) -> Option<&'static str> {
    FALLBACK_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, symbol)| *symbol)
}

// =============================================================================
// Rate Table
// =============================================================================

/// Exchange rates against one base currency.
///
/// `rates[code] = r` means 1 unit of `base` buys `r` units of `code`.
/// The base itself always has rate 1, whether listed or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    /// When the provider delivered this table.
    #[ts(as = "String")]
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Creates a table stamped with the current time.
    pub fn new(base: impl Into<String>, rates: BTreeMap<String, f64>) -> Self {
        RateTable {
            base: base.into(),
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Creates a table with no rates (only the implicit base rate).
    pub fn empty(base: impl Into<String>) -> Self {
        RateTable::new(base, BTreeMap::new())
    }

    /// Returns a usable rate for `code`.
    ///
    /// ## Rules
    /// - `code == base` → `Some(1.0)`
    /// - listed, finite and > 0 → `Some(rate)`
    /// - missing, zero, negative or NaN → `None`
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code == self.base {
            return Some(1.0);
        }

        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// Checks whether the provider listed any rates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Number of listed rates.
    #[inline]
    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

// =============================================================================
// Currency Table
// =============================================================================

/// Currency metadata keyed by code, one entry per code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyTable {
    currencies: BTreeMap<String, CurrencyMetadata>,
}

impl CurrencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        CurrencyTable::default()
    }

    /// Builds a table from metadata entries. A repeated code keeps its last
    /// entry.
    pub fn from_metadata(entries: impl IntoIterator<Item = CurrencyMetadata>) -> Self {
        let currencies = entries
            .into_iter()
            .map(|entry| (entry.code.clone(), entry))
            .collect();
        CurrencyTable { currencies }
    }

    /// Builds a table from a provider's `(code, name)` list.
    pub fn from_pairs<C, N>(pairs: impl IntoIterator<Item = (C, N)>) -> Self
    where
        C: Into<String>,
        N: Into<String>,
    {
        CurrencyTable::from_metadata(
            pairs
                .into_iter()
                .map(|(code, name)| CurrencyMetadata::from_code_name(code, name)),
        )
    }

    /// Returns the metadata for `code`.
    pub fn get(&self, code: &str) -> Option<&CurrencyMetadata> {
        self.currencies.get(code)
    }

    /// Iterates entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyMetadata> {
        self.currencies.values()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Resolves a display symbol. Never fails.
    ///
    /// ## Example
    /// ```rust
    /// use splitpay_core::rates::CurrencyTable;
    /// use splitpay_core::CurrencyMetadata;
    ///
    /// let usd = CurrencyMetadata::new("USD", "US Dollar", "US$");
    /// let table = CurrencyTable::from_metadata([usd]);
    /// assert_eq!(table.resolve_symbol("USD"), "US$");
    /// assert_eq!(table.resolve_symbol("GBP"), "£");
    /// assert_eq!(table.resolve_symbol("XYZ"), "XYZ");
    /// ```
    pub fn resolve_symbol(&self, code: &str) -> String {
        if let Some(metadata) = self.currencies.get(code) {
            return metadata.symbol.clone();
        }

        fallback_symbol(code).unwrap_or(code).to_string()
    }
}

// =============================================================================
// Rate Cache
// =============================================================================

/// Holds the most recent rate table and currency metadata.
///
/// ## Invariants
/// - Tables are replaced wholesale, never merged
/// - An empty incoming table is rejected and the previous one kept
/// - Lookups are case-sensitive
#[derive(Debug, Clone, PartialEq)]
pub struct RateCache {
    rates: RateTable,
    currencies: CurrencyTable,
}

impl RateCache {
    /// Creates a cache with no rates for the default base currency.
    pub fn new() -> Self {
        RateCache::with_base(DEFAULT_BASE_CURRENCY)
    }

    /// Creates a cache with no rates for `base`.
    pub fn with_base(base: impl Into<String>) -> Self {
        RateCache {
            rates: RateTable::empty(base),
            currencies: CurrencyTable::new(),
        }
    }

    /// Replaces the rate table.
    ///
    /// ## Errors
    /// `EmptyRateTable` when `table` lists no rates; the cache is unchanged.
    pub fn set_rates(&mut self, table: RateTable) -> CoreResult<()> {
        if table.is_empty() {
            return Err(CoreError::EmptyRateTable { base: table.base });
        }

        self.rates = table;
        Ok(())
    }

    /// Replaces the currency metadata.
    ///
    /// ## Errors
    /// `EmptyCurrencyList` when `currencies` is empty; the cache is unchanged.
    pub fn set_metadata(&mut self, currencies: CurrencyTable) -> CoreResult<()> {
        if currencies.is_empty() {
            return Err(CoreError::EmptyCurrencyList);
        }

        self.currencies = currencies;
        Ok(())
    }

    /// Resolves a display symbol. Never fails.
    pub fn resolve_symbol(&self, code: &str) -> String {
        self.currencies.resolve_symbol(code)
    }

    /// Usable rate for `code` in the current table.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.rate(code)
    }

    /// Metadata for `code`.
    pub fn currency(&self, code: &str) -> Option<&CurrencyMetadata> {
        self.currencies.get(code)
    }

    #[inline]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    #[inline]
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Base currency of the current table.
    #[inline]
    pub fn base_currency(&self) -> &str {
        &self.rates.base
    }

    /// Checks whether any refresh has succeeded yet.
    #[inline]
    pub fn has_rates(&self) -> bool {
        !self.rates.is_empty()
    }
}

impl Default for RateCache {
    fn default() -> Self {
        RateCache::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
