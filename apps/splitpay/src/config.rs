//! # Application Configuration
//!
//! Startup defaults for the split form and where rate snapshots live.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SPLITPAY_BASE_CURRENCY=EUR                                         │
//! │     SPLITPAY_NEW_PARTICIPANT_CURRENCY=EUR                              │
//! │     SPLITPAY_SNAPSHOT_PATH=/data/rates.json                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $SPLITPAY_CONFIG, or                                               │
//! │     ~/.config/splitpay/splitpay.toml (Linux)                           │
//! │     ~/Library/Application Support/com.splitpay.splitpay/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     base USD, rows [NGN, USD, GBP], new rows in USD                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # splitpay.toml
//! base_currency = "USD"
//! initial_currencies = ["NGN", "USD", "GBP"]
//! new_participant_currency = "USD"
//! snapshot_path = "/home/me/.local/share/splitpay/rates.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splitpay_core::validation::validate_currency_code;
use splitpay_core::{
    ParticipantRoster, ValidationError, DEFAULT_BASE_CURRENCY, DEFAULT_PARTICIPANT_CURRENCY,
    INITIAL_PARTICIPANT_CURRENCIES,
};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SPLITPAY_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {setting}: {source}")]
    Invalid {
        setting: &'static str,
        #[source]
        source: ValidationError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency the bill total is entered in at startup
    pub base_currency: String,

    /// One blank row is created per entry at startup
    pub initial_currencies: Vec<String>,

    /// Currency given to rows added with "Add Person"
    pub new_participant_currency: String,

    /// JSON rate snapshot read by the file provider
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            initial_currencies: INITIAL_PARTICIPANT_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            new_participant_currency: DEFAULT_PARTICIPANT_CURRENCY.to_string(),
            snapshot_path: None,
        }
    }
}

fn invalid(setting: &'static str) -> impl Fn(ValidationError) -> ConfigError {
    move |source| ConfigError::Invalid { setting, source }
}

impl AppConfig {
    /// Loads configuration: file (if any), then environment overrides.
    ///
    /// `config_path` wins over `SPLITPAY_CONFIG`, which wins over the
    /// platform config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML; absent keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SPLITPAY_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("SPLITPAY_BASE_CURRENCY") {
            debug!(base = %base, "Overriding base currency from environment");
            self.base_currency = base;
        }

        if let Some(currency) = lookup("SPLITPAY_NEW_PARTICIPANT_CURRENCY") {
            self.new_participant_currency = currency;
        }

        if let Some(path) = lookup("SPLITPAY_SNAPSHOT_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Checks every configured currency code.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_currency_code(&self.base_currency).map_err(invalid("base_currency"))?;
        validate_currency_code(&self.new_participant_currency)
            .map_err(invalid("new_participant_currency"))?;
        for code in &self.initial_currencies {
            validate_currency_code(code).map_err(invalid("initial_currencies"))?;
        }
        Ok(())
    }

    /// Builds the startup roster.
    pub fn initial_roster(&self) -> ParticipantRoster {
        ParticipantRoster::with_currencies(self.initial_currencies.iter().cloned())
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "splitpay", "splitpay")
            .map(|dirs| dirs.config_dir().join("splitpay.toml"))
    }
}
