//! # SplitPay Session Library
//!
//! The stateful layer around `splitpay-core`: rate refreshes, the roster
//! being edited, the last result, and where exports go.
//!
//! ## Module Organization
//! ```text
//! splitpay_app/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── config.rs       ◄─── AppConfig: defaults, TOML file, env overrides
//! ├── error.rs        ◄─── ApiError returned by every command
//! ├── provider.rs     ◄─── RateProvider trait, static + snapshot providers
//! ├── export.rs       ◄─── ExportSink trait, share → copy fallback
//! ├── bill_file.rs    ◄─── JSON bill files for the CLI
//! ├── session.rs      ◄─── SplitSession: all state + a provider
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── rates.rs    ◄─── Rate cache + refresh tracking
//! │   ├── roster.rs   ◄─── Participant rows
//! │   └── bill.rs     ◄─── Total, base, last result
//! └── commands/
//!     ├── mod.rs      ◄─── Command exports
//!     ├── bill.rs     ◄─── calculate_split, set_base_currency
//!     ├── roster.rs   ◄─── add / rename / remove participants
//!     ├── rates.rs    ◄─── refresh_rates, refresh_currency_metadata
//!     ├── export.rs   ◄─── copy_results, share_results
//!     └── config.rs   ◄─── get_config
//! ```
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rate fetches are the only I/O. They run without holding any lock and  │
//! │  swap their table in at the end, so a calculation started during a    │
//! │  refresh sees either the old table or the new one, never a mix.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bill_file;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod provider;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use session::SplitSession;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,splitpay=debug,splitpay_app=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=splitpay_app=trace` - Trace the session layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so exported text on stdout stays clean.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
