//! # Commands Module
//!
//! All operations exposed to a front end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── bill.rs     ◄─── Total, base currency, calculate
//! ├── roster.rs   ◄─── Add / rename / re-currency / remove people
//! ├── rates.rs    ◄─── Rate + currency refreshes, status
//! ├── export.rs   ◄─── Copy / share the summary
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the roster
//! fn get_roster(roster: &RosterState)
//!
//! // Needs all three
//! fn calculate_split(bill: &BillState, roster: &RosterState, rates: &RatesState)
//!
//! // Async: talks to a provider
//! async fn refresh_rates(rates: &RatesState, provider: &dyn RateProvider, base: &str)
//! ```

pub mod bill;
pub mod config;
pub mod export;
pub mod rates;
pub mod roster;

pub use bill::{calculate_split, get_bill, set_base_currency, set_total_amount, SplitResponse};
pub use config::get_config;
pub use export::{copy_results, share_results};
pub use rates::{get_rates_status, list_currencies, refresh_currency_metadata, refresh_rates};
pub use roster::{
    add_participant, get_roster, remove_participant, update_participant_currency,
    update_participant_name, RosterResponse,
};
