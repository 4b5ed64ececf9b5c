//! # Split Session
//!
//! One open bill: the state pieces, the config and a rate provider,
//! wired together for front ends that don't inject state themselves.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Startup                                   │
//! │                                                                         │
//! │  1. SplitSession::new(config, provider)                                 │
//! │     • roster = one blank row per configured currency                    │
//! │     • bill   = empty total, configured base                             │
//! │     • rates  = empty table for the configured base                      │
//! │                                                                         │
//! │  2. startup().await                                                     │
//! │     • refresh_currency_metadata()  (failure logged, fallback symbols)   │
//! │     • refresh_rates(base)          (failure shown, retry later)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use splitpay_core::ParticipantRoster;
use tracing::{info, warn};

use crate::commands::{self, RosterResponse, SplitResponse};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::export::{ExportOutcome, ExportSink};
use crate::provider::RateProvider;
use crate::state::{Bill, BillState, RatesState, RatesStatus, RosterState};

/// An open bill and everything it needs.
#[derive(Clone)]
pub struct SplitSession {
    config: AppConfig,
    provider: Arc<dyn RateProvider>,
    rates: RatesState,
    roster: RosterState,
    bill: BillState,
}

impl SplitSession {
    /// Creates a session in its startup state. No I/O happens here.
    pub fn new(config: AppConfig, provider: Arc<dyn RateProvider>) -> Self {
        SplitSession {
            rates: RatesState::new(&config.base_currency),
            roster: RosterState::new(config.initial_roster()),
            bill: BillState::new(config.base_currency.clone()),
            config,
            provider,
        }
    }

    /// Loads currency names and rates for the configured base.
    ///
    /// A metadata failure is only logged. A rate failure is returned so
    /// the caller can show the retry message; the session stays usable.
    pub async fn startup(&self) -> Result<RatesStatus, ApiError> {
        info!(base = %self.config.base_currency, "Starting split session");

        if let Err(e) = self.refresh_currency_metadata().await {
            warn!(error = %e, "Currency list unavailable, using fallback symbols");
        }

        let base = self.bill.base_currency();
        self.refresh_rates_for(&base).await
    }

    // =========================================================================
    // Rates
    // =========================================================================

    /// Refreshes rates for the form's current base currency.
    pub async fn refresh_rates(&self) -> Result<RatesStatus, ApiError> {
        let base = self.bill.base_currency();
        self.refresh_rates_for(&base).await
    }

    async fn refresh_rates_for(&self, base: &str) -> Result<RatesStatus, ApiError> {
        commands::refresh_rates(&self.rates, self.provider.as_ref(), base).await
    }

    pub async fn refresh_currency_metadata(&self) -> Result<usize, ApiError> {
        commands::refresh_currency_metadata(&self.rates, self.provider.as_ref()).await
    }

    pub fn rates_status(&self) -> RatesStatus {
        commands::get_rates_status(&self.rates)
    }

    // =========================================================================
    // Bill
    // =========================================================================

    pub fn set_total_amount(&self, total_amount: impl Into<String>) {
        commands::set_total_amount(&self.bill, total_amount.into());
    }

    pub async fn set_base_currency(&self, base_currency: &str) -> Result<RatesStatus, ApiError> {
        commands::set_base_currency(
            &self.bill,
            &self.rates,
            self.provider.as_ref(),
            base_currency,
        )
        .await
    }

    pub fn calculate(&self) -> Result<SplitResponse, ApiError> {
        commands::calculate_split(&self.bill, &self.roster, &self.rates)
    }

    pub fn bill(&self) -> Bill {
        commands::get_bill(&self.bill)
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn roster(&self) -> RosterResponse {
        commands::get_roster(&self.roster)
    }

    /// Replaces every row, e.g. with people loaded from a bill file.
    pub fn load_roster(&self, roster: ParticipantRoster) -> RosterResponse {
        self.roster.replace(roster);
        commands::get_roster(&self.roster)
    }

    pub fn add_participant(&self, currency: Option<String>) -> Result<RosterResponse, ApiError> {
        commands::add_participant(&self.roster, &self.config, currency)
    }

    pub fn rename_participant(
        &self,
        id: &str,
        name: impl Into<String>,
    ) -> Result<RosterResponse, ApiError> {
        commands::update_participant_name(&self.roster, id, name.into())
    }

    pub fn set_participant_currency(
        &self,
        id: &str,
        currency: &str,
    ) -> Result<RosterResponse, ApiError> {
        commands::update_participant_currency(&self.roster, id, currency)
    }

    pub fn remove_participant(&self, id: &str) -> Result<RosterResponse, ApiError> {
        commands::remove_participant(&self.roster, id)
    }

    // =========================================================================
    // Export
    // =========================================================================

    pub fn copy_results(&self, clipboard: &dyn ExportSink) -> Result<ExportOutcome, ApiError> {
        commands::copy_results(&self.bill, clipboard)
    }

    pub fn share_results(
        &self,
        share: &dyn ExportSink,
        clipboard: &dyn ExportSink,
    ) -> Result<ExportOutcome, ApiError> {
        commands::share_results(&self.bill, share, clipboard)
    }

    pub fn config(&self) -> AppConfig {
        commands::get_config(&self.config)
    }
}
