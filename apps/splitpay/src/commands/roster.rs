//! # Roster Commands
//!
//! Adding, editing and removing the people sharing the bill.
//!
//! Every command returns the whole roster so the UI can re-render the
//! rows in one pass.

use serde::Serialize;
use splitpay_core::{Participant, ParticipantId};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::RosterState;

/// Roster response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub participants: Vec<Participant>,

    /// Whether the "remove" control is offered on each row
    pub can_remove: bool,
}

fn snapshot(roster: &RosterState) -> RosterResponse {
    roster.with_roster(|r| RosterResponse {
        participants: r.participants().to_vec(),
        can_remove: r.can_remove(),
    })
}

fn parse_id(id: &str) -> Result<ParticipantId, ApiError> {
    ParticipantId::parse(id).map_err(|e| ApiError::validation(e.to_string()))
}

/// Gets the current rows.
pub fn get_roster(roster: &RosterState) -> RosterResponse {
    snapshot(roster)
}

/// Appends a blank row.
///
/// ## Arguments
/// * `currency` - Currency for the new row; defaults to the configured
///   new-participant currency
pub fn add_participant(
    roster: &RosterState,
    config: &AppConfig,
    currency: Option<String>,
) -> Result<RosterResponse, ApiError> {
    let currency = currency.unwrap_or_else(|| config.new_participant_currency.clone());
    debug!(currency = %currency, "add_participant command");

    roster.with_roster_mut(|r| r.add(&currency))?;
    Ok(snapshot(roster))
}

/// Renames a row. Blank names are accepted here and rejected at
/// calculation time.
pub fn update_participant_name(
    roster: &RosterState,
    id: &str,
    name: String,
) -> Result<RosterResponse, ApiError> {
    debug!(id = %id, "update_participant_name command");
    let id = parse_id(id)?;

    roster.with_roster_mut(|r| r.rename(&id, name))?;
    Ok(snapshot(roster))
}

/// Changes a row's currency.
pub fn update_participant_currency(
    roster: &RosterState,
    id: &str,
    currency: &str,
) -> Result<RosterResponse, ApiError> {
    debug!(id = %id, currency = %currency, "update_participant_currency command");
    let id = parse_id(id)?;

    roster.with_roster_mut(|r| r.set_currency(&id, currency))?;
    Ok(snapshot(roster))
}

/// Removes a row. Removing the last row is a no-op, not an error.
pub fn remove_participant(roster: &RosterState, id: &str) -> Result<RosterResponse, ApiError> {
    debug!(id = %id, "remove_participant command");
    let id = parse_id(id)?;

    let removed = roster.with_roster_mut(|r| r.remove(&id))?;
    if !removed {
        debug!("Kept last participant row");
    }
    Ok(snapshot(roster))
}
