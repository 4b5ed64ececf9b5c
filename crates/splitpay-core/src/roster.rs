//! # Roster Module
//!
//! The ordered, owned list of people sharing a bill.
//!
//! ## Roster Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Roster Operations                                    │
//! │                                                                         │
//! │  UI Action               Roster Call             Effect                 │
//! │  ─────────               ───────────             ──────                 │
//! │                                                                         │
//! │  "Add Person" ─────────► add(currency) ────────► push blank row, new id │
//! │                                                                         │
//! │  Type a name ──────────► rename(id, name) ─────► row.name = name        │
//! │                                                                         │
//! │  Pick a currency ──────► set_currency(id, c) ──► row.currency = c       │
//! │                                                                         │
//! │  "−" button ───────────► remove(id) ───────────► row dropped, unless    │
//! │                                                  it is the last one     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Rows are addressed by [`ParticipantId`], never by index
//! - Insertion order is display order and result order
//! - At least [`MIN_PARTICIPANTS`] row always exists

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Participant, ParticipantId, SplitRequest};
use crate::validation::validate_currency_code;
use crate::{INITIAL_PARTICIPANT_CURRENCIES, MIN_PARTICIPANTS};

/// Participants of the bill being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantRoster {
    participants: Vec<Participant>,
}

impl ParticipantRoster {
    /// Creates the startup roster: one blank row per initial currency.
    pub fn new() -> Self {
        ParticipantRoster::with_currencies(INITIAL_PARTICIPANT_CURRENCIES)
    }

    /// Creates a roster with one blank row per currency.
    ///
    /// An empty iterator still yields one row, in the first fallback
    /// currency, so the minimum-size invariant holds from the start.
    pub fn with_currencies<C: Into<String>>(currencies: impl IntoIterator<Item = C>) -> Self {
        let mut participants: Vec<Participant> =
            currencies.into_iter().map(Participant::blank).collect();

        if participants.is_empty() {
            participants.push(Participant::blank(crate::DEFAULT_PARTICIPANT_CURRENCY));
        }

        ParticipantRoster { participants }
    }

    /// Creates a roster from existing rows, e.g. a bill loaded from disk.
    ///
    /// Every currency is validated. An empty list yields the same single
    /// blank row as [`ParticipantRoster::with_currencies`].
    pub fn from_participants(participants: Vec<Participant>) -> CoreResult<Self> {
        if participants.is_empty() {
            return Ok(ParticipantRoster::with_currencies(Vec::<String>::new()));
        }

        for participant in &participants {
            validate_currency_code(&participant.currency)?;
        }

        Ok(ParticipantRoster { participants })
    }

    /// Appends a blank row and returns its id.
    pub fn add(&mut self, currency: &str) -> CoreResult<ParticipantId> {
        validate_currency_code(currency)?;

        let participant = Participant::blank(currency);
        let id = participant.id.clone();
        self.participants.push(participant);
        Ok(id)
    }

    /// Changes a row's name. Blank names are accepted while editing.
    pub fn rename(&mut self, id: &ParticipantId, name: impl Into<String>) -> CoreResult<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Changes a row's currency.
    pub fn set_currency(&mut self, id: &ParticipantId, currency: &str) -> CoreResult<()> {
        validate_currency_code(currency)?;
        self.get_mut(id)?.currency = currency.to_string();
        Ok(())
    }

    /// Removes a row.
    ///
    /// ## Returns
    /// - `Ok(true)` when the row was removed
    /// - `Ok(false)` when it is the last row (no-op)
    /// - `Err(ParticipantNotFound)` when no row carries `id`
    pub fn remove(&mut self, id: &ParticipantId) -> CoreResult<bool> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CoreError::ParticipantNotFound(id.to_string()))?;

        if self.participants.len() <= MIN_PARTICIPANTS {
            return Ok(false);
        }

        self.participants.remove(index);
        Ok(true)
    }

    /// Looks up a row.
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Rows in display order.
    #[inline]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether the "remove" control should be offered.
    #[inline]
    pub fn can_remove(&self) -> bool {
        self.participants.len() > MIN_PARTICIPANTS
    }

    /// Snapshots the roster into a calculation request.
    pub fn to_request(
        &self,
        total_amount: impl Into<String>,
        base_currency: impl Into<String>,
    ) -> SplitRequest {
        SplitRequest::new(total_amount, base_currency, self.participants.clone())
    }

    fn get_mut(&mut self, id: &ParticipantId) -> CoreResult<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CoreError::ParticipantNotFound(id.to_string()))
    }
}

impl Default for ParticipantRoster {
    fn default() -> Self {
        ParticipantRoster::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
