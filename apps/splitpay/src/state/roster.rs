//! # Roster State
//!
//! Holds the participant rows being edited.
//!
//! ## Thread Safety
//! The roster is wrapped in `Arc<Mutex<T>>`: every edit is a short
//! exclusive section, and a calculation clones the rows before running.

use std::sync::{Arc, Mutex, PoisonError};

use splitpay_core::ParticipantRoster;

/// Participant roster state.
#[derive(Debug, Clone)]
pub struct RosterState {
    roster: Arc<Mutex<ParticipantRoster>>,
}

impl RosterState {
    /// Wraps an initial roster.
    pub fn new(roster: ParticipantRoster) -> Self {
        RosterState {
            roster: Arc::new(Mutex::new(roster)),
        }
    }

    /// Executes a function with read access to the roster.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = roster_state.with_roster(|r| r.len());
    /// ```
    pub fn with_roster<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ParticipantRoster) -> R,
    {
        let roster = self.roster.lock().unwrap_or_else(PoisonError::into_inner);
        f(&roster)
    }

    /// Executes a function with write access to the roster.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// roster_state.with_roster_mut(|r| r.add("EUR"))?;
    /// ```
    pub fn with_roster_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ParticipantRoster) -> R,
    {
        let mut roster = self.roster.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut roster)
    }

    /// Swaps in a whole roster, e.g. one loaded from a bill file.
    pub fn replace(&self, roster: ParticipantRoster) {
        self.with_roster_mut(|current| *current = roster);
    }
}

impl Default for RosterState {
    fn default() -> Self {
        RosterState::new(ParticipantRoster::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_roster_mut_edits_shared_state() {
        let state = RosterState::default();
        let other = state.clone();

        let id = other.with_roster_mut(|r| r.add("EUR")).unwrap();

        assert_eq!(state.with_roster(|r| r.len()), 4);
        assert!(state.with_roster(|r| r.get(&id).is_some()));
    }

    #[test]
    fn test_replace() {
        let state = RosterState::default();
        state.replace(ParticipantRoster::with_currencies(["JPY"]));
        let currency = state.with_roster(|r| r.participants()[0].currency.clone());
        assert_eq!(currency, "JPY");
    }
}
