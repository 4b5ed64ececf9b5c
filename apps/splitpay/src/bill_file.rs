//! # Bill Files
//!
//! A bill described in JSON, for running a split without a UI.
//!
//! ```json
//! {
//!   "total": "300",
//!   "base": "USD",
//!   "people": [
//!     { "name": "Alice", "currency": "USD" },
//!     { "name": "Bob",   "currency": "EUR" }
//!   ]
//! }
//! ```
//!
//! `total` stays a string so it goes through the same parsing as typed
//! input. `base` is optional and defaults to the configured base.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splitpay_core::{CoreResult, Participant, ParticipantRoster};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillFileError {
    #[error("Failed to read bill file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed bill file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of a bill file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillPerson {
    pub name: String,
    pub currency: String,
}

/// A bill as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillFile {
    pub total: String,

    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub people: Vec<BillPerson>,
}

impl BillFile {
    pub async fn read(path: &Path) -> Result<Self, BillFileError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BillFileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, BillFileError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Rows in file order, each with a fresh id.
    pub fn roster(&self) -> CoreResult<ParticipantRoster> {
        ParticipantRoster::from_participants(
            self.people
                .iter()
                .map(|p| Participant::new(p.name.clone(), p.currency.clone()))
                .collect(),
        )
    }
}
