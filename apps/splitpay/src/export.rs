//! # Export Sinks
//!
//! Where result summaries go when the user copies or shares them.
//!
//! ## Share Fallback
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    share_results                                        │
//! │                                                                         │
//! │  summary_text(result) ──► share.deliver(title, text)                    │
//! │                               │                                         │
//! │                               ├── Ok ─────────────► Shared              │
//! │                               │                                         │
//! │                               ├── Unsupported ────► clipboard.deliver   │
//! │                               │                        └─► Copied       │
//! │                               │                                         │
//! │                               └── other error ────► returned            │
//! │                                                                         │
//! │  Both paths receive byte-identical text.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

/// Errors raised by export sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The platform has no such facility (e.g. no share sheet)
    #[error("Sharing is not supported on this platform")]
    Unsupported,

    #[error("Export failed: {0}")]
    Failed(String),

    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for exported summary text.
pub trait ExportSink: Send + Sync {
    /// Hands `text` to the sink. `title` is used by share sheets.
    fn deliver(&self, title: &str, text: &str) -> Result<(), ExportError>;
}

/// How an export was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportOutcome {
    Copied,
    Shared,
}

/// Tries `share`, falling back to `clipboard` when sharing is unsupported.
pub fn share_or_copy(
    share: &dyn ExportSink,
    clipboard: &dyn ExportSink,
    title: &str,
    text: &str,
) -> Result<ExportOutcome, ExportError> {
    match share.deliver(title, text) {
        Ok(()) => Ok(ExportOutcome::Shared),
        Err(ExportError::Unsupported) => {
            tracing::debug!("Share unsupported, copying instead");
            clipboard.deliver(title, text)?;
            Ok(ExportOutcome::Copied)
        }
        Err(e) => Err(e),
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Keeps the last delivered text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard::default()
    }

    /// Last text delivered, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExportSink for MemoryClipboard {
    fn deliver(&self, _title: &str, text: &str) -> Result<(), ExportError> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

/// Writes the text to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ExportSink for StdoutSink {
    fn deliver(&self, _title: &str, text: &str) -> Result<(), ExportError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}

/// A share sink for platforms without a share sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedShare;

impl ExportSink for UnsupportedShare {
    fn deliver(&self, _title: &str, _text: &str) -> Result<(), ExportError> {
        Err(ExportError::Unsupported)
    }
}
