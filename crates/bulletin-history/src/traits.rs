//! Trait definitions for change history providers.

use crate::record::{ChangeRecord, Window};

/// Errors that can occur while reading history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// Source of file-level change records.
pub trait ChangeHistory {
    /// Provider identifier (e.g., "git")
    fn name(&self) -> &'static str;

    /// Return the change records inside `window`, newest first where
    /// the provider knows the order.
    fn changes(&self, window: &Window) -> Result<Vec<ChangeRecord>, HistoryError>;
}
