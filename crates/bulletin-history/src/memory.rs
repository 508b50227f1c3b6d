//! In-memory history provider.

use crate::record::{ChangeRecord, Window};
use crate::traits::{ChangeHistory, HistoryError};

/// A fixed list of change records.
///
/// The window is ignored: the records are taken to be exactly the
/// changes inside it. Useful for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    records: Vec<ChangeRecord>,
}

impl StaticHistory {
    /// Create a provider returning `records` in the given order.
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        Self { records }
    }
}

impl ChangeHistory for StaticHistory {
    fn name(&self) -> &'static str {
        "static"
    }

    fn changes(&self, _window: &Window) -> Result<Vec<ChangeRecord>, HistoryError> {
        Ok(self.records.clone())
    }
}
