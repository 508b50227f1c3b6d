//! Change history readers for bulletin.
//!
//! Turns version-control history into file-level change records for a
//! lookback window, either by running `git` or from a fixed list.

pub mod git;
pub mod memory;
pub mod parse;
pub mod record;
pub mod traits;

pub use git::GitHistory;
pub use memory::StaticHistory;
pub use parse::parse_name_status;
pub use record::{ChangeKind, ChangeRecord, Window};
pub use traits::{ChangeHistory, HistoryError};
