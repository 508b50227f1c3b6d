//! Reduce change records to one reference per documentation page.

use std::collections::HashMap;

use bulletin_history::{ChangeKind, ChangeRecord};
use chrono::NaiveDate;

use crate::layout::DocsLayout;

/// How a page changed over the whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Added,
    Modified,
}

/// A documentation page that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Repository-relative page path
    pub path: String,

    /// Added if any record in the window added the page
    pub kind: DocKind,

    /// Date of the most recent change, when known
    pub date: Option<NaiveDate>,
}

/// Per-path accumulator.
struct PathState {
    first_seen: usize,
    latest: ChangeKind,
    date: Option<NaiveDate>,
    added: bool,
}

/// Filter `records` down to documentation pages, one per path.
///
/// For each path the most recent record governs: the largest date when
/// records are dated, otherwise the first one seen. A path whose governing
/// record is a deletion is dropped. A page added anywhere in the window is
/// reported as added even when later modified.
///
/// Results are ordered by date (newest first); undated pages and ties keep
/// first-seen order.
pub fn select_documents(records: &[ChangeRecord], layout: &DocsLayout) -> Vec<DocumentRef> {
    let mut states: HashMap<&str, PathState> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        if !layout.is_doc(&record.path) {
            tracing::debug!("Skipping non-page path {}", record.path);
            continue;
        }

        let state = states.entry(record.path.as_str()).or_insert(PathState {
            first_seen: index,
            latest: record.kind,
            date: record.date,
            added: false,
        });

        if is_newer(record.date, state.date) {
            state.latest = record.kind;
            state.date = record.date;
        }

        if record.kind == ChangeKind::Added {
            state.added = true;
        }
    }

    let mut selected: Vec<(usize, DocumentRef)> = states
        .into_iter()
        .filter(|(_, state)| state.latest != ChangeKind::Deleted)
        .map(|(path, state)| {
            let kind = if state.added {
                DocKind::Added
            } else {
                DocKind::Modified
            };
            (
                state.first_seen,
                DocumentRef {
                    path: path.to_string(),
                    kind,
                    date: state.date,
                },
            )
        })
        .collect();

    selected.sort_by(|(seen_a, a), (seen_b, b)| b.date.cmp(&a.date).then(seen_a.cmp(seen_b)));

    selected.into_iter().map(|(_, doc)| doc).collect()
}

/// Strictly newer: ties and undated records never replace the first seen.
fn is_newer(candidate: Option<NaiveDate>, current: Option<NaiveDate>) -> bool {
    match (candidate, current) {
        (Some(candidate), Some(current)) => candidate > current,
        (Some(_), None) => true,
        _ => false,
    }
}
