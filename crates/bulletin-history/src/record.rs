//! Change records and lookback windows.

use chrono::NaiveDate;

/// Kind of change recorded for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    /// Renamed into this path; the old path is not reported
    Renamed,
}

impl ChangeKind {
    /// Parse a `--name-status` status field (`A`, `M`, `R100`, ...).
    ///
    /// Copies are reported as additions of the destination path.
    pub fn from_status(status: &str) -> Option<Self> {
        let mut chars = status.chars();
        let letter = chars.next()?;
        let score = chars.as_str();

        if !score.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        match letter {
            'A' | 'C' => Some(Self::Added),
            'M' | 'T' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            _ => None,
        }
    }

    /// Whether this status line carries a source and a destination path.
    pub fn is_two_path(status: &str) -> bool {
        matches!(status.chars().next(), Some('R' | 'C'))
    }
}

/// One file touched by one change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Repository-relative path, `/`-separated
    pub path: String,

    /// What happened to the file
    pub kind: ChangeKind,

    /// Commit date, when the reader knows it
    pub date: Option<NaiveDate>,
}

impl ChangeRecord {
    /// Create an undated record.
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            date: None,
        }
    }

    /// Attach a commit date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Span of history to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    /// Commits from the last `n` days
    Days(u32),

    /// The last `n` commits
    Commits(u32),

    /// Diff between two revisions, e.g. the before/after of a push.
    ///
    /// Falls back to a `fallback_days` scan when either revision
    /// does not resolve.
    Range {
        before: String,
        after: String,
        fallback_days: u32,
    },
}

impl Default for Window {
    fn default() -> Self {
        Self::Days(14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_letters() {
        assert_eq!(ChangeKind::from_status("A"), Some(ChangeKind::Added));
        assert_eq!(ChangeKind::from_status("M"), Some(ChangeKind::Modified));
        assert_eq!(ChangeKind::from_status("T"), Some(ChangeKind::Modified));
        assert_eq!(ChangeKind::from_status("D"), Some(ChangeKind::Deleted));
        assert_eq!(ChangeKind::from_status("R100"), Some(ChangeKind::Renamed));
        assert_eq!(ChangeKind::from_status("C075"), Some(ChangeKind::Added));
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!(ChangeKind::from_status(""), None);
        assert_eq!(ChangeKind::from_status("X"), None);
        assert_eq!(ChangeKind::from_status("Mx"), None);
        assert_eq!(ChangeKind::from_status("2026-01-01"), None);
    }

    #[test]
    fn default_window_is_two_weeks() {
        assert_eq!(Window::default(), Window::Days(14));
    }
}
