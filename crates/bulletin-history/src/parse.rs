//! Parser for `git log --name-status` / `git diff --name-status` output.

use chrono::NaiveDate;

use crate::record::{ChangeKind, ChangeRecord};

/// Format of the per-commit header line (`--pretty=format:%cs`).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse name-status output into change records.
///
/// A line holding only a date starts a new commit; every following
/// `STATUS\tpath` line is stamped with that date until the next one.
/// Diff output has no date lines, so its records stay undated.
/// Lines that fit neither shape are skipped.
pub fn parse_name_status(output: &str) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.contains('\t') {
            match NaiveDate::parse_from_str(line, DATE_FORMAT) {
                Ok(date) => current_date = Some(date),
                Err(_) => tracing::debug!("Skipping history line: {:?}", line),
            }
            continue;
        }

        match parse_status_line(line) {
            Some(mut record) => {
                record.date = current_date;
                records.push(record);
            }
            None => tracing::debug!("Skipping malformed status line: {:?}", line),
        }
    }

    records
}

/// Parse a single `STATUS\tpath` or `STATUS\told\tnew` line.
fn parse_status_line(line: &str) -> Option<ChangeRecord> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let status = *fields.first()?;
    let kind = ChangeKind::from_status(status)?;

    let path = if ChangeKind::is_two_path(status) {
        match fields.as_slice() {
            [_, _, new] => *new,
            _ => return None,
        }
    } else {
        match fields.as_slice() {
            [_, path] => *path,
            _ => return None,
        }
    };

    if path.is_empty() {
        return None;
    }

    Some(ChangeRecord::new(path, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn parses_dated_log() {
        let output = "2026-10-18\nA\tdocs/new-page.md\nM\tdocs/existing.md\n\n2026-10-10\nM\tdocs/new-page.md\n";

        let records = parse_name_status(output);

        assert_eq!(
            records,
            vec![
                ChangeRecord::new("docs/new-page.md", ChangeKind::Added).with_date(date("2026-10-18")),
                ChangeRecord::new("docs/existing.md", ChangeKind::Modified)
                    .with_date(date("2026-10-18")),
                ChangeRecord::new("docs/new-page.md", ChangeKind::Modified)
                    .with_date(date("2026-10-10")),
            ]
        );
    }

    #[test]
    fn parses_undated_diff() {
        let output = "A\tdocs/new-page.md\nM\tdocs/existing.md\nD\tdocs/gone.md\n";

        let records = parse_name_status(output);

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.date.is_none()));
        assert_eq!(records[2].kind, ChangeKind::Deleted);
    }

    #[test]
    fn renames_report_new_path_only() {
        let records = parse_name_status("R087\tdocs/old.md\tdocs/new.md\n");

        assert_eq!(records, vec![ChangeRecord::new("docs/new.md", ChangeKind::Renamed)]);
    }

    #[test]
    fn copies_are_additions_of_destination() {
        let records = parse_name_status("C100\tdocs/a.md\tdocs/b.md\n");

        assert_eq!(records, vec![ChangeRecord::new("docs/b.md", ChangeKind::Added)]);
    }

    #[test]
    fn skips_malformed_lines() {
        let output = "not a date\nZ\tdocs/x.md\nM\nR100\tdocs/only-one.md\nM\tdocs/a.md\textra\nM\tdocs/ok.md\n";

        let records = parse_name_status(output);

        assert_eq!(records, vec![ChangeRecord::new("docs/ok.md", ChangeKind::Modified)]);
    }

    #[test]
    fn handles_crlf_output() {
        let records = parse_name_status("2026-01-02\r\nA\tdocs/a.md\r\n");

        assert_eq!(
            records,
            vec![ChangeRecord::new("docs/a.md", ChangeKind::Added).with_date(date("2026-01-02"))]
        );
    }
}
