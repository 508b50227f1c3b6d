//! History provider backed by the `git` command line.

use std::path::PathBuf;
use std::process::Command;

use crate::parse::parse_name_status;
use crate::record::{ChangeRecord, Window};
use crate::traits::{ChangeHistory, HistoryError};

/// A git invocation to run for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `git diff --name-status` between two resolved revisions
    Diff { before: String, after: String },

    /// `git log --name-status`, bounded by `--since` or `-n`
    Log { bound: LogBound },
}

/// Bound applied to a log scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBound {
    Days(u32),
    Commits(u32),
}

impl Query {
    /// Pick the query for `window`, using `resolves` to check revisions.
    pub fn plan(window: &Window, resolves: impl Fn(&str) -> bool) -> Self {
        match window {
            Window::Days(days) => Self::Log {
                bound: LogBound::Days(*days),
            },
            Window::Commits(count) => Self::Log {
                bound: LogBound::Commits(*count),
            },
            Window::Range {
                before,
                after,
                fallback_days,
            } => {
                if resolves(before) && resolves(after) {
                    Self::Diff {
                        before: before.clone(),
                        after: after.clone(),
                    }
                } else {
                    tracing::info!(
                        "Revision range {}..{} does not resolve, scanning last {} days",
                        before,
                        after,
                        fallback_days
                    );
                    Self::Log {
                        bound: LogBound::Days(*fallback_days),
                    }
                }
            }
        }
    }

    /// Arguments passed to git, restricted to `pathspec`.
    pub fn args(&self, pathspec: &str) -> Vec<String> {
        let mut args: Vec<String> = vec!["-c".into(), "core.quotePath=false".into()];

        match self {
            Self::Diff { before, after } => {
                args.extend([
                    "diff".into(),
                    "--name-status".into(),
                    "-M".into(),
                    before.clone(),
                    after.clone(),
                ]);
            }
            Self::Log { bound } => {
                args.push("log".into());
                match bound {
                    LogBound::Days(days) => args.push(format!("--since={} days ago", days)),
                    LogBound::Commits(count) => args.push(format!("-n{}", count)),
                }
                args.extend([
                    "--name-status".into(),
                    "-M".into(),
                    "--pretty=format:%cs".into(),
                ]);
            }
        }

        args.extend(["--".into(), pathspec.to_string()]);
        args
    }
}

/// Reads change records by running `git` in a repository.
#[derive(Debug, Clone)]
pub struct GitHistory {
    repo_root: PathBuf,
    pathspec: String,
}

impl GitHistory {
    /// Create a provider for `repo_root`, limited to `pathspec` (e.g. "docs").
    pub fn new(repo_root: impl Into<PathBuf>, pathspec: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            pathspec: pathspec.into(),
        }
    }

    /// Check that `rev` names a commit in this repository.
    pub fn resolves(&self, rev: &str) -> bool {
        if is_null_revision(rev) {
            return false;
        }

        Command::new("git")
            .args(["rev-parse", "--verify", "--quiet"])
            .arg(format!("{}^{{commit}}", rev))
            .current_dir(&self.repo_root)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run git with `args` and return its stdout.
    fn run(&self, args: &[String]) -> Result<String, HistoryError> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("Running {}", command);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|source| HistoryError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HistoryError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ChangeHistory for GitHistory {
    fn name(&self) -> &'static str {
        "git"
    }

    fn changes(&self, window: &Window) -> Result<Vec<ChangeRecord>, HistoryError> {
        let query = Query::plan(window, |rev| self.resolves(rev));
        let stdout = self.run(&query.args(&self.pathspec))?;

        Ok(parse_name_status(&stdout))
    }
}

/// Empty or all-zero revisions (a branch's first push) never resolve.
fn is_null_revision(rev: &str) -> bool {
    let rev = rev.trim();
    rev.is_empty() || rev.chars().all(|c| c == '0')
}
