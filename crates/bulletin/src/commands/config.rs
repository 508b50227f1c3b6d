//! Configuration file (bulletin.toml) and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bulletin_banner::{BannerConfig, EmptyPolicy, RenderStyle};
use bulletin_docs::DocsLayout;
use bulletin_history::Window;
use serde::Deserialize;

use crate::WindowArgs;

/// Configuration file structure (bulletin.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    docs: DocsSection,
    #[serde(default)]
    history: HistorySection,
    #[serde(default)]
    banner: BannerSection,
}

#[derive(Debug, Deserialize)]
struct DocsSection {
    #[serde(flatten)]
    layout: DocsLayout,
    #[serde(default = "default_true")]
    existing_only: bool,
    #[serde(default)]
    require_index_link: bool,
}

#[derive(Debug, Deserialize)]
struct HistorySection {
    #[serde(default = "default_lookback_days")]
    lookback_days: u32,
    commits: Option<u32>,
    before: Option<String>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BannerSection {
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_max_items")]
    max_items: usize,
    #[serde(default)]
    style: RenderStyle,
    #[serde(default)]
    empty: EmptyPolicy,
    #[serde(default = "default_label")]
    label: String,
    #[serde(default = "default_date_format")]
    date_format: String,
}

fn default_true() -> bool {
    true
}
fn default_lookback_days() -> u32 {
    14
}
fn default_output() -> String {
    "docs/overrides/partials/announce.html".to_string()
}
fn default_max_items() -> usize {
    6
}
fn default_label() -> String {
    "What's new".to_string()
}
fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            layout: DocsLayout::default(),
            existing_only: true,
            require_index_link: false,
        }
    }
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            commits: None,
            before: None,
            after: None,
        }
    }
}

impl Default for BannerSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            max_items: default_max_items(),
            style: RenderStyle::default(),
            empty: EmptyPolicy::default(),
            label: default_label(),
            date_format: default_date_format(),
        }
    }
}

/// Values given on the command line, taking precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub window: WindowArgs,
    pub output: Option<PathBuf>,
    pub style: Option<RenderStyle>,
    pub max_items: Option<usize>,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = parse_config(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Parse the contents of a config file.
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

impl ConfigFile {
    /// Combine the file with command-line overrides into a builder config.
    pub fn into_banner_config(self, repo_root: &Path, overrides: Overrides) -> BannerConfig {
        let window = resolve_window(&self.history, overrides.window);

        BannerConfig {
            repo_root: repo_root.to_path_buf(),
            layout: self.docs.layout,
            window,
            output: overrides
                .output
                .unwrap_or_else(|| PathBuf::from(&self.banner.output)),
            max_items: overrides.max_items.unwrap_or(self.banner.max_items),
            style: overrides.style.unwrap_or(self.banner.style),
            empty: self.banner.empty,
            label: self.banner.label,
            date_format: self.banner.date_format,
            existing_only: self.docs.existing_only,
            require_index_link: self.docs.require_index_link,
        }
    }

    /// Documentation root, used to scope history queries.
    pub fn docs_root(&self) -> &str {
        self.docs.layout.root.trim_end_matches('/')
    }
}

/// Pick the window: a revision range when both ends are known, otherwise
/// a commit count or a number of days, command line before file.
fn resolve_window(history: &HistorySection, args: WindowArgs) -> Window {
    let days = args.days.unwrap_or(history.lookback_days);

    let before = revision(args.before).or_else(|| revision(history.before.clone()));
    let after = revision(args.after).or_else(|| revision(history.after.clone()));

    if let (Some(before), Some(after)) = (before, after) {
        return Window::Range {
            before,
            after,
            fallback_days: days,
        };
    }

    match (args.commits, args.days, history.commits) {
        (Some(count), _, _) => Window::Commits(count),
        (None, Some(days), _) => Window::Days(days),
        (None, None, Some(count)) => Window::Commits(count),
        (None, None, None) => Window::Days(history.lookback_days),
    }
}

/// Blank revisions (an unset CI variable) count as missing.
fn revision(rev: Option<String>) -> Option<String> {
    rev.filter(|r| !r.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = ConfigFile::default().into_banner_config(Path::new("."), Overrides::default());

        assert_eq!(config.window, Window::Days(14));
        assert_eq!(config.max_items, 6);
        assert_eq!(config.style, RenderStyle::Marquee);
        assert_eq!(config.empty, EmptyPolicy::Blank);
        assert_eq!(
            config.output,
            PathBuf::from("docs/overrides/partials/announce.html")
        );
        assert!(config.existing_only);
        assert!(!config.require_index_link);
        assert_eq!(config.layout, DocsLayout::default());
    }

    #[test]
    fn parses_full_file() {
        let file = parse_config(
            r#"
[docs]
root = "site"
base_url = "/runbook/"
exclude = ["site/drafts.md"]
require_index_link = true

[history]
lookback_days = 30

[banner]
output = "site/partials/banner.html"
max_items = 3
style = "list"
empty = "placeholder"
label = "Nouveautés"
"#,
        )
        .unwrap();

        assert_eq!(file.docs_root(), "site");

        let config = file.into_banner_config(Path::new("/repo"), Overrides::default());

        assert_eq!(config.layout.root, "site");
        assert_eq!(config.layout.extension, "md");
        assert_eq!(config.layout.base_url, "/runbook/");
        assert_eq!(config.layout.exclude, vec!["site/drafts.md".to_string()]);
        assert!(!config.layout.is_doc("site/overrides/main.md"));
        assert!(config.layout.is_doc("site/guide.md"));
        assert!(config.require_index_link);
        assert_eq!(config.window, Window::Days(30));
        assert_eq!(config.max_items, 3);
        assert_eq!(config.style, RenderStyle::List);
        assert_eq!(config.empty, EmptyPolicy::Placeholder);
        assert_eq!(config.label, "Nouveautés");
        assert_eq!(config.repo_root, PathBuf::from("/repo"));
    }

    #[test]
    fn rejects_malformed_file() {
        assert!(parse_config("[banner]\nmax_items = \"six\"\n").is_err());
        assert!(parse_config("[banner]\nstyle = \"ticker\"\n").is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let file = parse_config("[history]\nlookback_days = 30\n").unwrap();
        let overrides = Overrides {
            window: WindowArgs {
                days: Some(3),
                ..Default::default()
            },
            output: Some(PathBuf::from("out.html")),
            style: Some(RenderStyle::List),
            max_items: Some(2),
        };

        let config = file.into_banner_config(Path::new("."), overrides);

        assert_eq!(config.window, Window::Days(3));
        assert_eq!(config.output, PathBuf::from("out.html"));
        assert_eq!(config.style, RenderStyle::List);
        assert_eq!(config.max_items, 2);
    }

    #[test]
    fn revision_range_takes_precedence() {
        let window = resolve_window(
            &HistorySection::default(),
            WindowArgs {
                before: Some("abc".to_string()),
                after: Some("def".to_string()),
                commits: Some(5),
                ..Default::default()
            },
        );

        assert_eq!(
            window,
            Window::Range {
                before: "abc".to_string(),
                after: "def".to_string(),
                fallback_days: 14,
            }
        );
    }

    #[test]
    fn half_range_falls_back_to_days() {
        let window = resolve_window(
            &HistorySection::default(),
            WindowArgs {
                before: Some("abc".to_string()),
                after: Some("  ".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(window, Window::Days(14));
    }

    #[test]
    fn command_line_days_beat_file_commits() {
        let file = parse_config("[history]\ncommits = 20\n").unwrap();

        let window = resolve_window(
            &file.history,
            WindowArgs {
                days: Some(7),
                ..Default::default()
            },
        );

        assert_eq!(window, Window::Days(7));
    }

    #[test]
    fn commit_count_from_file() {
        let file = parse_config("[history]\ncommits = 20\n").unwrap();

        let window = resolve_window(&file.history, WindowArgs::default());

        assert_eq!(window, Window::Commits(20));
    }
}
