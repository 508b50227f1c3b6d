//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'bulletin build' to generate the banner.");

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# Bulletin Configuration

[docs]
# Documentation root, relative to the repository
root = "docs"

# Page file extension
extension = "md"

# URL prefix of the published site
base_url = "/"

# Paths and path prefixes that are never announced
# (exclude_prefixes defaults to ["<root>/overrides/"])
exclude = []
# exclude_prefixes = ["docs/overrides/"]

# Skip pages that no longer exist
existing_only = true

# Only announce pages linked from an index page
require_index_link = false

[history]
# Days of history to scan (ANNOUNCE_LOOKBACK_DAYS overrides)
lookback_days = 14

# Scan the last N commits instead
# commits = 20

# Diff a revision range, e.g. a push's before/after
# before = "..."
# after = "..."

[banner]
# Fragment included by the site template
output = "docs/overrides/partials/announce.html"

# Entries per group (new, updated)
max_items = 6

# "marquee" or "list"
style = "marquee"

# "blank" writes an empty file when nothing changed, "placeholder" a notice
empty = "blank"

label = "What's new"
date_format = "%d/%m/%Y"
"#;
