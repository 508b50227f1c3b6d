//! Print the entries a build would announce.

use std::path::Path;

use anyhow::{Context, Result};
use bulletin_banner::AnnounceBuilder;
use bulletin_history::GitHistory;

use super::config::{load_config, Overrides};

/// Run the preview command.
pub fn run(config_path: &Path, repo_root: &Path, overrides: Overrides) -> Result<()> {
    let file_config = load_config(&repo_root.join(config_path))?;
    let history = GitHistory::new(repo_root, file_config.docs_root());
    let config = file_config.into_banner_config(repo_root, overrides);

    let announcement = AnnounceBuilder::new(config, history).collect()?;

    let json = serde_json::to_string_pretty(&announcement)
        .context("Failed to serialize announcement")?;
    println!("{}", json);

    Ok(())
}
