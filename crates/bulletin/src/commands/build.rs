//! Banner build command.

use std::path::Path;

use anyhow::Result;
use bulletin_banner::AnnounceBuilder;
use bulletin_history::GitHistory;

use super::config::{load_config, Overrides};

/// Run the build command.
pub fn run(config_path: &Path, repo_root: &Path, overrides: Overrides) -> Result<()> {
    tracing::info!("Building announcement banner...");

    let file_config = load_config(&repo_root.join(config_path))?;
    let history = GitHistory::new(repo_root, file_config.docs_root());
    let config = file_config.into_banner_config(repo_root, overrides);

    tracing::debug!("Lookback window: {:?}", config.window);

    let today = chrono::Local::now().date_naive();
    let result = AnnounceBuilder::new(config, history).build(today)?;

    if result.bytes == 0 {
        tracing::info!("Nothing to announce, wrote empty banner");
    } else {
        tracing::info!(
            "Announced {} new and {} updated pages in {}ms",
            result.added,
            result.modified,
            result.duration_ms
        );
    }

    tracing::info!("Output: {}", result.output.display());

    Ok(())
}
