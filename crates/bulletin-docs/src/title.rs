//! Page title resolution.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Resolve the display title of the page at `path` (repository-relative).
///
/// Uses the first top-level heading in the file. Missing or unreadable
/// files and files without a heading fall back to [`fallback_title`].
pub fn resolve_title(repo_root: &Path, path: &str) -> String {
    match fs::read(repo_root.join(path)) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            heading_title(&content).unwrap_or_else(|| fallback_title(path))
        }
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                tracing::debug!("{} not found, using filename title", path);
            } else {
                tracing::warn!("Failed to read {}: {}", path, e);
            }
            fallback_title(path)
        }
    }
}

/// Text of the first `# ` heading, ignoring fenced code blocks.
pub fn heading_title(content: &str) -> Option<String> {
    let mut fence: Option<&str> = None;

    for line in content.lines() {
        let line = line.trim();

        if let Some(marker) = fence {
            if line.starts_with(marker) {
                fence = None;
            }
            continue;
        }

        if line.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if line.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }

        if let Some(text) = line.strip_prefix("# ") {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    None
}

/// Title derived from the file name: `getting-started.md` -> "Getting Started".
pub fn fallback_title(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");

    stem.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_first_heading() {
        let content = "Intro text\n## Not this\n# New Page\n# Second\n";

        assert_eq!(heading_title(content), Some("New Page".to_string()));
    }

    #[test]
    fn trims_heading_text() {
        assert_eq!(
            heading_title("   #   Spaced Out   \n"),
            Some("Spaced Out".to_string())
        );
    }

    #[test]
    fn ignores_headings_in_code_fences() {
        let content = "```bash\n# install it\ncargo install bulletin\n```\n# Install\n";

        assert_eq!(heading_title(content), Some("Install".to_string()));
    }

    #[test]
    fn no_heading_yields_none() {
        assert_eq!(heading_title("#hashtag\n##Sub\n# \n"), None);
    }

    #[test]
    fn derives_fallback_from_filename() {
        assert_eq!(fallback_title("docs/getting-started.md"), "Getting Started");
        assert_eq!(fallback_title("docs/ops/disk_usage.md"), "Disk Usage");
        assert_eq!(fallback_title("docs/index.md"), "Index");
        assert_eq!(fallback_title("docs/API-keys.md"), "API Keys");
    }

    #[test]
    fn missing_file_falls_back() {
        let temp = tempdir().unwrap();

        assert_eq!(resolve_title(temp.path(), "docs/new-page.md"), "New Page");
    }

    #[test]
    fn resolves_from_file_and_is_stable() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(
            temp.path().join("docs/existing.md"),
            "---\nnav: true\n---\n\n# Existing Page\n\nBody.\n",
        )
        .unwrap();

        let first = resolve_title(temp.path(), "docs/existing.md");
        let second = resolve_title(temp.path(), "docs/existing.md");

        assert_eq!(first, "Existing Page");
        assert_eq!(first, second);
    }

    #[test]
    fn file_without_heading_falls_back() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/release-notes.md"), "Just text.\n").unwrap();

        assert_eq!(resolve_title(temp.path(), "docs/release-notes.md"), "Release Notes");
    }
}
