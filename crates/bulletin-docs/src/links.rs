//! Pages referenced from section index pages.
//!
//! Scans every `index` page under the documentation root for markdown
//! links `[label](target)` and wiki links `[[target|label]]`, and resolves
//! each target to the repository path of the page it points at.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::layout::DocsLayout;

static MD_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\(([^)]+)\)").expect("Invalid markdown link regex"));

static WIKI_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("Invalid wiki link regex"));

/// Collect the existing pages linked from any index page under the docs root.
///
/// Returns repository-relative paths (e.g. `docs/guides/setup.md`).
pub fn referenced_pages(repo_root: &Path, layout: &DocsLayout) -> HashSet<String> {
    let mut referenced = HashSet::new();
    let docs_dir = repo_root.join(layout.root.trim_end_matches('/'));
    let index_name = format!("index{}", layout.suffix());

    for entry in WalkDir::new(&docs_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || entry.file_name().to_str() != Some(index_name.as_str()) {
            continue;
        }

        let Some(index_rel) = repo_relative(repo_root, path) else {
            continue;
        };

        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                continue;
            }
        };

        for target in link_targets(&content) {
            if let Some(page) = resolve_link(target, &index_rel, layout) {
                if repo_root.join(&page).is_file() {
                    referenced.insert(page);
                }
            }
        }
    }

    tracing::debug!("Found {} pages referenced from index pages", referenced.len());

    referenced
}

/// Raw targets of markdown and wiki links, in that order.
pub fn link_targets(content: &str) -> Vec<&str> {
    MD_LINK_RE
        .captures_iter(content)
        .chain(WIKI_LINK_RE.captures_iter(content))
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Resolve a link found in the index page `index_rel` to a page path.
///
/// Returns `None` for external links, empty targets, and targets that do
/// not land on a page under the docs root.
pub fn resolve_link(target: &str, index_rel: &str, layout: &DocsLayout) -> Option<String> {
    let mut link = target.trim();

    // Wiki link label: [[path|label]]
    if let Some((path, _)) = link.split_once('|') {
        link = path.trim();
    }
    if let Some((path, _)) = link.split_once('#') {
        link = path.trim();
    }

    if link.is_empty() || ["http://", "https://", "mailto:"].iter().any(|p| link.starts_with(p)) {
        return None;
    }

    let root = layout.root.trim_end_matches('/');
    let base_url = layout.base_url.trim_end_matches('/');

    // Site-absolute links resolve from the docs root.
    let (base_dir, link) = if let Some(rest) = link
        .strip_prefix(base_url)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        (root.to_string(), rest)
    } else {
        let parent = index_rel.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        (parent.to_string(), link)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in base_dir.split('/').chain(link.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }

    let mut page = segments.join("/");
    let suffix = layout.suffix();
    if !page.ends_with(&suffix) {
        page = format!("{}/index{}", page, suffix);
    }

    if page.starts_with(&layout.root_prefix()) {
        Some(page)
    } else {
        None
    }
}

/// `path` relative to `repo_root`, `/`-separated.
fn repo_relative(repo_root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(repo_root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}
