//! Where documentation pages live and how they map to site URLs.

use serde::Deserialize;

/// Layout of the documentation tree inside the repository.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DocsLayout {
    /// Documentation root, relative to the repository root
    #[serde(default = "default_root")]
    pub root: String,

    /// Page file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// URL prefix of the published site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Exact repository paths that are never pages
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Path prefixes that are never pages (templates, overrides).
    /// Unset means `<root>/overrides/`.
    #[serde(default)]
    pub exclude_prefixes: Option<Vec<String>>,
}

fn default_root() -> String {
    "docs".to_string()
}
fn default_extension() -> String {
    "md".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}

impl Default for DocsLayout {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            base_url: default_base_url(),
            exclude: Vec::new(),
            exclude_prefixes: None,
        }
    }
}

impl DocsLayout {
    /// Root with exactly one trailing `/` (e.g. "docs/").
    pub fn root_prefix(&self) -> String {
        format!("{}/", self.root.trim_end_matches('/'))
    }

    /// Extension with its leading dot (e.g. ".md").
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }

    /// Configured exclude prefixes, or the root's `overrides/` directory.
    pub fn excluded_prefixes(&self) -> Vec<String> {
        match &self.exclude_prefixes {
            Some(prefixes) => prefixes.clone(),
            None => vec![format!("{}overrides/", self.root_prefix())],
        }
    }

    /// Whether a repository path is a documentation page.
    ///
    /// Decided from the path string alone.
    pub fn is_doc(&self, path: &str) -> bool {
        let prefix = self.root_prefix();
        let suffix = self.suffix();

        path.len() > prefix.len() + suffix.len()
            && path.starts_with(&prefix)
            && path.ends_with(&suffix)
            && !self.exclude.iter().any(|p| p == path)
            && !self
                .excluded_prefixes()
                .iter()
                .any(|p| path.starts_with(p.as_str()))
    }

    /// Site path of a page relative to the site root.
    ///
    /// - `docs/index.md` -> `""` (the site root)
    /// - `docs/a/index.md` -> `a/`
    /// - `docs/a/b.md` -> `a/b/`
    pub fn page_path(&self, path: &str) -> String {
        let prefix = self.root_prefix();
        let suffix = self.suffix();

        let rel = path.strip_prefix(prefix.as_str()).unwrap_or(path);
        let rel = rel.strip_suffix(suffix.as_str()).unwrap_or(rel);

        if rel == "index" {
            String::new()
        } else if let Some(dir) = rel.strip_suffix("/index") {
            format!("{}/", dir)
        } else {
            format!("{}/", rel)
        }
    }

    /// Public URL of a page: the base URL followed by its site path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.page_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pages_under_root() {
        let layout = DocsLayout::default();

        assert!(layout.is_doc("docs/index.md"));
        assert!(layout.is_doc("docs/guides/setup.md"));
    }

    #[test]
    fn rejects_other_paths() {
        let layout = DocsLayout::default();

        assert!(!layout.is_doc("README.md"));
        assert!(!layout.is_doc("docs/image.png"));
        assert!(!layout.is_doc("docsy/page.md"));
        assert!(!layout.is_doc("src/docs/page.md"));
        assert!(!layout.is_doc("docs/.md"));
    }

    #[test]
    fn rejects_excluded_paths() {
        let layout = DocsLayout {
            exclude: vec!["docs/drafts.md".to_string()],
            ..Default::default()
        };

        assert!(!layout.is_doc("docs/drafts.md"));
        assert!(!layout.is_doc("docs/overrides/main.md"));
        assert!(layout.is_doc("docs/overrides.md"));
    }

    #[test]
    fn maps_pages_to_site_paths() {
        let layout = DocsLayout::default();

        assert_eq!(layout.page_path("docs/index.md"), "");
        assert_eq!(layout.page_path("docs/a/index.md"), "a/");
        assert_eq!(layout.page_path("docs/a/b.md"), "a/b/");
        assert_eq!(layout.page_path("docs/new-page.md"), "new-page/");
    }

    #[test]
    fn index_only_collapses_whole_segment() {
        let layout = DocsLayout::default();

        assert_eq!(layout.page_path("docs/a/reindex.md"), "a/reindex/");
        assert_eq!(layout.page_path("docs/index/b.md"), "index/b/");
    }

    #[test]
    fn prefixes_base_url() {
        let layout = DocsLayout {
            base_url: "/runbook/".to_string(),
            ..Default::default()
        };

        assert_eq!(layout.url_for("docs/index.md"), "/runbook/");
        assert_eq!(layout.url_for("docs/a/index.md"), "/runbook/a/");
        assert_eq!(layout.url_for("docs/a/b.md"), "/runbook/a/b/");

        assert_eq!(DocsLayout::default().url_for("docs/index.md"), "/");
    }

    #[test]
    fn honours_custom_root_and_extension() {
        let layout = DocsLayout {
            root: "site/content/".to_string(),
            extension: ".mdx".to_string(),
            exclude_prefixes: Some(vec![]),
            ..Default::default()
        };

        assert!(layout.is_doc("site/content/button.mdx"));
        assert!(!layout.is_doc("site/content/button.md"));
        assert_eq!(layout.page_path("site/content/button.mdx"), "button/");
    }

    #[test]
    fn overrides_follow_custom_root() {
        let layout = DocsLayout {
            root: "site".to_string(),
            ..Default::default()
        };

        assert!(!layout.is_doc("site/overrides/main.md"));
        assert!(layout.is_doc("site/guide.md"));
        assert!(layout.is_doc("site/docs/overrides/x.md"));
        assert!(!DocsLayout::default().is_doc("docs/overrides/partials/x.md"));
    }

    #[test]
    fn explicit_prefixes_replace_default() {
        let layout = DocsLayout {
            exclude_prefixes: Some(vec!["docs/drafts/".to_string()]),
            ..Default::default()
        };

        assert!(!layout.is_doc("docs/drafts/wip.md"));
        assert!(layout.is_doc("docs/overrides/page.md"));
    }
}
