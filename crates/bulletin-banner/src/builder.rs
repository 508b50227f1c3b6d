//! Announcement banner builder.

use std::collections::HashSet;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use bulletin_docs::{
    referenced_pages, resolve_title, select_documents, DocKind, DocsLayout, DocumentRef,
};
use bulletin_history::{ChangeHistory, HistoryError, Window};

use crate::entries::{Announcement, Badge, DisplayEntry, EmptyPolicy, RenderStyle};
use crate::templates::{Context, TemplateEngine};

/// Configuration for building the banner.
#[derive(Debug, Clone)]
pub struct BannerConfig {
    /// Repository root; page paths and a relative output are resolved from it
    pub repo_root: PathBuf,

    /// Documentation tree layout
    pub layout: DocsLayout,

    /// History to scan
    pub window: Window,

    /// Output fragment path
    pub output: PathBuf,

    /// Maximum entries per group
    pub max_items: usize,

    /// Banner layout
    pub style: RenderStyle,

    /// Output when nothing changed
    pub empty: EmptyPolicy,

    /// Banner label
    pub label: String,

    /// `strftime` format for dates
    pub date_format: String,

    /// Drop pages that no longer exist on disk
    pub existing_only: bool,

    /// Keep only pages linked from an index page
    pub require_index_link: bool,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            layout: DocsLayout::default(),
            window: Window::default(),
            output: PathBuf::from("docs/overrides/partials/announce.html"),
            max_items: 6,
            style: RenderStyle::default(),
            empty: EmptyPolicy::default(),
            label: "What's new".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            existing_only: true,
            require_index_link: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of new pages announced
    pub added: usize,

    /// Number of updated pages announced
    pub modified: usize,

    /// Size of the written fragment in bytes
    pub bytes: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Written file
    pub output: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read history: {0}")]
    History(#[from] HistoryError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Builds the announcement banner from change history.
pub struct AnnounceBuilder<H> {
    config: BannerConfig,
    history: H,
    templates: TemplateEngine,
}

impl<H: ChangeHistory> AnnounceBuilder<H> {
    /// Create a new builder reading from `history`.
    pub fn new(config: BannerConfig, history: H) -> Self {
        Self {
            config,
            history,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the banner and write it to the output path.
    ///
    /// History failures abort before anything is written.
    pub fn build(&self, today: NaiveDate) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let announcement = self.collect()?;
        let html = self.render(&announcement, today)?;

        let output = self.output_path();
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&output, &html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", output.display(), e)))?;

        Ok(BuildResult {
            added: announcement.added.len(),
            modified: announcement.modified.len(),
            bytes: html.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output,
        })
    }

    /// Read history and resolve the entries to announce.
    pub fn collect(&self) -> Result<Announcement, BuildError> {
        let records = self.history.changes(&self.config.window)?;
        tracing::info!(
            "Read {} change records from {} history",
            records.len(),
            self.history.name()
        );

        let docs = self.filter_documents(select_documents(&records, &self.config.layout));
        tracing::info!("{} documentation pages changed", docs.len());

        let entries = docs.iter().map(|doc| self.display_entry(doc));

        Ok(Announcement::new(entries, self.config.max_items))
    }

    /// Render an announcement to an HTML fragment.
    ///
    /// An empty announcement renders according to the empty policy.
    pub fn render(&self, announcement: &Announcement, today: NaiveDate) -> Result<String, BuildError> {
        let today = format_date(today, &self.config.date_format);

        let rendered = if announcement.is_empty() {
            match self.config.empty {
                EmptyPolicy::Blank => Ok(String::new()),
                EmptyPolicy::Placeholder => self.templates.render_empty(&self.config.label, &today),
            }
        } else {
            self.templates.render_banner(
                self.config.style,
                &Context {
                    label: &self.config.label,
                    today: &today,
                    announcement,
                },
            )
        };

        rendered.map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))
    }

    /// Apply the filesystem-dependent page filters.
    fn filter_documents(&self, docs: Vec<DocumentRef>) -> Vec<DocumentRef> {
        let repo_root = &self.config.repo_root;

        let referenced: Option<HashSet<String>> = self
            .config
            .require_index_link
            .then(|| referenced_pages(repo_root, &self.config.layout));

        docs.into_iter()
            .filter(|doc| {
                if self.config.existing_only && !repo_root.join(&doc.path).is_file() {
                    tracing::debug!("Skipping {}: no longer exists", doc.path);
                    return false;
                }
                if let Some(referenced) = &referenced {
                    if !referenced.contains(&doc.path) {
                        tracing::debug!("Skipping {}: not linked from an index page", doc.path);
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Resolve a page's title and URL.
    fn display_entry(&self, doc: &DocumentRef) -> DisplayEntry {
        DisplayEntry {
            title: resolve_title(&self.config.repo_root, &doc.path),
            url: self.config.layout.url_for(&doc.path),
            date: doc.date.map(|d| format_date(d, &self.config.date_format)),
            badge: match doc.kind {
                DocKind::Added => Badge::New,
                DocKind::Modified => Badge::Updated,
            },
        }
    }

    /// Output path, resolved against the repository root when relative.
    fn output_path(&self) -> PathBuf {
        self.config.repo_root.join(&self.config.output)
    }
}

/// Format `date` with a `strftime` pattern, falling back to ISO 8601 when
/// the pattern is invalid.
fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        tracing::warn!("Invalid date format {:?}, using ISO 8601", format);
        return date.to_string();
    }
    out
}
