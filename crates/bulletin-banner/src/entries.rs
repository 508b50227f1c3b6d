//! Display entries and the announcement they make up.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    New,
    Updated,
}

/// A resolved page, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    /// Page title
    pub title: String,
    /// Public URL
    pub url: String,
    /// Formatted date of the latest change
    pub date: Option<String>,
    /// New or updated
    pub badge: Badge,
}

/// Entries grouped by badge, unique by URL and capped per group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub added: Vec<DisplayEntry>,
    pub modified: Vec<DisplayEntry>,
}

impl Announcement {
    /// Group `entries`, keeping their order within each group.
    ///
    /// Only the first entry per URL survives, with added entries taking
    /// precedence over modified ones. Each group is then cut to
    /// `max_items`.
    pub fn new(entries: impl IntoIterator<Item = DisplayEntry>, max_items: usize) -> Self {
        let (mut added, mut modified): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.badge == Badge::New);

        let mut seen = HashSet::new();
        added.retain(|e| seen.insert(e.url.clone()));
        modified.retain(|e| seen.insert(e.url.clone()));

        added.truncate(max_items);
        modified.truncate(max_items);

        Self { added, modified }
    }

    /// Whether there is nothing to announce.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty()
    }

    /// All entries, added first.
    pub fn items(&self) -> impl Iterator<Item = &DisplayEntry> {
        self.added.iter().chain(self.modified.iter())
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len()
    }
}

/// Banner layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Scrolling single-line ticker
    #[default]
    Marquee,
    /// Grouped lists with dates
    List,
}

impl RenderStyle {
    /// Template used for this style.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Marquee => "marquee.html",
            Self::List => "list.html",
        }
    }
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "marquee" => Ok(Self::Marquee),
            "list" => Ok(Self::List),
            other => Err(format!("unknown banner style '{}': expected 'marquee' or 'list'", other)),
        }
    }
}

/// What to write when there is nothing to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    /// Write an empty file
    #[default]
    Blank,
    /// Write a short "no updates" notice
    Placeholder,
}

impl FromStr for EmptyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(Self::Blank),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(format!(
                "unknown empty policy '{}': expected 'blank' or 'placeholder'",
                other
            )),
        }
    }
}
