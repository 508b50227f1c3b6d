//! Announcement banner generator for bulletin.
//!
//! Builds a small HTML fragment listing recently added and updated
//! documentation pages, ready to include in a site template.

pub mod builder;
pub mod entries;
pub mod templates;

pub use builder::{AnnounceBuilder, BannerConfig, BuildError, BuildResult};
pub use entries::{Announcement, Badge, DisplayEntry, EmptyPolicy, RenderStyle};
