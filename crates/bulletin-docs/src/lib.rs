//! Documentation page handling for bulletin.
//!
//! Decides which changed paths are documentation pages, collapses their
//! change records, and resolves each page's display title and site URL.

pub mod layout;
pub mod links;
pub mod select;
pub mod title;

pub use layout::DocsLayout;
pub use links::referenced_pages;
pub use select::{select_documents, DocKind, DocumentRef};
pub use title::{fallback_title, resolve_title};
