//! Site search - forward full-text search over accommodations, dining,
//! activities, events and editorials.
//!
//! This module provides a search system that combines:
//! - **Forward token matching** over a sorted in-memory vocabulary
//! - **Positional context scoring** so query words found close together rank higher
//! - **Relevance tiers** so exact and prefix title matches come first
//!
//! # Architecture
//!
//! The search system is built around a trait abstraction for testability:
//!
//! - `ContentSource` - Reading the content catalog (file/URL store, mocks)
//!
//! The pipeline runs once per process:
//!
//! content catalog → `build_search_documents` → `SearchIndex` → [`SearchService`]
//!
//! # Example
//!
//! ```ignore
//! use content_store::ContentStore;
//! use search_api::domain::search::{SearchService, StaticContentSource};
//!
//! let source = StaticContentSource::new(ContentStore::from_file("data/content.json"));
//! let service = SearchService::with_defaults(source);
//!
//! let results = service.search("auburn", Some("dining"), Some(10)).await?;
//! ```

mod builder;
mod index;
mod ranking;
mod service;
mod text;
mod traits;
mod types;

pub mod source;

// Re-export main types
pub use index::IndexOptions;
pub use service::{SearchConfig, SearchService};
pub use source::StaticContentSource;
pub use traits::SearchError;
pub use types::{SearchDocument, SearchStats};
