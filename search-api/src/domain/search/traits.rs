//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;
use content_store::{ContentCatalog, ContentStoreError};

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Content store error: {0}")]
    ContentError(String),

    #[error("{0}")]
    Other(String),
}

impl From<ContentStoreError> for SearchError {
    fn from(e: ContentStoreError) -> Self {
        SearchError::ContentError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Trait for reading the published content catalog.
///
/// Abstracts the content store so the index can be built from fixtures in tests.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load every content array. Called once per index build.
    async fn load(&self) -> Result<ContentCatalog>;
}
