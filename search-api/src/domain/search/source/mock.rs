//! Mock content sources for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use content_store::ContentCatalog;

use crate::domain::search::traits::{ContentSource, Result, SearchError};

/// Serves a fixed catalog and counts how often it was loaded.
#[derive(Clone, Default)]
pub struct MockContentSource {
    catalog: ContentCatalog,
    loads: Arc<AtomicUsize>,
}

impl MockContentSource {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self {
            catalog,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `load` was called.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn load(&self) -> Result<ContentCatalog> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.catalog.clone())
    }
}

/// Always fails, like an unreachable or malformed content store.
#[derive(Clone, Default)]
pub struct FailingContentSource {
    loads: Arc<AtomicUsize>,
}

impl FailingContentSource {
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for FailingContentSource {
    async fn load(&self) -> Result<ContentCatalog> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::ContentError(
            "ParsingError: missing field `title` at line 4 column 9".to_string(),
        ))
    }
}
