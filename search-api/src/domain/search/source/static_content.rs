//! Content source backed by the published content catalog.

use async_trait::async_trait;
use content_store::{ContentCatalog, ContentStore};

use crate::domain::search::traits::{ContentSource, Result};

/// Content source that reads the catalog file or URL through [`ContentStore`].
///
/// # Example
///
/// ```ignore
/// let source = StaticContentSource::new(ContentStore::from_file("data/content.json"));
/// let catalog = source.load().await?;
/// ```
pub struct StaticContentSource {
    store: ContentStore,
}

impl StaticContentSource {
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn load(&self) -> Result<ContentCatalog> {
        tracing::info!(location = %self.store.location(), "Loading content catalog");
        Ok(self.store.load().await?)
    }
}
