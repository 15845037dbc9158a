//! Search service: lazily built index plus query-time limits and filtering.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use strum::IntoEnumIterator;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::builder::build_search_documents;
use super::index::{IndexOptions, SearchIndex};
use super::traits::{ContentSource, Result, SearchError};
use super::types::{DocumentType, SearchDocument, SearchOptions, SearchStats};

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Default number of results to return
    pub default_limit: usize,
    /// Maximum number of results allowed
    pub max_limit: usize,
    /// Minimum trimmed query length that reaches the index
    pub min_query_length: usize,
    /// Maximum characters in a result snippet
    pub snippet_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            min_query_length: 2,
            snippet_length: 160,
        }
    }
}

/// Search service over the site's content catalog.
///
/// The index is built from the content source on first use and then shared
/// read-only by every request for the lifetime of the process. Concurrent
/// first requests wait on a single build; a failed build is not cached, so
/// the next request tries again.
///
/// # Examples
///
/// ```ignore
/// let source = StaticContentSource::new(ContentStore::from_file("data/content.json"));
/// let service = SearchService::with_defaults(source);
/// let results = service.search("auburn", Some("dining"), Some(10)).await?;
/// ```
pub struct SearchService {
    source: Arc<dyn ContentSource>,
    config: SearchConfig,
    index_options: IndexOptions,
    index: OnceCell<Arc<SearchIndex>>,
}

impl SearchService {
    /// Create a new search service.
    pub fn new(
        source: impl ContentSource + 'static,
        config: SearchConfig,
        index_options: IndexOptions,
    ) -> Self {
        Self {
            source: Arc::new(source),
            config,
            index_options,
            index: OnceCell::new(),
        }
    }

    /// Create a search service with default configuration.
    #[cfg(test)]
    pub fn with_defaults(source: impl ContentSource + 'static) -> Self {
        Self::new(source, SearchConfig::default(), IndexOptions::default())
    }

    /// Execute a search query.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text; trimmed, and ignored below `min_query_length`
    /// * `kind` - Optional document type name; an unknown name matches nothing
    /// * `limit` - Maximum number of results (None or non-positive uses default, capped at max_limit)
    ///
    /// # Returns
    ///
    /// Documents ordered by relevance (best first).
    pub async fn search(
        &self,
        query: &str,
        kind: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<SearchDocument>> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_length {
            return Ok(vec![]);
        }

        let index = self.index().await?;

        let kind = match kind.filter(|k| !k.is_empty()) {
            Some(name) => match DocumentType::from_str(name) {
                Ok(kind) => Some(kind),
                Err(_) => {
                    debug!(kind = name, "Unknown document type filter");
                    return Ok(vec![]);
                }
            },
            None => None,
        };

        let options = SearchOptions {
            kind,
            limit: self.effective_limit(limit),
        };

        let hits = index.search(query, &options);
        if let Some(top) = hits.first() {
            debug!(
                hits = hits.len(),
                top_id = %top.document.id,
                top_ordinal = top.ordinal,
                top_tier = top.tier,
                top_score = top.score,
                "Search matched"
            );
        }

        Ok(hits.into_iter().map(|hit| hit.document.clone()).collect())
    }

    /// Build the index now instead of on the first query.
    pub async fn warm(&self) -> Result<()> {
        self.index().await.map(|_| ())
    }

    /// Get document counts by type.
    pub async fn stats(&self) -> Result<SearchStats> {
        let index = self.index().await?;
        let counts = index.documents().iter().map(|doc| doc.kind).counts();

        let by_type: BTreeMap<DocumentType, usize> = DocumentType::iter()
            .map(|kind| (kind, counts.get(&kind).copied().unwrap_or(0)))
            .collect();

        Ok(SearchStats {
            total: index.len(),
            by_type,
        })
    }

    /// Resolve the requested limit against the configured default and cap.
    pub fn effective_limit(&self, limit: Option<i64>) -> usize {
        match limit {
            Some(limit) if limit > 0 => {
                usize::try_from(limit).map_or(self.config.max_limit, |l| l.min(self.config.max_limit))
            }
            _ => self.config.default_limit.min(self.config.max_limit),
        }
    }

    async fn index(&self) -> Result<Arc<SearchIndex>> {
        self.index
            .get_or_try_init(|| self.build_index())
            .await
            .map(Arc::clone)
    }

    async fn build_index(&self) -> Result<Arc<SearchIndex>> {
        let started = Instant::now();

        let catalog = self.source.load().await?;
        let snippet_length = self.config.snippet_length;
        let options = self.index_options;

        let index = tokio::task::spawn_blocking(move || {
            let documents = build_search_documents(&catalog, snippet_length);
            SearchIndex::build(documents, options)
        })
        .await
        .map_err(|e| SearchError::Other(format!("Index build task failed: {}", e)))?;

        info!(
            documents = index.len(),
            terms = index.term_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search index built"
        );

        Ok(Arc::new(index))
    }
}
