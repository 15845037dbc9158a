//! Core types for the search domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Content type a searchable document was built from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    Accommodation,
    Dining,
    Activity,
    Event,
    Editorial,
}

/// A single searchable record derived from one content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    /// Unique across every content type in the index
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub title: String,
    /// Excerpt or summary, empty when the record has none
    pub description: String,
    /// Category, falling back to cuisine for dining
    pub category: String,
    pub slug: String,
    /// Canonical link to the detail page
    pub href: String,
    /// Short plain-text summary for result lists
    pub snippet: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Folded, lower-cased text the index is built from
    #[serde(skip)]
    pub text: String,
}

/// Query-time options accepted by [`SearchIndex::search`](super::index::SearchIndex::search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only return documents of this type
    pub kind: Option<DocumentType>,
    /// Maximum number of hits
    pub limit: usize,
}

/// A ranked document returned by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    /// Insertion position of the document in the index
    pub ordinal: usize,
    /// Whole-query relevance class, see [`relevance_tier`](super::ranking::relevance_tier)
    pub tier: u32,
    /// Token coverage and proximity score
    pub score: u32,
    pub document: &'a SearchDocument,
}

/// Document counts of the built index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub total: usize,
    pub by_type: BTreeMap<DocumentType, usize>,
}
