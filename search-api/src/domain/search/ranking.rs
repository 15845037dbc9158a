//! Whole-query relevance tiers.
//!
//! The index decides which documents match and orders them within a tier;
//! the tier decides the coarse order. An exact title match always outranks a
//! document that merely contains every query token.

use super::text::fold;
use super::types::SearchDocument;

/// Title equals the query.
pub const EXACT_TITLE: u32 = 1000;
/// Title starts with the query.
pub const TITLE_PREFIX: u32 = 500;
/// Title contains the query.
pub const TITLE_CONTAINS: u32 = 200;
/// The searchable text contains the query.
pub const TEXT_CONTAINS: u32 = 100;
/// One of the tags contains the query.
pub const TAG_CONTAINS: u32 = 50;

/// Scores `document` against the folded, trimmed `query`.
///
/// `folded_title` is the document title passed through [`fold`]; the index
/// keeps it precomputed so queries do not refold every title.
pub fn relevance_tier(document: &SearchDocument, folded_title: &str, query: &str) -> u32 {
    if folded_title == query {
        EXACT_TITLE
    } else if folded_title.starts_with(query) {
        TITLE_PREFIX
    } else if folded_title.contains(query) {
        TITLE_CONTAINS
    } else if document.text.contains(query) {
        TEXT_CONTAINS
    } else if document.tags.iter().any(|tag| fold(tag).contains(query)) {
        TAG_CONTAINS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::types::DocumentType;

    fn doc(title: &str, text: &str, tags: &[&str]) -> SearchDocument {
        SearchDocument {
            id: "id".to_string(),
            kind: DocumentType::Activity,
            title: title.to_string(),
            description: String::new(),
            category: String::new(),
            slug: "slug".to_string(),
            href: "/activities/slug".to_string(),
            snippet: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            location: None,
            image: None,
            text: text.to_string(),
        }
    }

    fn tier(document: &SearchDocument, query: &str) -> u32 {
        relevance_tier(document, &fold(&document.title), query)
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(EXACT_TITLE > TITLE_PREFIX);
        assert!(TITLE_PREFIX > TITLE_CONTAINS);
        assert!(TITLE_CONTAINS > TEXT_CONTAINS);
        assert!(TEXT_CONTAINS > TAG_CONTAINS);
    }

    #[test]
    fn exact_title_match() {
        let d = doc("Auburn Ravine Trail", "auburn ravine trail hiking", &[]);
        assert_eq!(tier(&d, "auburn ravine trail"), EXACT_TITLE);
    }

    #[test]
    fn title_prefix_and_contains() {
        let d = doc("Auburn Ravine Trail", "auburn ravine trail hiking", &[]);
        assert_eq!(tier(&d, "auburn"), TITLE_PREFIX);
        assert_eq!(tier(&d, "ravine"), TITLE_CONTAINS);
    }

    #[test]
    fn text_then_tags() {
        let d = doc("Lake Clementine", "lake clementine scenic hiking", &["Parks & Nature"]);
        assert_eq!(tier(&d, "scenic"), TEXT_CONTAINS);
        assert_eq!(tier(&d, "parks & nature"), TAG_CONTAINS);
        assert_eq!(tier(&d, "museum"), 0);
    }

    #[test]
    fn accents_are_folded_on_the_title() {
        let d = doc("Café Delicias", "cafe delicias", &[]);
        assert_eq!(tier(&d, "cafe delicias"), EXACT_TITLE);
    }
}
