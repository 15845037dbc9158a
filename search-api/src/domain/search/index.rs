//! In-memory forward index with positional context scoring.
//!
//! Terms live in a sorted vocabulary, so every query token is resolved by a
//! range scan over the terms it prefixes (`aub` → `auburn`, `auburndale`).
//! Each posting keeps the token positions of the term inside its document,
//! which gives two signals:
//!
//! - **resolution**: where the earliest occurrence sits in the document,
//!   bucketed into `resolution` slots. Titles come first in the indexed text,
//!   so title hits land in the best buckets.
//! - **depth**: consecutive query tokens occurring within `depth` tokens of
//!   each other (in either order) earn a context bonus.
//!
//! A document must match every query token to be returned.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use serde::Deserialize;

use super::ranking::relevance_tier;
use super::text::{fold, tokenize};
use super::types::{SearchDocument, SearchHit, SearchOptions};

/// Queries shorter than this (after trimming) never reach the index.
pub const MIN_QUERY_CHARS: usize = 2;

type TermId = usize;

/// Tuning of the positional scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IndexOptions {
    /// Number of position buckets per document
    pub resolution: u32,
    /// Maximum distance between two query tokens to count as context
    pub depth: u32,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            resolution: 9,
            depth: 2,
        }
    }
}

#[derive(Debug, Clone)]
struct Posting {
    ordinal: usize,
    /// Ascending token offsets of the term inside the document
    positions: Vec<u32>,
}

/// Best match of one query token inside one document.
#[derive(Debug, Default)]
struct TokenMatch {
    score: u32,
    positions: Vec<u32>,
}

/// Immutable search index over a fixed document set.
#[derive(Debug)]
pub struct SearchIndex {
    options: IndexOptions,
    vocabulary: BTreeMap<String, TermId>,
    postings: Vec<Vec<Posting>>,
    lengths: Vec<u32>,
    folded_titles: Vec<String>,
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    /// Builds the index in one pass over every token of every document.
    ///
    /// Document ordinals follow the order of `documents`.
    pub fn build(documents: Vec<SearchDocument>, options: IndexOptions) -> Self {
        let options = IndexOptions {
            resolution: options.resolution.max(1),
            depth: options.depth,
        };

        let mut vocabulary: BTreeMap<String, TermId> = BTreeMap::new();
        let mut postings: Vec<Vec<Posting>> = Vec::new();
        let mut lengths = Vec::with_capacity(documents.len());
        let mut folded_titles = Vec::with_capacity(documents.len());

        for (ordinal, document) in documents.iter().enumerate() {
            let tokens = tokenize(&document.text);
            lengths.push(tokens.len() as u32);
            folded_titles.push(fold(&document.title));

            for (position, token) in tokens.into_iter().enumerate() {
                let term = *vocabulary.entry(token).or_insert_with(|| {
                    postings.push(Vec::new());
                    postings.len() - 1
                });

                let list = &mut postings[term];
                match list.last_mut() {
                    Some(posting) if posting.ordinal == ordinal => {
                        posting.positions.push(position as u32)
                    }
                    _ => list.push(Posting {
                        ordinal,
                        positions: vec![position as u32],
                    }),
                }
            }
        }

        Self {
            options,
            vocabulary,
            postings,
            lengths,
            folded_titles,
            documents,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Runs `query` against the index.
    ///
    /// Hits are ordered by relevance tier, then by positional score, then by
    /// insertion order. Queries shorter than [`MIN_QUERY_CHARS`] return
    /// nothing.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit<'_>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS || options.limit == 0 {
            return vec![];
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            return vec![];
        }

        let mut matches: Vec<HashMap<usize, TokenMatch>> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let token_matches = self.match_token(token);
            if token_matches.is_empty() {
                return vec![];
            }
            matches.push(token_matches);
        }

        // Walk the rarest token's documents and keep those every token hits.
        let Some(rarest) = matches.iter().min_by_key(|m| m.len()) else {
            return vec![];
        };

        let folded_query = fold(query);
        let mut hits: Vec<SearchHit<'_>> = rarest
            .keys()
            .filter(|ordinal| matches.iter().all(|m| m.contains_key(*ordinal)))
            .filter_map(|&ordinal| {
                let document = self.documents.get(ordinal)?;
                if options.kind.is_some_and(|kind| kind != document.kind) {
                    return None;
                }

                let folded_title = self.folded_titles.get(ordinal)?;
                Some(SearchHit {
                    ordinal,
                    tier: relevance_tier(document, folded_title, &folded_query),
                    score: self.context_score(&matches, ordinal),
                    document,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.tier
                .cmp(&a.tier)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        hits.truncate(options.limit);
        hits
    }

    /// Collects, per document, the best scoring term that `token` prefixes.
    fn match_token(&self, token: &str) -> HashMap<usize, TokenMatch> {
        let mut by_document: HashMap<usize, TokenMatch> = HashMap::new();

        let terms = self
            .vocabulary
            .range::<str, _>((Bound::Included(token), Bound::Unbounded))
            .take_while(|(term, _)| term.starts_with(token));

        for (term, &term_id) in terms {
            let multiplier = if term == token { 2 } else { 1 };
            for posting in &self.postings[term_id] {
                let first = posting.positions.first().copied().unwrap_or_default();
                let score = self.position_score(posting.ordinal, first) * multiplier;

                let entry = by_document.entry(posting.ordinal).or_default();
                entry.score = entry.score.max(score);
                entry.positions.extend_from_slice(&posting.positions);
            }
        }

        for entry in by_document.values_mut() {
            entry.positions.sort_unstable();
        }
        by_document
    }

    /// `resolution` for a token in the first bucket of its document, down to 1
    /// for the last bucket.
    fn position_score(&self, ordinal: usize, position: u32) -> u32 {
        let resolution = self.options.resolution;
        let length = self.lengths.get(ordinal).copied().unwrap_or(1).max(1);
        let bucket = (u64::from(position) * u64::from(resolution) / u64::from(length)) as u32;
        resolution - bucket.min(resolution - 1)
    }

    fn context_score(&self, matches: &[HashMap<usize, TokenMatch>], ordinal: usize) -> u32 {
        let coverage: u32 = matches
            .iter()
            .filter_map(|m| m.get(&ordinal))
            .map(|m| m.score)
            .sum();

        let context_hits = matches
            .windows(2)
            .filter(|pair| {
                match (pair[0].get(&ordinal), pair[1].get(&ordinal)) {
                    (Some(left), Some(right)) => {
                        min_distance(&left.positions, &right.positions)
                            .is_some_and(|d| d > 0 && d <= self.options.depth)
                    }
                    _ => false,
                }
            })
            .count() as u32;

        coverage + context_hits * self.options.resolution
    }
}

/// Smallest absolute difference between two ascending position lists.
fn min_distance(left: &[u32], right: &[u32]) -> Option<u32> {
    let (mut i, mut j) = (0, 0);
    let mut best: Option<u32> = None;

    while i < left.len() && j < right.len() {
        let distance = left[i].abs_diff(right[j]);
        best = Some(best.map_or(distance, |b| b.min(distance)));
        if left[i] < right[j] {
            i += 1;
        } else {
            j += 1;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::ranking::{EXACT_TITLE, TITLE_PREFIX};
    use crate::domain::search::text::build_search_text;
    use crate::domain::search::types::DocumentType;

    fn doc(id: &str, kind: DocumentType, title: &str, body: &str) -> SearchDocument {
        SearchDocument {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description: body.to_string(),
            category: String::new(),
            slug: id.to_string(),
            href: format!("/{}", id),
            snippet: title.to_string(),
            tags: vec![],
            location: None,
            image: None,
            text: build_search_text([Some(title), Some(body)]),
        }
    }

    fn auburn_docs() -> Vec<SearchDocument> {
        vec![
            doc("alehouse", DocumentType::Dining, "Auburn Alehouse", ""),
            doc("ravine", DocumentType::Activity, "Auburn Ravine Trail", ""),
        ]
    }

    fn ids(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.document.id.clone()).collect()
    }

    fn opts(limit: usize) -> SearchOptions {
        SearchOptions { kind: None, limit }
    }

    #[test]
    fn build_assigns_ordinals_in_order() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        assert_eq!(index.len(), 2);
        assert_eq!(index.documents()[0].id, "alehouse");
        assert_eq!(index.documents()[1].id, "ravine");
        // auburn, alehouse, ravine, trail
        assert_eq!(index.term_count(), 4);
    }

    #[test]
    fn shared_token_returns_both_documents() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        let hits = index.search("auburn", &opts(20));
        assert_eq!(ids(&hits), vec!["alehouse", "ravine"]);
    }

    #[test]
    fn type_filter_restricts_results() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        let options = SearchOptions {
            kind: Some(DocumentType::Dining),
            limit: 20,
        };
        assert_eq!(ids(&index.search("auburn", &options)), vec!["alehouse"]);

        let options = SearchOptions {
            kind: Some(DocumentType::Event),
            limit: 20,
        };
        assert!(index.search("auburn", &options).is_empty());
    }

    #[test]
    fn single_character_query_is_rejected() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        assert!(index.search("a", &opts(20)).is_empty());
        assert!(index.search("  a  ", &opts(20)).is_empty());
        assert!(index.search("", &opts(20)).is_empty());
    }

    #[test]
    fn token_unique_to_one_document() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        assert_eq!(ids(&index.search("trail", &opts(20))), vec!["ravine"]);
    }

    #[test]
    fn prefix_matches_forward_only() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        assert_eq!(ids(&index.search("aub", &opts(20))), vec!["alehouse", "ravine"]);
        assert_eq!(ids(&index.search("rav", &opts(20))), vec!["ravine"]);
        // "burn" is inside "auburn" but not a prefix of any term
        assert!(index.search("burn", &opts(20)).is_empty());
    }

    #[test]
    fn every_query_token_must_match() {
        let index = SearchIndex::build(auburn_docs(), IndexOptions::default());
        assert_eq!(ids(&index.search("auburn trail", &opts(20))), vec!["ravine"]);
        assert!(index.search("auburn museum", &opts(20)).is_empty());
    }

    #[test]
    fn exact_title_ranks_first() {
        let docs = vec![
            doc(
                "guide",
                DocumentType::Editorial,
                "Weekend Guide",
                "start at the auburn ravine trail then visit old town",
            ),
            doc("ravine", DocumentType::Activity, "Auburn Ravine Trail", ""),
        ];
        let index = SearchIndex::build(docs, IndexOptions::default());

        let hits = index.search("Auburn Ravine Trail", &opts(20));
        assert_eq!(hits[0].document.id, "ravine");
        assert_eq!(hits[0].tier, EXACT_TITLE);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn nearby_tokens_outscore_scattered_ones() {
        let docs = vec![
            doc(
                "scattered",
                DocumentType::Editorial,
                "Guide",
                "river views from the bridge and later a long walk to the falls",
            ),
            doc(
                "adjacent",
                DocumentType::Editorial,
                "Guide",
                "a long walk to the river falls from the bridge and views",
            ),
        ];
        let index = SearchIndex::build(docs, IndexOptions::default());

        // reversed order still counts as context
        let hits = index.search("falls river", &opts(20));
        assert_eq!(ids(&hits), vec!["adjacent", "scattered"]);
        assert_eq!(hits[0].tier, hits[1].tier);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn title_position_beats_body_position() {
        let docs = vec![
            doc(
                "body",
                DocumentType::Event,
                "Summer Concert Series",
                "live music every friday at the historic courthouse lawn near the winery",
            ),
            doc("title", DocumentType::Dining, "Winery Tasting Room", "open daily"),
        ];
        let index = SearchIndex::build(docs, IndexOptions::default());

        let hits = index.search("winery", &opts(20));
        assert_eq!(ids(&hits), vec!["title", "body"]);
        assert_eq!(hits[0].tier, TITLE_PREFIX);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let docs = vec![
            doc("first", DocumentType::Event, "Farmers Market", ""),
            doc("second", DocumentType::Event, "Farmers Market", ""),
            doc("third", DocumentType::Event, "Farmers Market", ""),
        ];
        let index = SearchIndex::build(docs, IndexOptions::default());
        assert_eq!(
            ids(&index.search("market", &opts(20))),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn limit_truncates_results() {
        let docs = (0..10)
            .map(|i| doc(&format!("d{}", i), DocumentType::Event, "Gold Rush Days", ""))
            .collect();
        let index = SearchIndex::build(docs, IndexOptions::default());

        assert_eq!(index.search("gold", &opts(3)).len(), 3);
        assert!(index.search("gold", &opts(0)).is_empty());
    }

    #[test]
    fn accent_insensitive_matching() {
        let docs = vec![doc("cafe", DocumentType::Dining, "Café Délicias", "")];
        let index = SearchIndex::build(docs, IndexOptions::default());
        assert_eq!(ids(&index.search("cafe", &opts(20))), vec!["cafe"]);
        assert_eq!(ids(&index.search("DÉLI", &opts(20))), vec!["cafe"]);
    }

    #[test]
    fn rebuilding_gives_identical_results() {
        let docs = vec![
            doc("a", DocumentType::Activity, "Hidden Falls Regional Park", "waterfalls hiking trails"),
            doc("b", DocumentType::Activity, "Lake Clementine Trail", "hiking along the river"),
            doc("c", DocumentType::Dining, "Trailhead Cafe", "coffee before hiking"),
        ];
        let first = SearchIndex::build(docs.clone(), IndexOptions::default());
        let second = SearchIndex::build(docs, IndexOptions::default());

        for query in ["hiking", "trail", "falls hik", "cafe"] {
            assert_eq!(
                ids(&first.search(query, &opts(20))),
                ids(&second.search(query, &opts(20))),
                "query {:?}",
                query
            );
        }
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = SearchIndex::build(vec![], IndexOptions::default());
        assert_eq!(index.len(), 0);
        assert!(index.search("auburn", &opts(20)).is_empty());
    }

    #[test]
    fn min_distance_of_sorted_lists() {
        assert_eq!(min_distance(&[1, 10], &[4, 12]), Some(2));
        assert_eq!(min_distance(&[5], &[5]), Some(0));
        assert_eq!(min_distance(&[], &[1]), None);
    }
}
