//! Flattens the content catalog into uniform search documents.

use std::collections::HashSet;

use content_store::{
    Accommodation, Activity, ContentBase, ContentCatalog, Dining, Editorial, Event, RichText,
};
use tracing::warn;

use super::text::{build_search_text, clean_snippet};
use super::types::{DocumentType, SearchDocument};

/// Location label used when a venue record has no city.
const DEFAULT_CITY: &str = "Auburn";

/// Build one document per catalog record that has a slug.
///
/// Documents come out grouped by type (accommodation, dining, activity,
/// event, editorial), each group in catalog order. Ids are unique across the
/// whole result: a record whose `_id` was already taken by an earlier
/// document is namespaced as `{type}:{_id}`.
pub fn build_search_documents(catalog: &ContentCatalog, snippet_length: usize) -> Vec<SearchDocument> {
    let mut builder = DocumentBuilder::new(catalog.len(), snippet_length);

    for accommodation in &catalog.accommodations {
        builder.push_accommodation(accommodation);
    }
    for dining in &catalog.dining {
        builder.push_dining(dining);
    }
    for activity in &catalog.activities {
        builder.push_activity(activity);
    }
    for event in &catalog.events {
        builder.push_event(event);
    }
    for editorial in &catalog.editorials {
        builder.push_editorial(editorial);
    }

    builder.documents
}

/// Per-record fields that differ between content types.
struct Extra<'a> {
    kind: DocumentType,
    href: String,
    /// Displayed category
    category: Option<&'a str>,
    /// Category folded into the search text, which can differ from the displayed one
    text_category: Option<&'a str>,
    tags: Vec<String>,
    long_text: Option<&'a RichText>,
    location: Option<String>,
}

struct DocumentBuilder {
    documents: Vec<SearchDocument>,
    seen_ids: HashSet<String>,
    snippet_length: usize,
}

impl DocumentBuilder {
    fn new(capacity: usize, snippet_length: usize) -> Self {
        Self {
            documents: Vec::with_capacity(capacity),
            seen_ids: HashSet::with_capacity(capacity),
            snippet_length,
        }
    }

    fn push_accommodation(&mut self, record: &Accommodation) {
        let base = &record.base;
        let Some(slug) = slug_or_skip(base, DocumentType::Accommodation) else {
            return;
        };

        self.push(
            base,
            slug,
            Extra {
                kind: DocumentType::Accommodation,
                href: format!("/accommodations/{}", slug),
                category: base.category.as_deref(),
                text_category: base.category.as_deref(),
                tags: base.category.iter().cloned().collect(),
                long_text: record.description.as_ref(),
                location: Some(city_or_default(base)),
            },
        );
    }

    fn push_dining(&mut self, record: &Dining) {
        let base = &record.base;
        let Some(slug) = slug_or_skip(base, DocumentType::Dining) else {
            return;
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in [record.cuisine.as_ref(), base.category.as_ref()].into_iter().flatten() {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        self.push(
            base,
            slug,
            Extra {
                kind: DocumentType::Dining,
                href: format!("/dining/{}", slug),
                category: base.category.as_deref().or(record.cuisine.as_deref()),
                text_category: record.cuisine.as_deref().or(base.category.as_deref()),
                tags,
                long_text: record.description.as_ref(),
                location: Some(city_or_default(base)),
            },
        );
    }

    fn push_activity(&mut self, record: &Activity) {
        let base = &record.base;
        let Some(slug) = slug_or_skip(base, DocumentType::Activity) else {
            return;
        };

        let href = match record.sub_hub.as_deref().filter(|hub| !hub.is_empty()) {
            Some(hub) => format!("/things-to-do/{}/{}", hub, slug),
            None => format!("/activities/{}", slug),
        };

        self.push(
            base,
            slug,
            Extra {
                kind: DocumentType::Activity,
                href,
                category: base.category.as_deref(),
                text_category: base.category.as_deref(),
                tags: base.category.iter().cloned().collect(),
                long_text: record.description.as_ref(),
                location: Some(city_or_default(base)),
            },
        );
    }

    fn push_event(&mut self, record: &Event) {
        let base = &record.base;
        let Some(slug) = slug_or_skip(base, DocumentType::Event) else {
            return;
        };

        self.push(
            base,
            slug,
            Extra {
                kind: DocumentType::Event,
                href: format!("/events/{}", slug),
                category: base.category.as_deref(),
                text_category: base.category.as_deref(),
                tags: base.category.iter().cloned().collect(),
                long_text: record.description.as_ref(),
                location: Some(city_or_default(base)),
            },
        );
    }

    fn push_editorial(&mut self, record: &Editorial) {
        let base = &record.base;
        let Some(slug) = slug_or_skip(base, DocumentType::Editorial) else {
            return;
        };

        self.push(
            base,
            slug,
            Extra {
                kind: DocumentType::Editorial,
                href: format!("/discover/{}", slug),
                category: base.category.as_deref(),
                text_category: base.category.as_deref(),
                tags: base.category.iter().cloned().collect(),
                long_text: record.content.as_ref(),
                location: None,
            },
        );
    }

    fn push(&mut self, base: &ContentBase, slug: &str, extra: Extra<'_>) {
        let id = self.claim_id(&base.id, extra.kind);
        let long_text = extra.long_text.map(RichText::plain_text);
        let address = base.location.as_ref();

        // Tags go last so they never push title tokens out of the first buckets
        let text = build_search_text(
            [
                Some(base.title.as_str()),
                base.excerpt.as_deref(),
                extra.text_category,
                address.and_then(|l| l.city.as_deref()),
                address.and_then(|l| l.address.as_deref()),
                long_text.as_deref(),
            ]
            .into_iter()
            .chain(extra.tags.iter().map(|tag| Some(tag.as_str()))),
        );

        let snippet_source = base
            .excerpt
            .as_deref()
            .filter(|excerpt| !excerpt.trim().is_empty())
            .unwrap_or(&base.title);

        self.documents.push(SearchDocument {
            id,
            kind: extra.kind,
            title: base.title.clone(),
            description: base.excerpt.clone().unwrap_or_default(),
            category: extra.category.unwrap_or_default().to_string(),
            slug: slug.to_string(),
            href: extra.href,
            snippet: clean_snippet(snippet_source, self.snippet_length),
            tags: extra.tags,
            location: extra.location,
            image: base
                .featured_image
                .as_ref()
                .and_then(|image| image.url())
                .map(str::to_string),
            text,
        });
    }

    fn claim_id(&mut self, raw: &str, kind: DocumentType) -> String {
        if self.seen_ids.insert(raw.to_string()) {
            return raw.to_string();
        }

        let namespaced = format!("{}:{}", kind, raw);
        let mut candidate = namespaced.clone();
        let mut counter = 2;
        while !self.seen_ids.insert(candidate.clone()) {
            candidate = format!("{}#{}", namespaced, counter);
            counter += 1;
        }

        warn!(id = raw, assigned = %candidate, "Duplicate content id, namespacing");
        candidate
    }
}

/// Records without a slug have no detail page to link to.
fn slug_or_skip(base: &ContentBase, kind: DocumentType) -> Option<&str> {
    let slug = base.slug();
    if slug.is_none() {
        warn!(id = %base.id, %kind, "Skipping content record without slug");
    }
    slug
}

fn city_or_default(base: &ContentBase) -> String {
    base.location
        .as_ref()
        .and_then(|location| location.city.as_deref())
        .filter(|city| !city.is_empty())
        .unwrap_or(DEFAULT_CITY)
        .to_string()
}
