//! Text normalization shared by indexing and querying.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static HTML_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Lower-cases `text` and strips diacritics, so `Café` and `cafe` compare equal.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits `text` into folded tokens on every non-alphanumeric character.
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins the non-empty parts into the folded blob the index is built from.
pub fn build_search_text<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    fold(&joined)
}

/// Strips HTML tags, collapses whitespace and truncates to `max_chars`
/// at the last word boundary, appending `...` when anything was cut.
pub fn clean_snippet(text: &str, max_chars: usize) -> String {
    let stripped = HTML_TAG_PATTERN.replace_all(text, "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &truncated[..last_space]),
        _ => format!("{}...", truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_and_case() {
        assert_eq!(fold("Café Délicias"), "cafe delicias");
        assert_eq!(fold("AUBURN"), "auburn");
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("Power's Mansion Inn — B&B, est. 1885"),
            vec!["power", "s", "mansion", "inn", "b", "b", "est", "1885"]
        );
    }

    #[test]
    fn tokenize_empty_and_symbols_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  -- !! ").is_empty());
    }

    #[test]
    fn search_text_skips_missing_parts() {
        let text = build_search_text([
            Some("Auburn Alehouse"),
            None,
            Some("  "),
            Some("Brewery"),
        ]);
        assert_eq!(text, "auburn alehouse brewery");
    }

    #[test]
    fn snippet_strips_html_and_whitespace() {
        assert_eq!(
            clean_snippet("<p>Historic   <b>Old Town</b></p>\n walking tour", 160),
            "Historic Old Town walking tour"
        );
    }

    #[test]
    fn snippet_truncates_at_word_boundary() {
        assert_eq!(
            clean_snippet("Scenic hiking trail along Lake Clementine", 20),
            "Scenic hiking trail..."
        );
    }

    #[test]
    fn snippet_hard_cuts_a_single_long_word() {
        assert_eq!(clean_snippet("Supercalifragilistic", 5), "Super...");
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        assert_eq!(clean_snippet("Café Délicias", 13), "Café Délicias");
        assert_eq!(clean_snippet("Café Délicias", 8), "Café...");
    }
}
