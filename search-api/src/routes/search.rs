use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, instrument};

use super::{error::SEARCH_FAILED, ApiError};
use crate::{
    app_state::AppState,
    domain::search::{SearchDocument, SearchStats},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/stats", get(stats))
}

/// Raw query string. Repeated keys keep their first value, and `limit` stays a
/// string so junk values fall back to the default.
#[derive(Debug, Clone, Default)]
struct SearchQuery {
    q: Option<String>,
    kind: Option<String>,
    limit: Option<String>,
}

impl SearchQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut query.q,
                "type" => &mut query.kind,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    fn limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(parse_leading_int)
    }
}

/// Reads an optionally signed run of leading digits and ignores the rest,
/// so `10abc` is 10. Digit runs too long for an `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    query: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    results: Vec<SearchDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    took_ms: u64,
}

#[instrument(name = "GET /api/search", skip(app_state))]
async fn search(
    State(app_state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<SearchResponse>) {
    let started = Instant::now();
    let params = SearchQuery::from_pairs(pairs);

    let query = params.q.as_deref().unwrap_or_default().trim().to_string();
    let kind = params.kind.clone().filter(|k| !k.is_empty());

    let outcome = app_state
        .search_service
        .search(&query, kind.as_deref(), params.limit())
        .await;

    let (status, results, error) = match outcome {
        Ok(results) => (StatusCode::OK, results, None),
        Err(err) => {
            error!("Search failed for {:?}: {}", query, err);
            (StatusCode::INTERNAL_SERVER_ERROR, vec![], Some(SEARCH_FAILED))
        }
    };

    let response = SearchResponse {
        query,
        kind,
        results,
        error,
        took_ms: started.elapsed().as_millis() as u64,
    };

    (status, Json(response))
}

#[instrument(name = "GET /api/search/stats", skip(app_state))]
async fn stats(State(app_state): State<AppState>) -> Result<Json<SearchStats>, ApiError> {
    let stats = app_state.search_service.stats().await?;
    Ok(Json(stats))
}
