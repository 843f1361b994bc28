//! Interest search and suggestion endpoint handlers.

use crate::api::types::{ApiError, InterestsResponse};
use crate::api::AppState;
use crate::graph::{GraphClient, GraphError, SearchCache};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::warn;

/// Query parameters for GET /v1/interests/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

/// Query parameters for GET /v1/interests/suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestionsParams {
    /// Comma-separated seed interest names.
    #[serde(default)]
    pub interests: String,
    pub limit: Option<u32>,
}

/// GET /v1/interests/search - Keyword search for targetable interests.
pub async fn handle_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<InterestsResponse>, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("Query parameter 'q' is required"));
    }

    let graph = require_graph(&state)?;
    let limit = effective_limit(&state, params.limit);

    state.usage.interest_searches.fetch_add(1, Ordering::SeqCst);

    let cache_key = SearchCache::key("search", query, limit);
    if let Some(interests) = state.search_cache.get(&cache_key) {
        state.usage.search_cache_hits.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("interestminer_interest_searches_total", "result" => "hit")
            .increment(1);
        return Ok(Json(InterestsResponse {
            data: interests,
            cached: true,
        }));
    }

    match graph.search_interests(query, limit).await {
        Ok(interests) => {
            metrics::counter!("interestminer_interest_searches_total", "result" => "miss")
                .increment(1);
            state.search_cache.insert(cache_key, interests.clone());
            Ok(Json(InterestsResponse {
                data: interests,
                cached: false,
            }))
        }
        Err(err) => {
            state.usage.search_errors.fetch_add(1, Ordering::SeqCst);
            metrics::counter!("interestminer_interest_searches_total", "result" => "error")
                .increment(1);
            warn!(error = %err, query = %query, "Interest search failed");
            Err(map_graph_error(&err))
        }
    }
}

/// GET /v1/interests/suggestions - Suggestions related to seed interests.
pub async fn handle_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionsParams>,
) -> Result<Json<InterestsResponse>, ApiError> {
    let seeds: Vec<String> = params
        .interests
        .split(',')
        .map(str::trim)
        .filter(|seed| !seed.is_empty())
        .map(str::to_string)
        .collect();
    if seeds.is_empty() {
        return Err(ApiError::bad_request(
            "Query parameter 'interests' must name at least one seed interest",
        ));
    }

    let graph = require_graph(&state)?;
    let limit = effective_limit(&state, params.limit);

    state.usage.interest_searches.fetch_add(1, Ordering::SeqCst);

    let cache_key = SearchCache::key("suggest", &seeds.join(","), limit);
    if let Some(interests) = state.search_cache.get(&cache_key) {
        state.usage.search_cache_hits.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("interestminer_interest_searches_total", "result" => "hit")
            .increment(1);
        return Ok(Json(InterestsResponse {
            data: interests,
            cached: true,
        }));
    }

    match graph.suggest_interests(&seeds, limit).await {
        Ok(interests) => {
            metrics::counter!("interestminer_interest_searches_total", "result" => "miss")
                .increment(1);
            state.search_cache.insert(cache_key, interests.clone());
            Ok(Json(InterestsResponse {
                data: interests,
                cached: false,
            }))
        }
        Err(err) => {
            state.usage.search_errors.fetch_add(1, Ordering::SeqCst);
            metrics::counter!("interestminer_interest_searches_total", "result" => "error")
                .increment(1);
            warn!(error = %err, seeds = %seeds.join(","), "Interest suggestions failed");
            Err(map_graph_error(&err))
        }
    }
}

fn require_graph(state: &AppState) -> Result<&GraphClient, ApiError> {
    state.graph.as_ref().ok_or_else(|| {
        ApiError::service_unavailable(&format!(
            "Interest search is disabled: set {} to enable it",
            state.config.graph.access_token_env
        ))
    })
}

fn effective_limit(state: &AppState, requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(state.config.graph.default_search_limit)
        .clamp(1, 1000)
}

fn map_graph_error(err: &GraphError) -> ApiError {
    match err {
        GraphError::Timeout(_) => ApiError::gateway_timeout(),
        GraphError::InvalidRequest(message) => ApiError::bad_request(message),
        _ => ApiError::bad_gateway(&err.to_string()),
    }
}
