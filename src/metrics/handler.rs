//! # Metrics HTTP Handlers
//!
//! Axum handlers for metrics endpoints.

use super::{AnalysisStats, InterestStats, StatsResponse};
use crate::api::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Handler for GET /metrics endpoint (Prometheus text format).
///
/// Returns metrics in Prometheus exposition format for scraping.
/// Always returns 200 with the correct Content-Type for Prometheus scrapers,
/// even if no metrics have been recorded yet (returns empty text).
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let metrics = state.metrics_collector.render_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics,
    )
}

/// Handler for GET /v1/stats endpoint (JSON format).
///
/// Returns aggregated statistics in JSON format for dashboards and debugging.
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let usage = &state.usage;

    let response = StatsResponse {
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        analysis: AnalysisStats {
            requests: usage.analysis_requests.load(Ordering::SeqCst),
            campaigns: usage.campaigns_analyzed.load(Ordering::SeqCst),
        },
        interests: InterestStats {
            searches: usage.interest_searches.load(Ordering::SeqCst),
            cache_hits: usage.search_cache_hits.load(Ordering::SeqCst),
            errors: usage.search_errors.load(Ordering::SeqCst),
        },
    };

    Json(response)
}
