//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub dependencies: DependencyHealth,
}

/// Per-dependency configuration status.
#[derive(Debug, Serialize)]
pub struct DependencyHealth {
    pub openai: DependencyStatus,
    pub graph: DependencyStatus,
}

#[derive(Debug, Serialize)]
pub struct DependencyStatus {
    pub configured: bool,
    pub detail: String,
}

/// GET /health - Return service health status.
///
/// "ok" when both upstreams are configured, "degraded" when either is
/// missing its credential. The process itself is always serving.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let openai_configured = state.analyzer.has_client();
    let graph_configured = state.graph.is_some();

    let status = if openai_configured && graph_configured {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        dependencies: DependencyHealth {
            openai: DependencyStatus {
                configured: openai_configured,
                detail: state.config.openai.model.clone(),
            },
            graph: DependencyStatus {
                configured: graph_configured,
                detail: state.config.graph.api_version.clone(),
            },
        },
    })
}
