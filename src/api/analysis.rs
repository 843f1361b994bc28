//! Campaign analysis endpoint handler.

use crate::analysis::total_spend;
use crate::api::types::{AnalyzeCampaignsRequest, AnalyzeCampaignsResponse};
use crate::api::AppState;
use crate::logging::generate_request_id;
use axum::{extract::State, Json};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// POST /v1/analysis/campaigns - Analyze a batch of campaign totals.
///
/// Infallible by design: model failures surface as fallback verdicts inside
/// a 200 response, and an empty batch returns an empty batch.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeCampaignsRequest>,
) -> Json<AnalyzeCampaignsResponse> {
    let request_id = generate_request_id();
    let started = Instant::now();

    let total_account_spend = request
        .total_account_spend
        .unwrap_or_else(|| total_spend(&request.campaigns));

    info!(
        request_id = %request_id,
        campaigns = request.campaigns.len(),
        total_account_spend,
        "Analysis request received"
    );

    let campaigns = state
        .analyzer
        .analyze(&request.campaigns, total_account_spend)
        .await;

    state.usage.analysis_requests.fetch_add(1, Ordering::SeqCst);
    state
        .usage
        .campaigns_analyzed
        .fetch_add(campaigns.len() as u64, Ordering::SeqCst);

    let model_label = state
        .metrics_collector
        .sanitize_label(&state.config.openai.model);
    metrics::histogram!("interestminer_analysis_duration_seconds", "model" => model_label)
        .record(started.elapsed().as_secs_f64());

    info!(
        request_id = %request_id,
        campaigns = campaigns.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Analysis request completed"
    );

    Json(AnalyzeCampaignsResponse { campaigns })
}
