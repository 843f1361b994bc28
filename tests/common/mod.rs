//! Shared test utilities for InterestMiner integration and unit tests.
//!
//! Provides reusable helpers for building campaign batches, mock model
//! responses, and test apps to reduce duplication across test files.

#![allow(dead_code)]

use interestminer::analysis::CampaignTotals;
use interestminer::api::{create_router, AppState};
use interestminer::config::MinerConfig;
use std::sync::Arc;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// Environment variable name that is never set in the test process.
/// Configs pointing their key lookup here get no OpenAI client.
pub const UNSET_OPENAI_KEY_ENV: &str = "INTERESTMINER_TEST_UNSET_OPENAI_KEY";

/// Environment variable name that is never set in the test process.
/// Configs pointing their token lookup here get no Graph client.
pub const UNSET_GRAPH_TOKEN_ENV: &str = "INTERESTMINER_TEST_UNSET_GRAPH_TOKEN";

// =============================================================================
// Campaign Builders
// =============================================================================

/// Create campaign totals with a fixed mid-funnel shape and the given
/// spend and revenue. Precomputed averages are left at zero; enrichment
/// recomputes them from the totals.
pub fn make_campaign(id: &str, name: &str, spend: f64, revenue: f64) -> CampaignTotals {
    CampaignTotals {
        id: id.to_string(),
        name: name.to_string(),
        objective: "OUTCOME_SALES".to_string(),
        spend,
        revenue,
        clicks: 200.0,
        impressions: 10_000.0,
        purchases: 5.0,
        add_to_cart: 20.0,
        initiate_checkout: 10.0,
        add_payment_info: 8.0,
        reach: 8_000.0,
        ctr: 2.0,
        cpm: 10.0,
        cpc: 0.0,
        cpa: 0.0,
        roas: 0.0,
    }
}

/// Two-campaign batch: one strong performer, one weak.
pub fn sample_batch() -> Vec<CampaignTotals> {
    vec![
        make_campaign("c-1", "Prospecting US", 100.0, 450.0),
        make_campaign("c-2", "Retargeting EU", 150.0, 120.0),
    ]
}

/// JSON body for POST /v1/analysis/campaigns carrying the sample batch.
pub fn sample_batch_body() -> serde_json::Value {
    serde_json::json!({
        "campaigns": sample_batch(),
        "totalAccountSpend": 250.0
    })
}

// =============================================================================
// Mock Model Responses
// =============================================================================

/// Full chat completion envelope wrapping the given message content.
pub fn chat_response_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 320, "completion_tokens": 96, "total_tokens": 416}
    })
}

/// Verdict array covering the sample batch, in order.
pub fn sample_verdicts_content() -> String {
    serde_json::json!([
        {
            "index": 0,
            "verdict": "Excellent Performance",
            "analysis": "Strong return on spend.",
            "recommendations": "Scale the budget gradually."
        },
        {
            "index": 1,
            "verdict": "Poor Performance",
            "analysis": "Spend outpaces revenue.",
            "recommendations": "Tighten the audience."
        }
    ])
    .to_string()
}

// =============================================================================
// App Builders
// =============================================================================

/// Config whose secret lookups point at variables that are never set, so
/// the app starts with no model client and no Graph client.
///
/// Tests that need live credentials swap in unique per-test variable names
/// to keep the process-global environment race-free.
pub fn offline_config() -> MinerConfig {
    let mut config = MinerConfig::default();
    config.openai.api_key_env = UNSET_OPENAI_KEY_ENV.to_string();
    config.graph.access_token_env = UNSET_GRAPH_TOKEN_ENV.to_string();
    config
}

/// Create a test app from a config.
pub fn make_app(config: MinerConfig) -> axum::Router {
    let state = Arc::new(AppState::new(Arc::new(config)));
    create_router(state)
}

// =============================================================================
// Response Helpers
// =============================================================================

/// Collect a response body and parse it as JSON.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
