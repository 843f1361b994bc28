//! # HTTP API
//!
//! REST endpoints for the InterestMiner analytics backend.
//!
//! This module implements the HTTP server consumed by the dashboard UI:
//! campaign analysis, interest discovery, and operational endpoints.
//!
//! ## Endpoints
//!
//! - `POST /v1/analysis/campaigns` - Analyze a batch of campaign totals
//! - `GET /v1/interests/search` - Keyword search for targetable interests
//! - `GET /v1/interests/suggestions` - Suggestions from seed interests
//! - `GET /health` - Service health and dependency status
//! - `GET /metrics` - Prometheus text format metrics
//! - `GET /v1/stats` - JSON usage statistics
//!
//! ## Example
//!
//! ```no_run
//! use interestminer::api::{create_router, AppState};
//! use interestminer::config::MinerConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(MinerConfig::default());
//!
//! // Create application state
//! let state = Arc::new(AppState::new(config));
//!
//! // Create router with all endpoints
//! let app = create_router(state);
//!
//! // Start server
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Route errors use a stable JSON envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Query parameter 'q' is required",
//!     "type": "invalid_request_error",
//!     "code": "invalid_request_error"
//!   }
//! }
//! ```
//!
//! The analysis route never errors on model failure: fallback verdicts keep
//! it a 200 so the dashboard always renders.

mod analysis;
mod health;
mod interests;
pub mod types;

pub use types::*;

use crate::analysis::CampaignAnalyzer;
use crate::config::MinerConfig;
use crate::graph::{GraphClient, SearchCache};
use crate::llm::{ChatApi, OpenAiClient};
use crate::metrics::{MetricsCollector, UsageStats};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (10 MB).
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<MinerConfig>,
    /// Analysis pipeline; works without a chat client (fallback verdicts).
    pub analyzer: CampaignAnalyzer,
    /// Graph client; None when no access token is configured.
    pub graph: Option<GraphClient>,
    pub search_cache: SearchCache,
    pub usage: UsageStats,
    /// Metrics collector for observability
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Create new application state from configuration.
    ///
    /// Secrets are resolved from the environment here, once. A missing key
    /// or token degrades the corresponding feature instead of failing
    /// startup.
    pub fn new(config: Arc<MinerConfig>) -> Self {
        let timeout_secs = config.server.request_timeout_seconds;

        let http_client = Arc::new(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .pool_max_idle_per_host(10)
                .build()
                .expect("Failed to create HTTP client"),
        );

        let chat_client: Option<Arc<dyn ChatApi>> = match config.openai.resolve_api_key() {
            Some(api_key) => Some(Arc::new(OpenAiClient::new(
                config.openai.base_url.clone(),
                api_key,
                Duration::from_secs(config.openai.request_timeout_seconds),
                Arc::clone(&http_client),
            ))),
            None => {
                tracing::warn!(
                    env = %config.openai.api_key_env,
                    "No OpenAI API key in environment, analysis will use fallback verdicts"
                );
                None
            }
        };

        let analyzer = CampaignAnalyzer::new(config.openai.clone(), chat_client)
            .with_prompt_logging(config.logging.log_prompts);

        let graph = match config.graph.resolve_access_token() {
            Some(access_token) => Some(GraphClient::new(
                config.graph.base_url.clone(),
                config.graph.api_version.clone(),
                access_token,
                Duration::from_secs(config.graph.request_timeout_seconds),
                http_client,
            )),
            None => {
                tracing::warn!(
                    env = %config.graph.access_token_env,
                    "No Graph access token in environment, interest search disabled"
                );
                None
            }
        };

        let search_cache = SearchCache::new(&config.cache);
        let start_time = Instant::now();

        // Initialize metrics (safe to call multiple times - will reuse existing if already set)
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            // If metrics are already initialized (e.g., in tests), create a new handle
            // by building a recorder without installing it globally
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            crate::metrics::PrometheusBuilder::new()
                .build_recorder()
                .handle()
        });

        let metrics_collector = Arc::new(MetricsCollector::new(start_time, prometheus_handle));

        Self {
            config,
            analyzer,
            graph,
            search_cache,
            usage: UsageStats::default(),
            metrics_collector,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/v1/analysis/campaigns", post(analysis::handle))
        .route("/v1/interests/search", get(interests::handle_search))
        .route("/v1/interests/suggestions", get(interests::handle_suggestions))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .route("/v1/stats", get(crate::metrics::handler::stats_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(request_timeout))
        // The dashboard is served from a different origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
