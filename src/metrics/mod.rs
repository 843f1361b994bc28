//! # Metrics Collection Module
//!
//! Provides request metrics tracking, Prometheus export, and JSON stats API.
//!
//! ## Overview
//!
//! This module exposes two endpoints:
//! - `GET /metrics` - Prometheus text format metrics
//! - `GET /v1/stats` - JSON format statistics
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `interestminer_analysis_total{outcome}` - Analysis batches by outcome (ai, fallback, error)
//! - `interestminer_llm_tokens_total{type}` - Tokens consumed (prompt, completion)
//! - `interestminer_interest_searches_total{result}` - Interest lookups (hit, miss, error)
//!
//! **Histograms:**
//! - `interestminer_analysis_duration_seconds{model}` - End-to-end analysis duration

pub mod handler;
pub mod types;

pub use types::*;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use dashmap::DashMap;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

/// Central coordinator for metrics rendering and label hygiene.
pub struct MetricsCollector {
    /// Service startup time for uptime calculation
    start_time: Instant,
    /// Thread-safe cache for sanitized Prometheus labels
    label_cache: DashMap<String, String>,
    /// Prometheus handle for rendering metrics
    prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl MetricsCollector {
    /// Create a new MetricsCollector.
    pub fn new(
        start_time: Instant,
        prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            start_time,
            label_cache: DashMap::new(),
            prometheus_handle,
        }
    }

    /// Get sanitized Prometheus label (cached for performance).
    ///
    /// Prometheus label names must match regex: `[a-zA-Z_][a-zA-Z0-9_]*`
    /// This function replaces invalid characters with underscores.
    pub fn sanitize_label(&self, label: &str) -> String {
        // Check cache first
        if let Some(cached) = self.label_cache.get(label) {
            return cached.clone();
        }

        // Sanitize: replace non-alphanumeric (except underscore) with underscore
        let mut sanitized = label
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>();

        // Ensure first character is not a digit
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized.insert(0, '_');
        }

        // Cache and return
        self.label_cache
            .insert(label.to_string(), sanitized.clone());
        sanitized
    }

    /// Get uptime in seconds since service startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// In-process counters backing GET /v1/stats.
///
/// Prometheus counters can't be read back through the recorder, so the stats
/// endpoint keeps its own atomics.
#[derive(Debug, Default)]
pub struct UsageStats {
    pub analysis_requests: AtomicU64,
    pub campaigns_analyzed: AtomicU64,
    pub interest_searches: AtomicU64,
    pub search_cache_hits: AtomicU64,
    pub search_errors: AtomicU64,
}

/// Initialize Prometheus metrics exporter with custom histogram buckets.
///
/// Buckets are sized for LLM-bound request latency (seconds, not
/// milliseconds): [0.1, 0.25, 0.5, 1, 2.5, 5, 10, 30, 60, 120, 300].
///
/// Returns a PrometheusHandle that can be used to render metrics.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let duration_buckets = &[
        0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("interestminer_analysis_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
