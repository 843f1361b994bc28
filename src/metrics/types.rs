//! # Metrics Types
//!
//! Data structures for the JSON stats API response.

use serde::Serialize;

/// JSON response for GET /v1/stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Service uptime in seconds since startup
    pub uptime_seconds: u64,
    /// Campaign analysis statistics
    pub analysis: AnalysisStats,
    /// Interest search statistics
    pub interests: InterestStats,
}

/// Campaign analysis statistics.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStats {
    /// Analysis batches processed
    pub requests: u64,
    /// Individual campaigns analyzed across all batches
    pub campaigns: u64,
}

/// Interest search statistics.
#[derive(Debug, Clone, Serialize)]
pub struct InterestStats {
    /// Search and suggestion requests served
    pub searches: u64,
    /// Requests answered from the TTL cache
    pub cache_hits: u64,
    /// Requests that failed against the Graph API
    pub errors: u64,
}
