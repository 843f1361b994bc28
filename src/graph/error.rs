//! Error types for Graph API operations.

use thiserror::Error;

/// Errors that can occur while talking to the Meta Graph API.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Graph returned a structured error envelope.
    #[error("Graph API error {code} ({error_type}): {message}")]
    Api {
        code: i64,
        error_type: String,
        message: String,
    },

    /// Graph returned a failure without the standard error envelope.
    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
