//! Meta Graph API client for interest discovery.
//!
//! Two read-only operations against the Graph `/search` endpoint: keyword
//! search (`type=adinterest`) and seed-based suggestions
//! (`type=adinterestsuggestion`). Both return the standard `{"data": [...]}`
//! envelope; failures arrive as Graph's error envelope with an OAuth-style
//! code.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub mod cache;
pub mod error;
pub mod types;

pub use cache::SearchCache;
pub use error::GraphError;
pub use types::Interest;

use types::{DataEnvelope, GraphErrorEnvelope};

/// Longest upstream error body carried into an error message.
const ERROR_BODY_EXCERPT: usize = 300;

/// Client for the Graph search endpoint.
///
/// The underlying HTTP client is shared for connection pooling. The access
/// token rides along as a query parameter, which is how Graph expects it.
pub struct GraphClient {
    /// Base URL (e.g., "https://graph.facebook.com"), no trailing slash.
    base_url: String,
    /// Pinned API version (e.g., "v19.0").
    api_version: String,
    /// Long-lived Marketing API access token.
    access_token: String,
    /// Per-request deadline.
    timeout: Duration,
    /// Shared HTTP client for connection pooling.
    client: Arc<Client>,
}

impl GraphClient {
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_version: api_version.into(),
            access_token: access_token.into(),
            timeout,
            client,
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn search_url(&self) -> String {
        format!("{}/{}/search", self.base_url, self.api_version)
    }

    /// Keyword search for targetable interests.
    pub async fn search_interests(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Interest>, GraphError> {
        let limit = limit.to_string();
        let params = [("type", "adinterest"), ("q", query), ("limit", &limit)];
        self.get_data(&params).await
    }

    /// Suggestions related to a set of seed interest names.
    pub async fn suggest_interests(
        &self,
        seeds: &[String],
        limit: u32,
    ) -> Result<Vec<Interest>, GraphError> {
        // Graph wants the seed list as a JSON array in a query parameter.
        let interest_list = serde_json::to_string(seeds)
            .map_err(|e| GraphError::InvalidRequest(format!("Bad seed list: {}", e)))?;
        let limit = limit.to_string();
        let params = [
            ("type", "adinterestsuggestion"),
            ("interest_list", &interest_list),
            ("limit", &limit),
        ];
        self.get_data(&params).await
    }

    async fn get_data(&self, params: &[(&str, &str)]) -> Result<Vec<Interest>, GraphError> {
        let response = self
            .client
            .get(self.search_url())
            .query(params)
            .query(&[("access_token", self.access_token.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GraphError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    GraphError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphError::InvalidResponse(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<GraphErrorEnvelope>(&body) {
                return Err(GraphError::Api {
                    code: envelope.error.code,
                    error_type: envelope.error.error_type,
                    message: envelope.error.message,
                });
            }
            return Err(GraphError::Upstream {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        let envelope: DataEnvelope<Interest> = serde_json::from_str(&body)
            .map_err(|e| GraphError::InvalidResponse(format!("Failed to parse Graph response: {}", e)))?;

        Ok(envelope.data)
    }
}

/// Trim an upstream error body down to a loggable excerpt.
fn excerpt(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_EXCERPT {
        return body.to_string();
    }
    body.chars().take(ERROR_BODY_EXCERPT).collect()
}
