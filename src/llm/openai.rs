//! OpenAI-compatible chat completion client.

use super::{ChatApi, ChatCompletionRequest, ChatCompletionResponse, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Longest upstream error body carried into an error message.
const ERROR_BODY_EXCERPT: usize = 300;

/// Chat completion client for OpenAI and API-compatible backends.
///
/// Calls POST /v1/chat/completions with Bearer token authentication. The
/// underlying HTTP client is shared for connection pooling.
pub struct OpenAiClient {
    /// Base URL (e.g., "https://api.openai.com"), no trailing slash.
    base_url: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Per-request deadline.
    timeout: Duration,
    /// Shared HTTP client for connection pooling.
    client: Arc<Client>,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            timeout,
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatApi for OpenAiClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: excerpt(&error_body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        Ok(completion)
    }
}

/// Trim an upstream error body down to a loggable excerpt.
fn excerpt(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_EXCERPT {
        return body.to_string();
    }
    body.chars().take(ERROR_BODY_EXCERPT).collect()
}
