//! OpenAI backend configuration

use serde::{Deserialize, Serialize};

/// Chat completion backend configuration.
///
/// The API key itself never lives in the config file; `api_key_env` names
/// the environment variable to read it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Base URL (e.g., "https://api.openai.com"). Point it at any
    /// OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model used for campaign analysis.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout_seconds: u64,
    /// Retry a failed completion once before falling back.
    pub retry_on_failure: bool,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.2,
            max_output_tokens: 4096,
            request_timeout_seconds: 120,
            retry_on_failure: false,
        }
    }
}

impl OpenAiConfig {
    /// Read the API key from the configured environment variable. Unset or
    /// empty means no key.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}
