//! Meta Graph API configuration

use serde::{Deserialize, Serialize};

/// Graph API configuration for interest search.
///
/// Like the OpenAI section, the access token is resolved from the
/// environment variable named by `access_token_env`, never from the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub base_url: String,
    /// Pinned Graph API version (e.g., "v19.0").
    pub api_version: String,
    /// Environment variable holding the Marketing API access token.
    pub access_token_env: String,
    pub request_timeout_seconds: u64,
    /// Result count when the caller doesn't ask for a specific limit.
    pub default_search_limit: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.facebook.com".to_string(),
            api_version: "v19.0".to_string(),
            access_token_env: "META_ACCESS_TOKEN".to_string(),
            request_timeout_seconds: 15,
            default_search_limit: 25,
        }
    }
}

impl GraphConfig {
    /// Read the access token from the configured environment variable.
    /// Unset or empty means no token.
    pub fn resolve_access_token(&self) -> Option<String> {
        std::env::var(&self.access_token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }
}
