//! Configuration module for InterestMiner
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`INTERESTMINER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! Secrets are never read from the file: the `[openai]` and `[graph]`
//! sections name environment variables instead.
//!
//! # Example
//!
//! ```rust
//! use interestminer::config::MinerConfig;
//!
//! // Load defaults
//! let config = MinerConfig::default();
//! assert_eq!(config.server.port, 8080);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: MinerConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod cache;
pub mod error;
pub mod graph;
pub mod logging;
pub mod openai;
pub mod server;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use graph::GraphConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use openai::OpenAiConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Unified configuration for the InterestMiner server.
///
/// Aggregates all configuration sections: HTTP server, logging, the OpenAI
/// analysis backend, the Graph API client, and the search cache.
///
/// # Example
///
/// ```rust
/// use interestminer::config::MinerConfig;
///
/// let config = MinerConfig::default();
/// assert_eq!(config.server.port, 8080);
/// assert_eq!(config.graph.api_version, "v19.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MinerConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Chat completion backend for analysis
    pub openai: OpenAiConfig,
    /// Graph API client for interest search
    pub graph: GraphConfig,
    /// Interest search cache
    pub cache: CacheConfig,
}

impl MinerConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports INTERESTMINER_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Server settings
        if let Ok(port) = std::env::var("INTERESTMINER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("INTERESTMINER_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Ok(level) = std::env::var("INTERESTMINER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INTERESTMINER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: format!("unknown log level '{}'", self.logging.level),
            });
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(ConfigError::Validation {
                field: "openai.temperature".to_string(),
                message: "temperature must be between 0.0 and 2.0".to_string(),
            });
        }
        if self.openai.max_output_tokens == 0 {
            return Err(ConfigError::Validation {
                field: "openai.max_output_tokens".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        if self.openai.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "openai.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        // "v19.0" style version tags only.
        if !self.graph.api_version.starts_with('v') || self.graph.api_version.len() < 2 {
            return Err(ConfigError::Validation {
                field: "graph.api_version".to_string(),
                message: format!(
                    "expected a version tag like 'v19.0', got '{}'",
                    self.graph.api_version
                ),
            });
        }
        if self.graph.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "graph.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if !(1..=1000).contains(&self.graph.default_search_limit) {
            return Err(ConfigError::Validation {
                field: "graph.default_search_limit".to_string(),
                message: "limit must be between 1 and 1000".to_string(),
            });
        }

        if self.cache.enabled {
            if self.cache.ttl_seconds == 0 {
                return Err(ConfigError::Validation {
                    field: "cache.ttl_seconds".to_string(),
                    message: "TTL must be non-zero when the cache is enabled".to_string(),
                });
            }
            if self.cache.max_entries == 0 {
                return Err(ConfigError::Validation {
                    field: "cache.max_entries".to_string(),
                    message: "capacity must be non-zero when the cache is enabled".to_string(),
                });
            }
        }

        Ok(())
    }
}
