//! Structured logging utilities
//!
//! Filter directive construction for the tracing subscriber and request ID
//! generation for correlating log lines across a request.

use uuid::Uuid;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```no_run
/// use interestminer::config::logging::LoggingConfig;
/// use interestminer::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("analysis".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: interestminer::config::logging::LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     log_prompts: false,
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,interestminer::analysis=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",interestminer::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a new request ID using UUID v4
///
/// Returns a unique correlation ID that can be used to track a request
/// through the pipeline, including retries and fallbacks.
///
/// # Examples
///
/// ```
/// use interestminer::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
