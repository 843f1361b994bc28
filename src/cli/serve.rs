//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, MinerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<MinerConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        MinerConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        MinerConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Build filter directives using helper function
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Warn if prompt logging is enabled
    if config.log_prompts {
        eprintln!("WARNING: Prompt logging is enabled. Full model prompts will be logged.");
        eprintln!("         Prompts contain campaign metrics. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Start the search cache sweeper background task.
/// Returns a JoinHandle that resolves when the sweeper stops.
fn start_cache_sweeper(state: Arc<AppState>, cancel_token: CancellationToken) -> JoinHandle<()> {
    // Sweep once per TTL period; a zero TTL would panic tokio's interval.
    let period = Duration::from_secs(state.config.cache.ttl_seconds.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(
            period_seconds = period.as_secs(),
            "Search cache sweeper started"
        );

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::info!("Search cache sweeper shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = state.search_cache.sweep();
                    if removed > 0 {
                        tracing::debug!(removed, "Swept expired search cache entries");
                    }
                }
            }
        }
    })
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;

    // Validate configuration
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting InterestMiner server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Build application state and router
    let config_arc = Arc::new(config.clone());
    let state = Arc::new(AppState::new(config_arc));
    let app = create_router(Arc::clone(&state));

    // 4. Start the cache sweeper (if caching is enabled)
    let cancel_token = CancellationToken::new();
    let sweeper_handle = if config.cache.enabled {
        Some(start_cache_sweeper(
            Arc::clone(&state),
            cancel_token.clone(),
        ))
    } else {
        tracing::info!("Search cache disabled");
        None
    };

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "InterestMiner API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    // 6. Cleanup
    if let Some(handle) = sweeper_handle {
        tracing::info!("Waiting for cache sweeper to stop");
        handle.await?;
    }

    tracing::info!("InterestMiner server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn serve_args(config: PathBuf) -> ServeArgs {
        ServeArgs {
            config,
            port: None,
            host: None,
            log_level: None,
        }
    }

    #[tokio::test]
    async fn test_serve_config_loading() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let args = serve_args(temp.path().to_path_buf());
        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_serve_cli_overrides_config() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let mut args = serve_args(temp.path().to_path_buf());
        args.port = Some(9000); // Override
        args.host = Some("127.0.0.1".to_string());

        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 9000); // CLI wins
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_serve_works_without_config_file() {
        let args = serve_args(PathBuf::from("nonexistent.toml"));
        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 8080); // Default
    }

    #[tokio::test]
    async fn test_serve_log_level_override_applies() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[logging]\nlevel = \"info\"").unwrap();

        let mut args = serve_args(temp.path().to_path_buf());
        args.log_level = Some("debug".to_string());

        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_shutdown_signal_triggers_cancel() {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        let handle = tokio::spawn(async move {
            // Simulate shutdown after 100ms
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel_clone.cancel();
        });

        // This should return when cancelled
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(Duration::from_secs(5)) => {
                panic!("Shutdown didn't trigger");
            }
        }

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cache_sweeper_stops_on_shutdown() {
        let state = Arc::new(AppState::new(Arc::new(MinerConfig::default())));

        let cancel = CancellationToken::new();
        let handle = start_cache_sweeper(Arc::clone(&state), cancel.clone());

        // Let it run briefly
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Trigger shutdown
        cancel.cancel();

        // Should complete quickly
        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }
}
