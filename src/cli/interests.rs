//! Interests command implementation

use crate::cli::output::{format_interests_json, format_interests_table};
use crate::cli::InterestsArgs;
use crate::config::MinerConfig;
use crate::graph::GraphClient;
use std::sync::Arc;
use std::time::Duration;

fn load_config(args: &InterestsArgs) -> Result<MinerConfig, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        MinerConfig::load(Some(&args.config))?
    } else {
        MinerConfig::default()
    };
    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Main interests command handler
pub async fn run_interests(args: InterestsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args)?;

    let access_token = config.graph.resolve_access_token().ok_or_else(|| {
        format!(
            "{} is not set. Interest search requires a Meta access token.",
            config.graph.access_token_env
        )
    })?;

    let http_client = Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(config.graph.request_timeout_seconds))
            .build()?,
    );
    let graph = GraphClient::new(
        config.graph.base_url.clone(),
        config.graph.api_version.clone(),
        access_token,
        Duration::from_secs(config.graph.request_timeout_seconds),
        http_client,
    );

    let limit = args
        .limit
        .unwrap_or(config.graph.default_search_limit)
        .clamp(1, 1000);

    let interests = if args.suggest {
        let seeds: Vec<String> = args
            .query
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if seeds.is_empty() {
            return Err("At least one seed interest is required with --suggest".into());
        }
        graph.suggest_interests(&seeds, limit).await?
    } else {
        let query = args.query.trim();
        if query.is_empty() {
            return Err("A search query is required".into());
        }
        graph.search_interests(query, limit).await?
    };

    if args.json {
        println!("{}", format_interests_json(&interests));
    } else {
        println!("{}", format_interests_table(&interests));
    }

    Ok(())
}
