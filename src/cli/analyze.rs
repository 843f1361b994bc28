//! Analyze command implementation

use crate::analysis::{total_spend, CampaignAnalyzer, CampaignTotals};
use crate::cli::output::{format_analysis_json, format_analysis_table};
use crate::cli::AnalyzeArgs;
use crate::config::MinerConfig;
use crate::llm::{ChatApi, OpenAiClient};
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

/// Input file shape. Accepts either a bare array of campaign totals or the
/// same envelope the HTTP API takes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzeInput {
    #[serde(rename_all = "camelCase")]
    Wrapped {
        campaigns: Vec<CampaignTotals>,
        #[serde(default)]
        total_account_spend: Option<f64>,
    },
    Bare(Vec<CampaignTotals>),
}

fn load_config(args: &AnalyzeArgs) -> Result<MinerConfig, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        MinerConfig::load(Some(&args.config))?
    } else {
        MinerConfig::default()
    };
    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Main analyze command handler
pub async fn run_analyze(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args)?;

    let raw = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;
    let (campaigns, file_total) = match serde_json::from_str::<AnalyzeInput>(&raw)? {
        AnalyzeInput::Wrapped {
            campaigns,
            total_account_spend,
        } => (campaigns, total_account_spend),
        AnalyzeInput::Bare(campaigns) => (campaigns, None),
    };

    let total_account_spend = args
        .spend_total
        .or(file_total)
        .unwrap_or_else(|| total_spend(&campaigns));

    let chat_client: Option<Arc<dyn ChatApi>> = match config.openai.resolve_api_key() {
        Some(api_key) => {
            let http_client = Arc::new(
                reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.openai.request_timeout_seconds))
                    .build()?,
            );
            Some(Arc::new(OpenAiClient::new(
                config.openai.base_url.clone(),
                api_key,
                Duration::from_secs(config.openai.request_timeout_seconds),
                http_client,
            )))
        }
        None => {
            eprintln!(
                "Note: {} is not set, producing fallback verdicts without AI analysis.",
                config.openai.api_key_env
            );
            None
        }
    };

    let analyzer = CampaignAnalyzer::new(config.openai.clone(), chat_client)
        .with_prompt_logging(config.logging.log_prompts);
    let analyzed = analyzer.analyze(&campaigns, total_account_spend).await;

    if args.json {
        println!("{}", format_analysis_json(&analyzed));
    } else {
        println!("{}", format_analysis_table(&analyzed));
    }

    Ok(())
}
