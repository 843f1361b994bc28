//! CLI module for InterestMiner
//!
//! Command-line interface definitions and handlers for the InterestMiner
//! analytics service.
//!
//! # Commands
//!
//! - `serve` - Start the InterestMiner API server
//! - `analyze` - Analyze a batch of campaigns from a JSON file
//! - `interests` - Search or suggest Meta ad targeting interests
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! interestminer serve
//!
//! # Analyze campaigns exported to a JSON file
//! interestminer analyze campaigns.json --json
//!
//! # Look up targeting interests
//! interestminer interests "running shoes" --limit 10
//!
//! # Generate shell completions
//! interestminer completions bash > ~/.bash_completion.d/interestminer
//! ```

pub mod analyze;
pub mod completions;
pub mod config;
pub mod interests;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// InterestMiner - Meta ads analytics and interest mining
#[derive(Parser, Debug)]
#[command(
    name = "interestminer",
    version,
    about = "Meta ads campaign analytics and interest mining service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the InterestMiner server
    Serve(ServeArgs),
    /// Analyze campaigns from a JSON file
    Analyze(AnalyzeArgs),
    /// Search Meta ad targeting interests
    Interests(InterestsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "interestminer.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "INTERESTMINER_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "INTERESTMINER_HOST")]
    pub host: Option<String>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "INTERESTMINER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to a JSON file with campaign metrics
    pub input: PathBuf,

    /// Total account spend used for spend-share percentages
    ///
    /// Defaults to the sum of the spend of the campaigns in the file.
    #[arg(long)]
    pub spend_total: Option<f64>,

    /// Output as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "interestminer.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct InterestsArgs {
    /// Search query (or comma-separated seed interests with --suggest)
    pub query: String,

    /// Maximum number of interests to return
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Suggest related interests instead of searching by keyword
    #[arg(long)]
    pub suggest: bool,

    /// Output as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "interestminer.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate a default configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = "interestminer.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
