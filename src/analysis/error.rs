//! Error types for the analysis pipeline.

use thiserror::Error;

/// Failures the analysis pipeline cannot absorb with a fallback verdict.
///
/// Model-side failures (network, bad output) never surface here; they are
/// converted into fallback verdicts so a batch always gets a result.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Prompt serialization failed: {0}")]
    PromptSerialization(#[from] serde_json::Error),
}
