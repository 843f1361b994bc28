//! Deterministic verdicts used when the model is unavailable or unusable.

use super::types::AiVerdict;
use super::verdict::Verdict;

pub const FALLBACK_ANALYSIS: &str =
    "AI analysis was unavailable for this run. The calculated KPIs above are \
     complete and accurate; only the qualitative assessment is missing.";

pub const FALLBACK_RECOMMENDATIONS: &str =
    "Retry the analysis once the AI service is reachable. In the meantime, \
     compare ROAS and CPA against your account averages to prioritize budget.";

/// Neutral-pessimistic verdict for a single campaign position.
pub fn fallback_verdict(index: usize) -> AiVerdict {
    AiVerdict {
        index,
        verdict: Verdict::NeedsImprovement,
        analysis: FALLBACK_ANALYSIS.to_string(),
        recommendations: FALLBACK_RECOMMENDATIONS.to_string(),
    }
}

/// One fallback verdict per campaign, indexed by position.
pub fn fallback_verdicts(count: usize) -> Vec<AiVerdict> {
    (0..count).map(fallback_verdict).collect()
}
