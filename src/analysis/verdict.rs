//! Verdict labels and text normalization for model output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of the analysis text, ellipsis included.
pub const ANALYSIS_MAX_CHARS: usize = 400;
/// Maximum length of the recommendations text, ellipsis included.
pub const RECOMMENDATIONS_MAX_CHARS: usize = 450;

/// Placeholder when the model returned an empty analysis.
const EMPTY_ANALYSIS: &str = "No analysis was provided for this campaign.";
/// Placeholder when the model returned empty recommendations.
const EMPTY_RECOMMENDATIONS: &str = "Re-run the analysis to get recommendations.";

/// Qualitative performance labels attached to analyzed campaigns.
///
/// The model may use the first five; `Error` is reserved for the pipeline
/// itself when an analysis run fails outside the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Excellent Performance")]
    Excellent,
    #[serde(rename = "Good Performance")]
    Good,
    #[serde(rename = "Average Performance")]
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Poor Performance")]
    Poor,
    #[serde(rename = "Error")]
    Error,
}

impl Verdict {
    /// Labels the model is allowed to use, in match priority order.
    pub const MODEL_LABELS: [Verdict; 5] = [
        Verdict::Excellent,
        Verdict::Good,
        Verdict::Average,
        Verdict::NeedsImprovement,
        Verdict::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent Performance",
            Verdict::Good => "Good Performance",
            Verdict::Average => "Average Performance",
            Verdict::NeedsImprovement => "Needs Improvement",
            Verdict::Poor => "Poor Performance",
            Verdict::Error => "Error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map free-form model text onto a fixed label.
///
/// Substring containment in declaration order, first match wins, so a label
/// embedded in prose ("Verdict: Good Performance.") still resolves. Anything
/// unrecognized lands on the neutral middle label.
pub fn normalize_verdict(raw: &str) -> Verdict {
    Verdict::MODEL_LABELS
        .iter()
        .copied()
        .find(|verdict| raw.contains(verdict.as_str()))
        .unwrap_or(Verdict::Average)
}

/// Clean an analysis string: collapse whitespace, trim, substitute a
/// placeholder when empty, truncate to the field budget.
pub fn clean_analysis(raw: &str) -> String {
    clean_text(raw, ANALYSIS_MAX_CHARS, EMPTY_ANALYSIS)
}

/// Clean a recommendations string. Same rules as [`clean_analysis`] with
/// the wider budget.
pub fn clean_recommendations(raw: &str) -> String {
    clean_text(raw, RECOMMENDATIONS_MAX_CHARS, EMPTY_RECOMMENDATIONS)
}

fn clean_text(raw: &str, max_chars: usize, placeholder: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return placeholder.to_string();
    }
    truncate_chars(&collapsed, max_chars)
}

/// Truncate to `max_chars` characters. The ellipsis counts against the
/// budget, so truncated output is exactly `max_chars` long.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_exact_labels() {
        assert_eq!(normalize_verdict("Excellent Performance"), Verdict::Excellent);
        assert_eq!(normalize_verdict("Good Performance"), Verdict::Good);
        assert_eq!(normalize_verdict("Average Performance"), Verdict::Average);
        assert_eq!(normalize_verdict("Needs Improvement"), Verdict::NeedsImprovement);
        assert_eq!(normalize_verdict("Poor Performance"), Verdict::Poor);
    }

    #[test]
    fn test_normalize_label_embedded_in_prose() {
        assert_eq!(
            normalize_verdict("Verdict: Good Performance, keep scaling."),
            Verdict::Good
        );
    }

    #[test]
    fn test_normalize_first_match_wins() {
        // Declaration order decides when several labels appear.
        assert_eq!(
            normalize_verdict("Good Performance trending toward Poor Performance"),
            Verdict::Good
        );
    }

    #[test]
    fn test_normalize_unknown_defaults_to_average() {
        assert_eq!(normalize_verdict("great campaign!"), Verdict::Average);
        assert_eq!(normalize_verdict(""), Verdict::Average);
        // Case-sensitive on purpose: the prompt dictates exact labels.
        assert_eq!(normalize_verdict("poor performance"), Verdict::Average);
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(
            clean_analysis("ROAS   is \n\n strong\tthis week"),
            "ROAS is strong this week"
        );
    }

    #[test]
    fn test_clean_empty_gets_placeholder() {
        assert_eq!(clean_analysis(""), "No analysis was provided for this campaign.");
        assert_eq!(clean_analysis("  \n\t "), "No analysis was provided for this campaign.");
        assert_eq!(
            clean_recommendations(""),
            "Re-run the analysis to get recommendations."
        );
    }

    #[test]
    fn test_clean_truncates_analysis_to_budget() {
        let long = "x".repeat(600);
        let cleaned = clean_analysis(&long);
        assert_eq!(cleaned.chars().count(), ANALYSIS_MAX_CHARS);
        assert!(cleaned.ends_with("..."));
        assert_eq!(&cleaned[..397], "x".repeat(397));
    }

    #[test]
    fn test_clean_truncates_recommendations_to_budget() {
        let long = "y".repeat(1000);
        let cleaned = clean_recommendations(&long);
        assert_eq!(cleaned.chars().count(), RECOMMENDATIONS_MAX_CHARS);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn test_clean_exact_budget_untouched() {
        let exact = "z".repeat(ANALYSIS_MAX_CHARS);
        assert_eq!(clean_analysis(&exact), exact);
    }

    #[test]
    fn test_clean_truncation_is_char_based() {
        // Multibyte input must not split a character.
        let long = "é".repeat(500);
        let cleaned = clean_analysis(&long);
        assert_eq!(cleaned.chars().count(), ANALYSIS_MAX_CHARS);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn test_verdict_display_matches_wire_format() {
        assert_eq!(Verdict::Excellent.to_string(), "Excellent Performance");
        assert_eq!(Verdict::Error.to_string(), "Error");
    }

    #[test]
    fn test_verdict_serde_uses_full_labels() {
        let json = serde_json::to_string(&Verdict::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
        let back: Verdict = serde_json::from_str("\"Poor Performance\"").unwrap();
        assert_eq!(back, Verdict::Poor);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Cleaned text never exceeds the field budget.
            #[test]
            fn prop_clean_respects_budget(input in "\\PC{0,1200}") {
                let analysis = clean_analysis(&input);
                let recs = clean_recommendations(&input);
                prop_assert!(analysis.chars().count() <= ANALYSIS_MAX_CHARS);
                prop_assert!(recs.chars().count() <= RECOMMENDATIONS_MAX_CHARS);
                prop_assert!(!analysis.is_empty());
                prop_assert!(!recs.is_empty());
            }

            /// Normalization always lands on one of the model labels.
            #[test]
            fn prop_normalize_total(input in "\\PC{0,200}") {
                let verdict = normalize_verdict(&input);
                prop_assert!(Verdict::MODEL_LABELS.contains(&verdict));
            }

            /// Cleaning is idempotent.
            #[test]
            fn prop_clean_idempotent(input in "\\PC{0,600}") {
                let once = clean_analysis(&input);
                prop_assert_eq!(clean_analysis(&once), once.clone());
            }
        }
    }
}
