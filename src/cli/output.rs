//! Output formatting helpers for CLI commands

use crate::analysis::{AnalyzedCampaign, Verdict};
use crate::graph::Interest;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format analyzed campaigns as a table
pub fn format_analysis_table(campaigns: &[AnalyzedCampaign]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Campaign", "Spend", "ROAS", "CPA", "Conv %", "Spend %", "Verdict",
    ]);

    for c in campaigns {
        table.add_row(vec![
            Cell::new(&c.campaign.name),
            Cell::new(format!("{:.2}", c.campaign.spend)),
            Cell::new(format!("{:.2}", c.campaign.roas)),
            Cell::new(format!("{:.2}", c.campaign.cpa)),
            Cell::new(format!("{:.2}", c.campaign.conversion_rate)),
            Cell::new(format!("{:.2}", c.campaign.spend_share)),
            Cell::new(colored_verdict(c.ai_verdict)),
        ]);
    }

    table.to_string()
}

/// Format analyzed campaigns as JSON
pub fn format_analysis_json(campaigns: &[AnalyzedCampaign]) -> String {
    serde_json::to_string_pretty(&json!({
        "campaigns": campaigns
    }))
    .unwrap()
}

/// Format interests as a table
pub fn format_interests_table(interests: &[Interest]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Audience", "Path", "Topic"]);

    for i in interests {
        let audience = format!(
            "{} - {}",
            format_audience(i.audience_size_lower_bound),
            format_audience(i.audience_size_upper_bound)
        );
        table.add_row(vec![
            Cell::new(&i.name),
            Cell::new(audience),
            Cell::new(i.path.join(" > ")),
            Cell::new(i.topic.as_deref().unwrap_or("-")),
        ]);
    }

    table.to_string()
}

/// Format interests as JSON
pub fn format_interests_json(interests: &[Interest]) -> String {
    serde_json::to_string_pretty(&json!({
        "data": interests
    }))
    .unwrap()
}

/// Colored verdict label for terminal tables
pub fn colored_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Excellent => verdict.as_str().green().bold().to_string(),
        Verdict::Good => verdict.as_str().green().to_string(),
        Verdict::Average => verdict.as_str().yellow().to_string(),
        Verdict::NeedsImprovement => verdict.as_str().yellow().to_string(),
        Verdict::Poor => verdict.as_str().red().to_string(),
        Verdict::Error => verdict.as_str().red().bold().to_string(),
    }
}

/// Compact audience size for table cells (e.g., "1.2M")
fn format_audience(size: u64) -> String {
    if size >= 1_000_000_000 {
        format!("{:.1}B", size as f64 / 1_000_000_000.0)
    } else if size >= 1_000_000 {
        format!("{:.1}M", size as f64 / 1_000_000.0)
    } else if size >= 1_000 {
        format!("{:.1}K", size as f64 / 1_000.0)
    } else {
        size.to_string()
    }
}
