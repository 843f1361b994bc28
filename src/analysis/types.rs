//! Campaign data shapes shared across the analysis pipeline.

use super::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Aggregated campaign totals as delivered by the upstream insights sync.
///
/// Every numeric field defaults to zero so partially delivered campaigns
/// (paused early, no conversions yet) deserialize cleanly. The `ctr`, `cpm`,
/// `cpc`, `cpa` and `roas` fields carry upstream-precomputed averages where
/// available; enrichment recomputes the last three from the totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignTotals {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub spend: f64,
    pub revenue: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub purchases: f64,
    pub add_to_cart: f64,
    pub initiate_checkout: f64,
    pub add_payment_info: f64,
    pub reach: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub roas: f64,
}

/// A campaign with derived KPIs attached.
///
/// Original totals are preserved verbatim except `cpc`, `cpa` and `roas`,
/// which are recomputed from the totals and replace any upstream values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCampaign {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub spend: f64,
    pub revenue: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub purchases: f64,
    pub add_to_cart: f64,
    pub initiate_checkout: f64,
    pub add_payment_info: f64,
    pub reach: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub roas: f64,
    pub add_to_cart_rate: f64,
    pub checkout_rate: f64,
    pub purchase_rate: f64,
    pub conversion_rate: f64,
    pub spend_share: f64,
    pub funnel_efficiency: String,
}

/// One verdict record per campaign, merged back by `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiVerdict {
    pub index: usize,
    pub verdict: Verdict,
    pub analysis: String,
    pub recommendations: String,
}

/// Final pipeline output: the enriched campaign plus the AI verdict fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedCampaign {
    #[serde(flatten)]
    pub campaign: EnrichedCampaign,
    pub ai_verdict: Verdict,
    pub ai_analysis: String,
    pub ai_recommendations: String,
}
