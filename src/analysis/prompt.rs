//! Prompt construction for the campaign analysis model call.

use serde::Serialize;

use super::enrich::round2;
use super::types::EnrichedCampaign;
use super::verdict::Verdict;

/// System role for every analysis request.
pub const SYSTEM_PROMPT: &str = "You are a senior Meta Ads performance analyst. \
You evaluate e-commerce ad campaigns against industry benchmarks and respond \
with valid JSON only, never markdown or prose.";

/// Reference numbers quoted to the model for context.
#[derive(Debug, Clone, Copy)]
pub struct Benchmarks {
    pub ctr_pct: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub roas_good: f64,
    pub roas_excellent: f64,
}

/// E-commerce industry baselines for Meta placements.
pub const ECOMMERCE_BENCHMARKS: Benchmarks = Benchmarks {
    ctr_pct: 1.5,
    cpm: 15.0,
    cpc: 0.80,
    cpa: 30.0,
    roas_good: 3.0,
    roas_excellent: 4.0,
};

/// Account-level averages quoted alongside the per-campaign numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountAverages {
    pub roas: f64,
    pub ctr: f64,
}

/// Mean ROAS and CTR across the batch, rounded to 2 decimals. Zero for an
/// empty batch.
pub fn account_averages(campaigns: &[EnrichedCampaign]) -> AccountAverages {
    if campaigns.is_empty() {
        return AccountAverages { roas: 0.0, ctr: 0.0 };
    }
    let count = campaigns.len() as f64;
    let roas_sum: f64 = campaigns.iter().map(|c| c.roas).sum();
    let ctr_sum: f64 = campaigns.iter().map(|c| c.ctr).sum();
    AccountAverages {
        roas: round2(roas_sum / count),
        ctr: round2(ctr_sum / count),
    }
}

/// Per-campaign view serialized into the prompt. The `index` field is how
/// verdicts are matched back to campaigns.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptCampaign<'a> {
    index: usize,
    name: &'a str,
    objective: &'a str,
    spend: f64,
    revenue: f64,
    clicks: f64,
    impressions: f64,
    purchases: f64,
    ctr: f64,
    cpm: f64,
    cpc: f64,
    cpa: f64,
    roas: f64,
    add_to_cart_rate: f64,
    checkout_rate: f64,
    purchase_rate: f64,
    conversion_rate: f64,
    spend_share: f64,
    funnel_efficiency: &'a str,
}

impl<'a> PromptCampaign<'a> {
    fn new(index: usize, campaign: &'a EnrichedCampaign) -> Self {
        Self {
            index,
            name: &campaign.name,
            objective: &campaign.objective,
            spend: campaign.spend,
            revenue: campaign.revenue,
            clicks: campaign.clicks,
            impressions: campaign.impressions,
            purchases: campaign.purchases,
            ctr: campaign.ctr,
            cpm: campaign.cpm,
            cpc: campaign.cpc,
            cpa: campaign.cpa,
            roas: campaign.roas,
            add_to_cart_rate: campaign.add_to_cart_rate,
            checkout_rate: campaign.checkout_rate,
            purchase_rate: campaign.purchase_rate,
            conversion_rate: campaign.conversion_rate,
            spend_share: campaign.spend_share,
            funnel_efficiency: &campaign.funnel_efficiency,
        }
    }
}

/// Build the user prompt for a batch of enriched campaigns.
///
/// The output contract pins the array length to the batch size and the
/// verdict wording to the fixed label set, which is what makes downstream
/// parsing reliable.
pub fn build_prompt(campaigns: &[EnrichedCampaign]) -> Result<String, serde_json::Error> {
    let payload: Vec<PromptCampaign<'_>> = campaigns
        .iter()
        .enumerate()
        .map(|(index, campaign)| PromptCampaign::new(index, campaign))
        .collect();
    let payload_json = serde_json::to_string_pretty(&payload)?;

    let averages = account_averages(campaigns);
    let b = ECOMMERCE_BENCHMARKS;
    let labels = Verdict::MODEL_LABELS
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "Analyze the following {count} Meta ad campaign(s) for an e-commerce account.\n\
         \n\
         Industry benchmarks: CTR {ctr}%, CPM ${cpm:.2}, CPC ${cpc:.2}, CPA ${cpa:.2}, \
         ROAS {roas_good:.1} is good and {roas_excellent:.1}+ is excellent.\n\
         Account averages for this batch: ROAS {avg_roas:.2}, CTR {avg_ctr:.2}%.\n\
         \n\
         Campaign data:\n\
         {payload_json}\n\
         \n\
         Respond with a JSON array of exactly {count} object(s), one per campaign, \
         in the same order as the input. Each object must have exactly these four \
         fields:\n\
         - \"index\": the campaign's index from the input\n\
         - \"verdict\": one of {labels}\n\
         - \"analysis\": at most 2 sentences on what the numbers show\n\
         - \"recommendations\": at most 2 concrete next actions\n\
         \n\
         Output the raw JSON array only. No markdown fences, no commentary.",
        count = campaigns.len(),
        ctr = b.ctr_pct,
        cpm = b.cpm,
        cpc = b.cpc,
        cpa = b.cpa,
        roas_good = b.roas_good,
        roas_excellent = b.roas_excellent,
        avg_roas = averages.roas,
        avg_ctr = averages.ctr,
    ))
}
