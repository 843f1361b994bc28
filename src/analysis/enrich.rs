//! Derived KPI computation for campaign totals.
//!
//! Turns raw aggregate totals into funnel rates, cost ratios and spend
//! share. Every ratio guards its denominator: a zero denominator yields
//! zero, so downstream JSON never carries NaN or infinities.

use super::types::{CampaignTotals, EnrichedCampaign};

/// Round to 2 decimal places. All derived KPIs use this so JSON output
/// stays stable for UI consumption.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage ratio with a zero-denominator guard.
fn pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round2(numerator / denominator * 100.0)
    }
}

/// Plain ratio with a zero-denominator guard.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round2(numerator / denominator)
    }
}

/// Sum of spend across a batch. Used as the account total when the caller
/// does not supply one.
pub fn total_spend(campaigns: &[CampaignTotals]) -> f64 {
    campaigns.iter().map(|c| c.spend).sum()
}

/// Attach derived KPIs to a single campaign.
///
/// `cpc`, `cpa` and `roas` are recomputed from the totals; upstream
/// precomputed values for those three are discarded. `ctr` and `cpm`
/// pass through untouched.
pub fn enrich_campaign(campaign: &CampaignTotals, total_account_spend: f64) -> EnrichedCampaign {
    let add_to_cart_rate = pct(campaign.add_to_cart, campaign.impressions);
    let checkout_rate = pct(campaign.initiate_checkout, campaign.add_to_cart);
    let purchase_rate = pct(campaign.purchases, campaign.initiate_checkout);

    EnrichedCampaign {
        id: campaign.id.clone(),
        name: campaign.name.clone(),
        objective: campaign.objective.clone(),
        spend: campaign.spend,
        revenue: campaign.revenue,
        clicks: campaign.clicks,
        impressions: campaign.impressions,
        purchases: campaign.purchases,
        add_to_cart: campaign.add_to_cart,
        initiate_checkout: campaign.initiate_checkout,
        add_payment_info: campaign.add_payment_info,
        reach: campaign.reach,
        ctr: campaign.ctr,
        cpm: campaign.cpm,
        cpc: ratio(campaign.spend, campaign.clicks),
        cpa: ratio(campaign.spend, campaign.purchases),
        roas: ratio(campaign.revenue, campaign.spend),
        conversion_rate: pct(campaign.purchases, campaign.impressions),
        spend_share: pct(campaign.spend, total_account_spend),
        funnel_efficiency: format!(
            "{add_to_cart_rate:.2}%→{checkout_rate:.2}%→{purchase_rate:.2}%"
        ),
        add_to_cart_rate,
        checkout_rate,
        purchase_rate,
    }
}

/// Enrich a whole batch, preserving input order.
pub fn enrich_campaigns(
    campaigns: &[CampaignTotals],
    total_account_spend: f64,
) -> Vec<EnrichedCampaign> {
    campaigns
        .iter()
        .map(|campaign| enrich_campaign(campaign, total_account_spend))
        .collect()
}
