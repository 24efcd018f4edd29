//! Media calculator: single-channel quick quotes and the inverse questions
//! a planner asks before building a full campaign ("what does a million
//! impressions cost?").

use campaign_core::types::{ChannelRate, CHANNEL_REACH_FACTOR};
use serde::{Deserialize, Serialize};

/// Delivery bought by a fixed spend at a given CPM and CTR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuote {
    pub budget: f64,
    pub cpm: f64,
    pub ctr: f64,
    pub impressions: f64,
    pub clicks: f64,
    /// Cost per click (0.0 when no clicks are expected).
    pub cpc: f64,
}

impl MediaQuote {
    /// Price a spend. A non-positive CPM buys nothing.
    pub fn from_budget(budget: f64, cpm: f64, ctr: f64) -> Self {
        let impressions = if cpm > 0.0 { budget / cpm * 1000.0 } else { 0.0 };
        let clicks = impressions * (ctr / 100.0);
        let cpc = if clicks > 0.0 { budget / clicks } else { 0.0 };

        Self {
            budget,
            cpm,
            ctr,
            impressions,
            clicks,
            cpc,
        }
    }

    /// Price a spend at a channel's rate card terms.
    pub fn for_channel(budget: f64, rate: &ChannelRate) -> Self {
        Self::from_budget(budget, rate.cpm, rate.ctr)
    }
}

/// Whether an amount can be priced: finite and not negative.
pub fn is_priceable(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Spend needed to buy `target_impressions` at `cpm`.
pub fn required_budget(target_impressions: f64, cpm: f64) -> f64 {
    if cpm <= 0.0 || target_impressions <= 0.0 {
        return 0.0;
    }
    target_impressions / 1000.0 * cpm
}

/// Spend needed for one channel to reach `target_reach` people out of
/// `audience_size`.
///
/// Returns `None` when the target lies above the channel's reach ceiling,
/// since no spend gets there.
pub fn required_budget_for_reach(
    target_reach: f64,
    rate: &ChannelRate,
    audience_size: u64,
) -> Option<f64> {
    let ceiling = audience_size as f64 * rate.reach_rate_ceiling;
    if target_reach > ceiling {
        return None;
    }
    let impressions = target_reach.max(0.0) / CHANNEL_REACH_FACTOR;
    Some(required_budget(impressions, rate.cpm))
}
