//! Forecast engine. Converts a campaign configuration and a channel rate
//! card into per-channel and aggregate delivery figures.
//!
//! Every figure is kept fractional; rounding happens only at display time.
//! The engine is total: degenerate input produces zeros, never NaN or
//! infinity, and never an error.

use crate::diagnostics;
use campaign_core::rate_card::RateCard;
use campaign_core::types::{
    CampaignConfig, CampaignForecast, ChannelAllocation, ChannelForecastResult, ChannelRate,
    CHANNEL_REACH_FACTOR, CROSS_CHANNEL_DEDUP_FACTOR,
};
use tracing::debug;

/// Compute a full campaign forecast.
pub fn compute_forecast(config: &CampaignConfig, rate_card: &RateCard) -> CampaignForecast {
    let audience_size = config.audience.size as f64;

    let channel_results: Vec<ChannelForecastResult> = config
        .channels
        .iter()
        .filter(|alloc| alloc.enabled && alloc.allocation_percent > 0.0)
        .filter_map(|alloc| match rate_card.get(&alloc.channel_id) {
            Some(rate) => Some(forecast_channel(alloc, rate, config.budget, audience_size)),
            None => {
                debug!(channel_id = %alloc.channel_id, "No rate card entry, skipping channel");
                None
            }
        })
        .collect();

    let total_impressions: f64 = channel_results.iter().map(|r| r.impressions).sum();
    let total_clicks: f64 = channel_results.iter().map(|r| r.clicks).sum();
    let raw_total_reach: f64 = channel_results.iter().map(|r| r.reach).sum();

    // Flat overlap discount across channels.
    let unique_reach = raw_total_reach * CROSS_CHANNEL_DEDUP_FACTOR;

    let avg_frequency = if unique_reach > 0.0 {
        total_impressions / unique_reach
    } else {
        0.0
    };
    let avg_cpm = if total_impressions > 0.0 {
        config.budget / total_impressions * 1000.0
    } else {
        0.0
    };
    let avg_cpc = if total_clicks > 0.0 {
        config.budget / total_clicks
    } else {
        0.0
    };
    let reach_percentage = if audience_size > 0.0 {
        unique_reach / audience_size * 100.0
    } else {
        0.0
    };

    let (daily_budget, daily_impressions) = if config.duration_days > 0 {
        let days = config.duration_days as f64;
        (config.budget / days, total_impressions / days)
    } else {
        (0.0, 0.0)
    };

    let mut forecast = CampaignForecast {
        channel_results,
        raw_total_reach,
        unique_reach,
        total_impressions,
        total_clicks,
        avg_frequency,
        avg_cpm,
        avg_cpc,
        reach_percentage,
        total_allocation_percent: config.enabled_allocation_percent(),
        daily_budget,
        daily_impressions,
        warnings: Vec::new(),
    };

    forecast.warnings = diagnostics::evaluate(&forecast, config)
        .iter()
        .map(ToString::to_string)
        .collect();

    debug!(
        channels = forecast.channel_results.len(),
        unique_reach = forecast.unique_reach,
        avg_frequency = forecast.avg_frequency,
        warnings = forecast.warnings.len(),
        "Campaign forecast computed"
    );

    forecast
}

/// Project a single channel. Callers have already excluded disabled and
/// unfunded allocations.
pub fn forecast_channel(
    alloc: &ChannelAllocation,
    rate: &ChannelRate,
    total_budget: f64,
    audience_size: f64,
) -> ChannelForecastResult {
    let effective_cpm = alloc.cpm_override.unwrap_or(rate.cpm);
    let budget = total_budget * (alloc.allocation_percent / 100.0);

    let impressions = if effective_cpm > 0.0 {
        budget / effective_cpm * 1000.0
    } else {
        0.0
    };

    // Saturation heuristic: repeat impressions reach fewer new people, and
    // no channel can go past its structural ceiling.
    let max_reach = audience_size * rate.reach_rate_ceiling;
    let reach = max_reach.min(impressions * CHANNEL_REACH_FACTOR);

    let clicks = impressions * (rate.ctr / 100.0);
    let frequency = if reach > 0.0 { impressions / reach } else { 0.0 };

    ChannelForecastResult {
        channel_id: alloc.channel_id.clone(),
        label: rate.label.clone(),
        budget,
        effective_cpm,
        impressions,
        reach,
        clicks,
        frequency,
    }
}
