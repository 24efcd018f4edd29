//! Campaign planning data model shared by the forecast engine, the REST
//! surface, and the CLI.
//!
//! Field names serialize as camelCase so saved campaign documents round-trip
//! with the dashboard unchanged.

use serde::{Deserialize, Serialize};

/// Share of a channel's impressions assumed to land on a new person.
pub const CHANNEL_REACH_FACTOR: f64 = 0.6;

/// Fraction of summed per-channel reach kept after cross-channel overlap.
pub const CROSS_CHANNEL_DEDUP_FACTOR: f64 = 0.75;

/// Frequency above which an audience is considered fatigued. Applies to the
/// campaign average and to individual channels.
pub const FREQUENCY_WARNING_THRESHOLD: f64 = 8.0;

/// Reach percentage below which a campaign is flagged as under-reaching.
pub const LOW_REACH_THRESHOLD_PERCENT: f64 = 10.0;

/// Total enabled allocation above which the budget is over-committed.
pub const MAX_ALLOCATION_PERCENT: f64 = 100.0;

// ─── Rate Card ──────────────────────────────────────────────────────────────

/// Static per-channel pricing and audience limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRate {
    pub id: String,
    pub label: String,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Click-through rate as a percentage of impressions.
    pub ctr: f64,
    /// Fraction (0, 1] of the addressable audience the channel can ever reach.
    #[serde(alias = "reach_rate_ceiling")]
    pub reach_rate_ceiling: f64,
}

impl ChannelRate {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        cpm: f64,
        ctr: f64,
        reach_rate_ceiling: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            cpm,
            ctr,
            reach_rate_ceiling,
        }
    }
}

// ─── Campaign Configuration ─────────────────────────────────────────────────

/// Budget share assigned to one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAllocation {
    pub channel_id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Percentage (0-100) of the total budget.
    pub allocation_percent: f64,
    /// Replaces the rate card CPM for this campaign only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpm_override: Option<f64>,
}

fn default_enabled() -> bool {
    true
}

impl ChannelAllocation {
    pub fn new(channel_id: impl Into<String>, allocation_percent: f64) -> Self {
        Self {
            channel_id: channel_id.into(),
            enabled: true,
            allocation_percent,
            cpm_override: None,
        }
    }

    pub fn with_cpm_override(mut self, cpm: f64) -> Self {
        self.cpm_override = Some(cpm);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Who the campaign is addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceConfig {
    /// Total addressable audience.
    pub size: u64,
    #[serde(default = "default_age_min")]
    pub age_min: u8,
    #[serde(default = "default_age_max")]
    pub age_max: u8,
    /// Market codes. Empty means unconstrained.
    #[serde(default)]
    pub geographies: Vec<String>,
}

fn default_age_min() -> u8 {
    25
}
fn default_age_max() -> u8 {
    54
}

impl AudienceConfig {
    pub fn with_size(size: u64) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

impl Default for AudienceConfig {
    fn default() -> Self {
        Self {
            size: 0,
            age_min: default_age_min(),
            age_max: default_age_max(),
            geographies: Vec::new(),
        }
    }
}

/// The forecast engine's input aggregate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub budget: f64,
    /// Flight length in days. Zero means unspecified.
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub channels: Vec<ChannelAllocation>,
    pub audience: AudienceConfig,
}

impl CampaignConfig {
    /// Sum of `allocation_percent` over enabled channels, known or not.
    pub fn enabled_allocation_percent(&self) -> f64 {
        self.channels
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.allocation_percent)
            .sum()
    }
}

// ─── Forecast Output ────────────────────────────────────────────────────────

/// Projection for a single enabled, funded channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelForecastResult {
    pub channel_id: String,
    pub label: String,
    /// Absolute spend on this channel.
    pub budget: f64,
    /// CPM actually used: the override if present, else the rate card's.
    pub effective_cpm: f64,
    pub impressions: f64,
    pub reach: f64,
    pub clicks: f64,
    pub frequency: f64,
}

impl ChannelForecastResult {
    /// Whether this channel alone exceeds the fatigue threshold.
    pub fn is_high_frequency(&self) -> bool {
        self.frequency > FREQUENCY_WARNING_THRESHOLD
    }
}

/// The forecast engine's output aggregate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForecast {
    pub channel_results: Vec<ChannelForecastResult>,
    /// Sum of per-channel reach before overlap is removed.
    pub raw_total_reach: f64,
    pub unique_reach: f64,
    pub total_impressions: f64,
    pub total_clicks: f64,
    pub avg_frequency: f64,
    pub avg_cpm: f64,
    pub avg_cpc: f64,
    pub reach_percentage: f64,
    pub total_allocation_percent: f64,
    pub daily_budget: f64,
    pub daily_impressions: f64,
    pub warnings: Vec<String>,
}

impl CampaignForecast {
    /// Channels whose own frequency crosses the fatigue threshold.
    pub fn high_frequency_channels(&self) -> impl Iterator<Item = &ChannelForecastResult> {
        self.channel_results.iter().filter(|r| r.is_high_frequency())
    }
}
