//! Display helpers. The engine keeps every figure fractional; these round
//! once, at presentation time.

use campaign_core::types::{CampaignForecast, ChannelForecastResult};
use serde::Serialize;

/// Presentation strings for one channel row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDisplay {
    pub channel_id: String,
    pub label: String,
    pub budget: String,
    pub impressions: String,
    pub reach: String,
    pub clicks: String,
    pub frequency: String,
    pub high_frequency: bool,
}

/// Presentation strings for a whole forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDisplay {
    pub channels: Vec<ChannelDisplay>,
    pub unique_reach: String,
    pub total_impressions: String,
    pub total_clicks: String,
    pub avg_frequency: String,
    pub avg_cpm: String,
    pub avg_cpc: String,
    pub reach_percentage: String,
    pub daily_budget: String,
}

impl ChannelDisplay {
    pub fn new(result: &ChannelForecastResult, currency_symbol: &str) -> Self {
        Self {
            channel_id: result.channel_id.clone(),
            label: result.label.clone(),
            budget: format_compact_currency(result.budget, currency_symbol),
            impressions: format_count(result.impressions),
            reach: format_count(result.reach),
            clicks: format_count(result.clicks),
            frequency: format_frequency(result.frequency),
            high_frequency: result.is_high_frequency(),
        }
    }
}

impl ForecastDisplay {
    pub fn new(forecast: &CampaignForecast, currency_symbol: &str) -> Self {
        Self {
            channels: forecast
                .channel_results
                .iter()
                .map(|r| ChannelDisplay::new(r, currency_symbol))
                .collect(),
            unique_reach: format_count(forecast.unique_reach),
            total_impressions: format_count(forecast.total_impressions),
            total_clicks: format_count(forecast.total_clicks),
            avg_frequency: format_frequency(forecast.avg_frequency),
            avg_cpm: format_currency(forecast.avg_cpm, currency_symbol),
            avg_cpc: format_currency(forecast.avg_cpc, currency_symbol),
            reach_percentage: format_percent(forecast.reach_percentage),
            daily_budget: format_currency(forecast.daily_budget, currency_symbol),
        }
    }
}

/// Round half up to a whole count with `,` thousands separators.
pub fn format_count(value: f64) -> String {
    group_thousands(round_half_up(value, 0) as i64)
}

/// One-decimal percentage, e.g. `54.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", round_half_up(value, 1))
}

/// One-decimal frequency multiplier, e.g. `14.6x`.
pub fn format_frequency(value: f64) -> String {
    format!("{:.1}x", round_half_up(value, 1))
}

/// Money with two decimals and thousands separators, e.g. `₹1,250,000.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = round_half_up(amount.abs(), 2) * 100.0;
    let cents = cents.round() as i64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{symbol}{}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Money with a K/M/B suffix, e.g. `₹5.3M`.
pub fn format_compact_currency(amount: f64, symbol: &str) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{sign}{symbol}{:.1}B", round_half_up(abs / 1_000_000_000.0, 1))
    } else if abs >= 1_000_000.0 {
        format!("{sign}{symbol}{:.1}M", round_half_up(abs / 1_000_000.0, 1))
    } else if abs >= 1_000.0 {
        format!("{sign}{symbol}{:.1}K", round_half_up(abs / 1_000.0, 1))
    } else {
        format!("{sign}{symbol}{:.0}", round_half_up(abs, 0))
    }
}

fn round_half_up(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
