//! Advisory warnings raised on a finished forecast.
//!
//! Warnings are data, not errors: the forecast figures stay fully usable and
//! the caller decides how to surface them.

use campaign_core::types::{
    CampaignConfig, CampaignForecast, FREQUENCY_WARNING_THRESHOLD, LOW_REACH_THRESHOLD_PERCENT,
    MAX_ALLOCATION_PERCENT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A risk condition detected in a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastWarning {
    /// Average frequency above the fatigue threshold.
    HighFrequency { avg_frequency: f64 },
    /// Unique reach is a small share of the addressable audience.
    LowReach { reach_percentage: f64 },
    /// Enabled channel allocations add up to more than the whole budget.
    OverAllocated { total_percent: f64 },
}

impl fmt::Display for ForecastWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastWarning::HighFrequency { avg_frequency } => write!(
                f,
                "High average frequency ({:.1}x) may cause ad fatigue. Consider widening the audience or lowering the budget.",
                avg_frequency
            ),
            ForecastWarning::LowReach { reach_percentage } => write!(
                f,
                "Low reach ({:.1}% of audience). Consider increasing the budget or adding channels.",
                reach_percentage
            ),
            ForecastWarning::OverAllocated { total_percent } => write!(
                f,
                "Channel allocation totals {:.0}%, which exceeds 100% of the budget.",
                total_percent
            ),
        }
    }
}

/// Run every check against a forecast, in reporting order: frequency, reach,
/// allocation.
///
/// A degenerate campaign (no spend, no audience, or no forecastable channel)
/// yields no warnings.
pub fn evaluate(forecast: &CampaignForecast, config: &CampaignConfig) -> Vec<ForecastWarning> {
    let mut warnings = Vec::new();

    if config.budget <= 0.0 || config.audience.size == 0 || forecast.channel_results.is_empty() {
        return warnings;
    }

    if forecast.avg_frequency > FREQUENCY_WARNING_THRESHOLD {
        warnings.push(ForecastWarning::HighFrequency {
            avg_frequency: forecast.avg_frequency,
        });
    }

    if forecast.reach_percentage > 0.0 && forecast.reach_percentage < LOW_REACH_THRESHOLD_PERCENT {
        warnings.push(ForecastWarning::LowReach {
            reach_percentage: forecast.reach_percentage,
        });
    }

    if forecast.total_allocation_percent > MAX_ALLOCATION_PERCENT {
        warnings.push(ForecastWarning::OverAllocated {
            total_percent: forecast.total_allocation_percent,
        });
    }

    warnings
}
