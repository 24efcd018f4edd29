//! Campaign checks run at the API and CLI boundary before forecasting.
//!
//! The engine itself assumes pre-validated input; these checks reject
//! configurations that are malformed rather than merely risky.

use campaign_core::config::PlannerConfig;
use campaign_core::types::CampaignConfig;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("budget must be a non-negative number, got {0}")]
    InvalidBudget(f64),

    #[error("campaign duration must be at least one day")]
    ZeroDuration,

    #[error("age range {min}-{max} is inverted or empty")]
    InvertedAgeRange { min: u8, max: u8 },

    #[error("age {age} is outside the targetable range {lower}-{upper}")]
    AgeOutOfBounds { age: u8, lower: u8, upper: u8 },

    #[error("channel '{channel_id}' allocation {percent}% is outside 0-100")]
    AllocationOutOfRange { channel_id: String, percent: f64 },

    #[error("channel '{channel_id}' cpm override must be non-negative, got {cpm}")]
    InvalidCpmOverride { channel_id: String, cpm: f64 },

    #[error("channel '{0}' is listed more than once")]
    DuplicateChannel(String),
}

/// Bounds applied by [`validate_campaign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub age_min_bound: u8,
    pub age_max_bound: u8,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            age_min_bound: 13,
            age_max_bound: 99,
        }
    }
}

impl From<&PlannerConfig> for ValidationRules {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            age_min_bound: config.age_min_bound,
            age_max_bound: config.age_max_bound,
        }
    }
}

/// Check a campaign, returning the first problem found.
pub fn validate_campaign(
    config: &CampaignConfig,
    rules: &ValidationRules,
) -> Result<(), ValidationError> {
    if !config.budget.is_finite() || config.budget < 0.0 {
        return Err(ValidationError::InvalidBudget(config.budget));
    }
    if config.duration_days == 0 {
        return Err(ValidationError::ZeroDuration);
    }

    let audience = &config.audience;
    if audience.age_min >= audience.age_max {
        return Err(ValidationError::InvertedAgeRange {
            min: audience.age_min,
            max: audience.age_max,
        });
    }
    for age in [audience.age_min, audience.age_max] {
        if age < rules.age_min_bound || age > rules.age_max_bound {
            return Err(ValidationError::AgeOutOfBounds {
                age,
                lower: rules.age_min_bound,
                upper: rules.age_max_bound,
            });
        }
    }

    let mut seen = HashSet::with_capacity(config.channels.len());
    for alloc in &config.channels {
        if !seen.insert(alloc.channel_id.as_str()) {
            return Err(ValidationError::DuplicateChannel(alloc.channel_id.clone()));
        }
        if !(0.0..=100.0).contains(&alloc.allocation_percent) {
            return Err(ValidationError::AllocationOutOfRange {
                channel_id: alloc.channel_id.clone(),
                percent: alloc.allocation_percent,
            });
        }
        if let Some(cpm) = alloc.cpm_override {
            if !cpm.is_finite() || cpm < 0.0 {
                return Err(ValidationError::InvalidCpmOverride {
                    channel_id: alloc.channel_id.clone(),
                    cpm,
                });
            }
        }
    }

    Ok(())
}
