use crate::error::{CampaignError, CampaignResult};
use crate::rate_card::{default_channel_rates, RateCard};
use crate::types::ChannelRate;
use serde::Deserialize;

/// Root application configuration. Loaded from an optional
/// `campaign-planner.toml` in the working directory, then from environment
/// variables with the prefix `CAMPAIGN_PLANNER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "planner-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

// ─── Planner Config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Prefix used when rendering money amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Youngest targetable age accepted by campaign validation.
    #[serde(default = "default_age_min_bound")]
    pub age_min_bound: u8,
    /// Oldest targetable age accepted by campaign validation.
    #[serde(default = "default_age_max_bound")]
    pub age_max_bound: u8,
    /// Rate card entries. Defaults to the built-in paid media table.
    #[serde(default = "default_channel_rates")]
    pub channels: Vec<ChannelRate>,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}
fn default_age_min_bound() -> u8 {
    13
}
fn default_age_max_bound() -> u8 {
    99
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            age_min_bound: default_age_min_bound(),
            age_max_bound: default_age_max_bound(),
            channels: default_channel_rates(),
        }
    }
}

impl PlannerConfig {
    /// Check the rate card and age bounds before anything is served.
    pub fn validate(&self) -> CampaignResult<()> {
        if self.age_min_bound >= self.age_max_bound {
            return Err(CampaignError::Config(format!(
                "age_min_bound ({}) must be below age_max_bound ({})",
                self.age_min_bound, self.age_max_bound
            )));
        }

        for rate in &self.channels {
            if rate.id.trim().is_empty() {
                return Err(CampaignError::RateCard("channel id must not be empty".into()));
            }
            if !rate.cpm.is_finite() || rate.cpm <= 0.0 {
                return Err(CampaignError::RateCard(format!(
                    "channel '{}' has non-positive cpm {}",
                    rate.id, rate.cpm
                )));
            }
            if !rate.ctr.is_finite() || rate.ctr < 0.0 {
                return Err(CampaignError::RateCard(format!(
                    "channel '{}' has negative ctr {}",
                    rate.id, rate.ctr
                )));
            }
            if !(rate.reach_rate_ceiling > 0.0 && rate.reach_rate_ceiling <= 1.0) {
                return Err(CampaignError::RateCard(format!(
                    "channel '{}' reach ceiling {} is outside (0, 1]",
                    rate.id, rate.reach_rate_ceiling
                )));
            }
        }

        Ok(())
    }

    /// Build the immutable lookup table handed to the forecast engine.
    pub fn rate_card(&self) -> RateCard {
        RateCard::new(self.channels.clone())
    }
}

impl AppConfig {
    /// Load configuration from the optional config file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("campaign-planner").required(false))
            .add_source(
                config::Environment::with_prefix("CAMPAIGN_PLANNER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
