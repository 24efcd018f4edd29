pub mod config;
pub mod error;
pub mod rate_card;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use rate_card::RateCard;
