//! Channel rate card: the read-only pricing table the forecast engine runs
//! against. Built once at startup and shared by reference.

use crate::types::ChannelRate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Immutable lookup table of channel rates keyed by channel id.
///
/// Listing order follows declaration order; a repeated id replaces the
/// earlier entry in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<ChannelRate>", into = "Vec<ChannelRate>")]
pub struct RateCard {
    rates: Vec<ChannelRate>,
    index: HashMap<String, usize>,
}

impl RateCard {
    pub fn new(rates: Vec<ChannelRate>) -> Self {
        let mut deduped: Vec<ChannelRate> = Vec::with_capacity(rates.len());
        let mut index = HashMap::with_capacity(rates.len());

        for rate in rates {
            match index.get(&rate.id).copied() {
                Some(pos) => {
                    warn!(channel_id = %rate.id, "Duplicate rate card entry replaces earlier one");
                    deduped[pos] = rate;
                }
                None => {
                    index.insert(rate.id.clone(), deduped.len());
                    deduped.push(rate);
                }
            }
        }

        Self {
            rates: deduped,
            index,
        }
    }

    pub fn get(&self, channel_id: &str) -> Option<&ChannelRate> {
        self.index.get(channel_id).map(|&i| &self.rates[i])
    }

    pub fn contains(&self, channel_id: &str) -> bool {
        self.index.contains_key(channel_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelRate> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::new(default_channel_rates())
    }
}

impl From<Vec<ChannelRate>> for RateCard {
    fn from(rates: Vec<ChannelRate>) -> Self {
        Self::new(rates)
    }
}

impl From<RateCard> for Vec<ChannelRate> {
    fn from(card: RateCard) -> Self {
        card.rates
    }
}

/// Built-in paid media rate card.
pub fn default_channel_rates() -> Vec<ChannelRate> {
    vec![
        ChannelRate::new("meta", "Meta (Facebook & Instagram)", 95.0, 1.2, 0.72),
        ChannelRate::new("google_search", "Google Search", 180.0, 3.5, 0.60),
        ChannelRate::new("youtube", "YouTube", 120.0, 0.8, 0.65),
        ChannelRate::new("linkedin", "LinkedIn", 450.0, 0.6, 0.25),
        ChannelRate::new("programmatic", "Programmatic Display", 60.0, 0.3, 0.80),
        ChannelRate::new("twitter", "X (Twitter)", 110.0, 0.9, 0.35),
        ChannelRate::new("ott", "OTT / Connected TV", 250.0, 0.2, 0.40),
    ]
}
