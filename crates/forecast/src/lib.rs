//! Campaign forecast engine
//!
//! Projects how far a campaign's budget goes on each paid channel, and
//! across all of them, against a channel rate card.
//!
//! # Modules
//!
//! - [`engine`]: Per-channel and aggregate forecast computation
//! - [`diagnostics`]: Advisory warnings raised on a finished forecast
//! - [`calculator`]: Single-channel quick quotes and budget inversion
//! - [`validation`]: Caller-side campaign checks run before forecasting
//! - [`format`]: Display helpers for counts, percentages and money

pub mod calculator;
pub mod diagnostics;
pub mod engine;
pub mod format;
pub mod validation;

pub use calculator::MediaQuote;
pub use diagnostics::ForecastWarning;
pub use engine::compute_forecast;
pub use format::ForecastDisplay;
pub use validation::{validate_campaign, ValidationError, ValidationRules};
