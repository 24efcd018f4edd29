//! Campaign Planner: media-mix forecasting service and command-line tool.
//!
//! `serve` exposes the forecast engine over HTTP; `forecast`, `quote`, and
//! `channels` run it locally against the configured rate card.

use anyhow::Context;
use campaign_api::ApiServer;
use campaign_core::config::AppConfig;
use campaign_core::types::CampaignConfig;
use campaign_core::types::ChannelRate;
use campaign_forecast::calculator::{is_priceable, required_budget, required_budget_for_reach};
use campaign_forecast::format::{format_count, format_currency, format_percent};
use campaign_forecast::{
    compute_forecast, validate_campaign, ForecastDisplay, MediaQuote, ValidationRules,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-planner")]
#[command(about = "Media-mix forecasting for paid campaigns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the forecasting HTTP API
    Serve {
        /// Node identifier (overrides config)
        #[arg(long, env = "CAMPAIGN_PLANNER__NODE_ID")]
        node_id: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "CAMPAIGN_PLANNER__API__HTTP_PORT")]
        http_port: Option<u16>,
    },

    /// Forecast a campaign described in a JSON file
    Forecast {
        /// Path to the campaign JSON document
        #[arg(short, long)]
        input: PathBuf,

        /// Print the raw forecast as JSON instead of a report
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Price a single-channel spend, or the spend needed for an impression or reach goal
    Quote {
        /// Channel id from the rate card
        #[arg(short, long)]
        channel: String,

        /// Spend to price
        #[arg(short, long, conflicts_with_all = ["impressions", "reach"])]
        budget: Option<f64>,

        /// Impression goal to cost out
        #[arg(long, conflicts_with = "reach")]
        impressions: Option<f64>,

        /// Reach goal (people) to cost out against --audience
        #[arg(long, requires = "audience")]
        reach: Option<f64>,

        /// Target audience size for --reach
        #[arg(long)]
        audience: Option<u64>,
    },

    /// List the configured rate card
    Channels,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campaign_planner=info,campaign_api=info,tower_http=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    config
        .planner
        .validate()
        .context("invalid planner configuration")?;

    match cli.command {
        Commands::Serve { node_id, http_port } => serve(config, node_id, http_port).await,
        Commands::Forecast { input, json } => cmd_forecast(&config, &input, json),
        Commands::Quote {
            channel,
            budget,
            impressions,
            reach,
            audience,
        } => {
            let goal = match (budget, impressions, reach) {
                (Some(budget), _, _) => QuoteGoal::Spend(budget),
                (None, Some(target), _) => QuoteGoal::Impressions(target),
                (None, None, Some(target)) => QuoteGoal::Reach {
                    target,
                    audience: audience.unwrap_or_default(),
                },
                (None, None, None) => {
                    anyhow::bail!("pass one of --budget, --impressions or --reach")
                }
            };
            cmd_quote(&config, &channel, goal)
        }
        Commands::Channels => {
            cmd_channels(&config);
            Ok(())
        }
    }
}

async fn serve(
    mut config: AppConfig,
    node_id: Option<String>,
    http_port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(node_id) = node_id {
        config.node_id = node_id;
    }
    if let Some(port) = http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        channels = config.planner.channels.len(),
        "Configuration loaded"
    );

    let api_server = ApiServer::new(config);

    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Campaign Planner is ready to serve traffic");
    api_server.start_http().await
}

fn cmd_forecast(config: &AppConfig, input: &Path, json: bool) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let campaign: CampaignConfig = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse campaign from {}", input.display()))?;

    validate_campaign(&campaign, &ValidationRules::from(&config.planner))
        .context("campaign failed validation")?;

    let rate_card = config.planner.rate_card();
    let forecast = compute_forecast(&campaign, &rate_card);
    info!(
        channels = forecast.channel_results.len(),
        warnings = forecast.warnings.len(),
        "Forecast computed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    let symbol = &config.planner.currency_symbol;
    let display = ForecastDisplay::new(&forecast, symbol);

    println!(
        "=== Forecast: {} ===",
        campaign.name.as_deref().unwrap_or("Untitled campaign")
    );
    println!();
    println!("  Budget:           {}", format_currency(campaign.budget, symbol));
    println!("  Duration:         {} days", campaign.duration_days);
    println!("  Daily budget:     {}", display.daily_budget);
    println!("  Audience:         {}", format_count(campaign.audience.size as f64));
    println!();
    println!(
        "  {:<30} {:>10} {:>12} {:>12} {:>10} {:>8}",
        "Channel", "Budget", "Impressions", "Reach", "Clicks", "Freq"
    );
    for row in &display.channels {
        println!(
            "  {:<30} {:>10} {:>12} {:>12} {:>10} {:>8}{}",
            row.label,
            row.budget,
            row.impressions,
            row.reach,
            row.clicks,
            row.frequency,
            if row.high_frequency { "  !" } else { "" }
        );
    }
    println!();
    println!("  Unique reach:     {} ({})", display.unique_reach, display.reach_percentage);
    println!("  Impressions:      {}", display.total_impressions);
    println!("  Clicks:           {}", display.total_clicks);
    println!("  Avg frequency:    {}", display.avg_frequency);
    println!("  Avg CPM:          {}", display.avg_cpm);
    println!("  Avg CPC:          {}", display.avg_cpc);
    println!(
        "  Allocated:        {}",
        format_percent(forecast.total_allocation_percent)
    );

    if !forecast.warnings.is_empty() {
        println!();
        println!("  Warnings:");
        for w in &forecast.warnings {
            println!("    - {w}");
        }
    }

    Ok(())
}

/// What a `quote` invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum QuoteGoal {
    Spend(f64),
    Impressions(f64),
    Reach { target: f64, audience: u64 },
}

fn cmd_quote(config: &AppConfig, channel: &str, goal: QuoteGoal) -> anyhow::Result<()> {
    let rate_card = config.planner.rate_card();
    let rate = rate_card
        .get(channel)
        .with_context(|| format!("no rate card entry for '{channel}'"))?;

    let report = quote_report(rate, goal, &config.planner.currency_symbol)?;
    println!("{report}");
    Ok(())
}

fn quote_report(rate: &ChannelRate, goal: QuoteGoal, symbol: &str) -> anyhow::Result<String> {
    let report = match goal {
        QuoteGoal::Spend(budget) => {
            anyhow::ensure!(is_priceable(budget), "budget must be a non-negative number");
            let quote = MediaQuote::for_channel(budget, rate);
            format!(
                "{} at {}:\n  Impressions:  {}\n  Clicks:       {}\n  CPC:          {}",
                rate.label,
                format_currency(budget, symbol),
                format_count(quote.impressions),
                format_count(quote.clicks),
                format_currency(quote.cpc, symbol)
            )
        }
        QuoteGoal::Impressions(target) => {
            anyhow::ensure!(is_priceable(target), "impressions must be a non-negative number");
            format!(
                "{} impressions on {} cost {}",
                format_count(target),
                rate.label,
                format_currency(required_budget(target, rate.cpm), symbol)
            )
        }
        QuoteGoal::Reach { target, audience } => {
            anyhow::ensure!(is_priceable(target), "reach must be a non-negative number");
            let needed = required_budget_for_reach(target, rate, audience).with_context(|| {
                format!(
                    "{} cannot reach {} of {} people (ceiling {})",
                    rate.label,
                    format_count(target),
                    format_count(audience as f64),
                    format_percent(rate.reach_rate_ceiling * 100.0)
                )
            })?;
            format!(
                "Reaching {} people on {} costs {}",
                format_count(target),
                rate.label,
                format_currency(needed, symbol)
            )
        }
    };

    Ok(report)
}

fn cmd_channels(config: &AppConfig) {
    let symbol = &config.planner.currency_symbol;
    println!(
        "  {:<16} {:<30} {:>10} {:>7} {:>9}",
        "ID", "Channel", "CPM", "CTR", "Max reach"
    );
    for rate in config.planner.rate_card().iter() {
        println!(
            "  {:<16} {:<30} {:>10} {:>6.1}% {:>9}",
            rate.id,
            rate.label,
            format_currency(rate.cpm, symbol),
            rate.ctr,
            format_percent(rate.reach_rate_ceiling * 100.0)
        );
    }
}
