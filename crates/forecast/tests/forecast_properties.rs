//! End-to-end forecast behaviour against literal campaigns and rate cards.

use campaign_core::rate_card::RateCard;
use campaign_core::types::{
    AudienceConfig, CampaignConfig, ChannelAllocation, ChannelRate, CROSS_CHANNEL_DEDUP_FACTOR,
};
use campaign_forecast::compute_forecast;
use campaign_forecast::format::{format_count, format_percent};

fn flat_card() -> RateCard {
    RateCard::new(vec![
        ChannelRate::new("alpha", "Alpha", 100.0, 1.0, 0.5),
        ChannelRate::new("beta", "Beta", 100.0, 1.0, 0.5),
    ])
}

fn campaign(budget: f64, audience_size: u64, channels: Vec<ChannelAllocation>) -> CampaignConfig {
    CampaignConfig {
        name: None,
        budget,
        duration_days: 28,
        channels,
        audience: AudienceConfig::with_size(audience_size),
    }
}

#[test]
fn test_zero_budget_forecast_is_empty() {
    let card = RateCard::default();
    let channel_sets = vec![
        vec![],
        vec![ChannelAllocation::new("meta", 100.0)],
        vec![
            ChannelAllocation::new("meta", 80.0),
            ChannelAllocation::new("youtube", 70.0),
            ChannelAllocation::new("unknown", 10.0),
        ],
    ];

    for channels in channel_sets {
        for size in [0, 1_000, 50_000_000] {
            let forecast = compute_forecast(&campaign(0.0, size, channels.clone()), &card);
            assert_eq!(forecast.total_impressions, 0.0);
            assert_eq!(forecast.total_clicks, 0.0);
            assert_eq!(forecast.unique_reach, 0.0);
            assert_eq!(forecast.avg_cpm, 0.0);
            assert_eq!(forecast.avg_cpc, 0.0);
            assert!(forecast.warnings.is_empty());
        }
    }
}

#[test]
fn test_budget_monotonicity() {
    let card = RateCard::default();
    let mut previous = compute_forecast(
        &campaign(1_000.0, 500_000, vec![ChannelAllocation::new("meta", 100.0)]),
        &card,
    );

    for budget in [5_000.0, 50_000.0, 250_000.0, 1_000_000.0, 10_000_000.0] {
        let current = compute_forecast(
            &campaign(budget, 500_000, vec![ChannelAllocation::new("meta", 100.0)]),
            &card,
        );
        let (prev, cur) = (&previous.channel_results[0], &current.channel_results[0]);
        assert!(cur.impressions > prev.impressions);
        assert!(cur.clicks > prev.clicks);
        assert!(cur.reach >= prev.reach);
        previous = current;
    }
}

#[test]
fn test_reach_never_exceeds_ceiling() {
    let card = RateCard::default();
    let audience_size = 2_000_000u64;

    for rate in card.iter() {
        for budget in [10.0, 10_000.0, 1e7, 1e12] {
            let channels = vec![ChannelAllocation::new(rate.id.clone(), 100.0)];
            let forecast = compute_forecast(&campaign(budget, audience_size, channels), &card);
            let result = &forecast.channel_results[0];
            assert!(result.reach <= audience_size as f64 * rate.reach_rate_ceiling);
        }
    }
}

#[test]
fn test_unique_reach_is_discounted_sum() {
    let card = RateCard::default();
    let forecast = compute_forecast(
        &campaign(
            300_000.0,
            5_000_000,
            vec![
                ChannelAllocation::new("meta", 40.0),
                ChannelAllocation::new("youtube", 35.0),
                ChannelAllocation::new("linkedin", 25.0),
            ],
        ),
        &card,
    );

    let summed: f64 = forecast.channel_results.iter().map(|r| r.reach).sum();
    assert_eq!(forecast.raw_total_reach, summed);
    assert_eq!(forecast.unique_reach, CROSS_CHANNEL_DEDUP_FACTOR * summed);
    assert!(forecast.unique_reach <= forecast.raw_total_reach);
}

#[test]
fn test_disabled_and_zero_allocation_channels_excluded() {
    let card = flat_card();
    let baseline = compute_forecast(
        &campaign(100_000.0, 1_000_000, vec![ChannelAllocation::new("alpha", 50.0)]),
        &card,
    );
    let with_inactive = compute_forecast(
        &campaign(
            100_000.0,
            1_000_000,
            vec![
                ChannelAllocation::new("alpha", 50.0),
                ChannelAllocation::new("beta", 50.0).disabled(),
            ],
        ),
        &card,
    );
    let with_zero = compute_forecast(
        &campaign(
            100_000.0,
            1_000_000,
            vec![
                ChannelAllocation::new("alpha", 50.0),
                ChannelAllocation::new("beta", 0.0),
            ],
        ),
        &card,
    );

    for forecast in [&with_inactive, &with_zero] {
        assert_eq!(forecast.channel_results.len(), 1);
        assert!(forecast.channel_results.iter().all(|r| r.channel_id == "alpha"));
        assert_eq!(forecast.total_impressions, baseline.total_impressions);
        assert_eq!(forecast.total_clicks, baseline.total_clicks);
        assert_eq!(forecast.unique_reach, baseline.unique_reach);
    }
}

/// One flat-rate channel whose reach is pinned at 50,000 (ceiling 0.5 of a
/// 100,000 audience), so average frequency is impressions / 37,500.
fn frequency_probe(budget: f64) -> f64 {
    let card = RateCard::new(vec![ChannelRate::new("alpha", "Alpha", 100.0, 1.0, 0.5)]);
    let forecast = compute_forecast(
        &campaign(budget, 100_000, vec![ChannelAllocation::new("alpha", 100.0)]),
        &card,
    );
    assert_eq!(forecast.channel_results[0].reach, 50_000.0);
    let has_warning = forecast.warnings.iter().any(|w| w.contains("frequency"));
    if forecast.avg_frequency > 8.0 {
        assert!(has_warning);
    } else {
        assert!(!has_warning);
    }
    forecast.avg_frequency
}

#[test]
fn test_frequency_warning_threshold() {
    assert_eq!(frequency_probe(33_750.0), 9.0);
    assert_eq!(frequency_probe(26_250.0), 7.0);
}

#[test]
fn test_meta_single_channel_scenario() {
    let card = RateCard::new(vec![ChannelRate::new("meta", "Meta", 95.0, 1.2, 0.72)]);
    let forecast = compute_forecast(
        &campaign(500_000.0, 500_000, vec![ChannelAllocation::new("meta", 100.0)]),
        &card,
    );

    let meta = &forecast.channel_results[0];
    assert_eq!(format_count(meta.impressions), "5,263,158");
    assert_eq!(meta.reach, 360_000.0);
    assert_eq!(format_count(meta.clicks), "63,158");
    assert!((meta.frequency - 14.6).abs() < 0.05);

    assert_eq!(forecast.unique_reach, 270_000.0);
    assert_eq!(format_percent(forecast.reach_percentage), "54.0%");
    assert!(forecast.warnings.iter().any(|w| w.contains("frequency")));
    assert!(!forecast.warnings.iter().any(|w| w.contains("Low reach")));
}

#[test]
fn test_two_channel_split_scenario() {
    let forecast = compute_forecast(
        &campaign(
            100_000.0,
            1_000_000,
            vec![
                ChannelAllocation::new("alpha", 50.0),
                ChannelAllocation::new("beta", 50.0),
            ],
        ),
        &flat_card(),
    );

    assert_eq!(forecast.channel_results.len(), 2);
    for result in &forecast.channel_results {
        assert_eq!(result.budget, 50_000.0);
        assert_eq!(result.impressions, 500_000.0);
        assert_eq!(result.reach, 300_000.0);
    }
    assert_eq!(forecast.raw_total_reach, 600_000.0);
    assert_eq!(forecast.unique_reach, 450_000.0);
    assert_eq!(forecast.total_impressions, 1_000_000.0);
    assert!((forecast.avg_frequency - 2.222).abs() < 0.001);
    assert!(forecast.warnings.is_empty());
}

#[test]
fn test_low_reach_and_over_allocation_warnings() {
    let card = RateCard::default();

    let thin = compute_forecast(
        &campaign(10_000.0, 10_000_000, vec![ChannelAllocation::new("meta", 100.0)]),
        &card,
    );
    assert!(thin.reach_percentage > 0.0 && thin.reach_percentage < 10.0);
    assert_eq!(thin.warnings.len(), 1);
    assert!(thin.warnings[0].starts_with("Low reach"));

    let stretched = compute_forecast(
        &campaign(
            100_000.0,
            1_000_000,
            vec![
                ChannelAllocation::new("meta", 70.0),
                ChannelAllocation::new("youtube", 50.0),
            ],
        ),
        &card,
    );
    let last = stretched.warnings.last().unwrap();
    assert!(last.contains("120%"));
}

#[test]
fn test_forecast_is_idempotent() {
    let card = RateCard::default();
    let config = campaign(
        420_000.0,
        3_000_000,
        vec![
            ChannelAllocation::new("meta", 45.0),
            ChannelAllocation::new("google_search", 30.0).with_cpm_override(150.0),
            ChannelAllocation::new("ott", 25.0),
        ],
    );

    let first = compute_forecast(&config, &card);
    let second = compute_forecast(&config, &card);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
