//! Benchmarks for the forecast engine.
//! Run with: cargo bench -p campaign-forecast

use campaign_core::rate_card::RateCard;
use campaign_core::types::{AudienceConfig, CampaignConfig, ChannelAllocation};
use campaign_forecast::compute_forecast;

fn create_test_campaign(card: &RateCard) -> CampaignConfig {
    let share = 100.0 / card.len() as f64;
    CampaignConfig {
        name: Some("bench".to_string()),
        budget: 2_500_000.0,
        duration_days: 30,
        channels: card
            .iter()
            .map(|rate| ChannelAllocation::new(rate.id.clone(), share))
            .collect(),
        audience: AudienceConfig::with_size(8_000_000),
    }
}

fn main() {
    let card = RateCard::default();
    let campaign = create_test_campaign(&card);

    // Warmup
    for _ in 0..1_000 {
        std::hint::black_box(compute_forecast(&campaign, &card));
    }

    // Benchmark
    let iterations = 200_000;
    let start = std::time::Instant::now();

    for _ in 0..iterations {
        std::hint::black_box(compute_forecast(std::hint::black_box(&campaign), &card));
    }

    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;

    println!("=== Forecast Benchmark ===");
    println!("Iterations:  {}", iterations);
    println!("Total time:  {:?}", elapsed);
    println!("Per call:    {:?}", per_iter);
    println!("Throughput:  {:.0} forecasts/sec", iterations as f64 / elapsed.as_secs_f64());
    println!("Channels:    {}", campaign.channels.len());
}
