//! MEV Profit Engine - Demo Runner
//!
//! Evaluates a batch of opportunities from a JSON file (or a built-in sample
//! set) and logs a profit report for each one.

use mev_profit_engine::*;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use mev_profit_engine::volatility::InMemoryPriceHistory;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoInput {
    opportunities: Vec<Opportunity>,
    #[serde(default)]
    price_history: HashMap<String, Vec<PricePoint>>,
}

#[derive(Debug, Deserialize)]
struct PricePoint {
    timestamp: DateTime<Utc>,
    price: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    utils::setup_output_directories()?;
    let _logging_guard = utils::setup_logging()?;

    // Load configuration
    let config = EngineConfig::load();
    config.validate().context("Invalid engine configuration")?;

    info!("🧮 MEV Profit Engine v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Base Fee: ${} + ${} priority", config.gas.base_fee, config.gas.base_priority_fee);
    info!("   Base Slippage: {} bps", config.slippage.base_slippage_bps);
    info!("   Default Venue Fee: {} bps", config.fees.default_fee_bps);
    info!("   Samples: {}", config.simulation.default_sample_count);
    info!("   Confidence Level: {:.0}%", config.simulation.default_confidence_level * 100.0);
    info!("   Bootstrap Resamples: {}", config.simulation.bootstrap_resamples);

    let input = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file {}", path))?;
            serde_json::from_str::<DemoInput>(&raw)
                .with_context(|| format!("Failed to parse input file {}", path))?
        }
        None => {
            info!("No input file given, using built-in sample opportunities");
            sample_input()
        }
    };

    let mut history = InMemoryPriceHistory::new(config.volatility.lookback_secs);
    for (pair, points) in &input.price_history {
        for point in points {
            history.record(pair, point.timestamp, point.price);
        }
    }
    info!("📈 Price history loaded for {} token pairs", history.pair_count());

    let deadline = std::env::var("BATCH_DEADLINE_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis);

    let engine = Arc::new(ProfitCalculationEngine::with_price_history(config, Arc::new(history))?);
    let options = engine.default_options();

    info!("\n🚀 Evaluating {} opportunities...\n", input.opportunities.len());
    let results = engine
        .calculate_batch_concurrent(input.opportunities, options, deadline)
        .await;

    for (index, result) in results.iter().enumerate() {
        match result {
            Ok(report) => utils::print_profit_report(index, report),
            Err(e) => utils::print_batch_failure(index, e),
        }
    }

    utils::print_batch_summary(&BatchSummary::from_results(&results));

    Ok(())
}

fn sample_input() -> DemoInput {
    let now = Utc::now();
    let pair = "WETH/USDC";

    // one price per minute over the last hour, oscillating around 3000
    let points = (0..60)
        .map(|i: i64| {
            let swing = if i % 2 == 0 { 6.0 } else { -6.0 };
            PricePoint {
                timestamp: now - ChronoDuration::minutes(60 - i),
                price: 3000.0 + swing + i as f64 * 0.5,
            }
        })
        .collect();

    DemoInput {
        opportunities: vec![
            Opportunity::new(StrategyType::Arbitrage, dec!(100), dec!(110), dec!(1000), "uniswap")
                .with_secondary_venue("sushiswap")
                .with_token_pair(pair)
                .with_detection_timestamp(now),
            Opportunity::new(StrategyType::Liquidation, dec!(2990), dec!(3010), dec!(25), "aave")
                .with_secondary_venue("uniswap")
                .with_token_pair(pair)
                .with_detection_timestamp(now - ChronoDuration::seconds(6)),
            Opportunity::new(StrategyType::Sandwich, dec!(1.000), dec!(1.002), dec!(50000), "uniswap")
                .with_token_pair("USDC/DAI"),
            // rejected: sell price below buy price
            Opportunity::new(StrategyType::Arbitrage, dec!(105), dec!(100), dec!(1000), "uniswap"),
        ],
        price_history: HashMap::from([(pair.to_string(), points)]),
    }
}
