//! End-to-end tests for single-opportunity calculations.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mev_profit_engine::config::MAX_VOLUME;
use mev_profit_engine::volatility::InMemoryPriceHistory;
use mev_profit_engine::{
    CalculationOptions, EngineConfig, EngineError, IntervalMethod, Opportunity,
    ProfitCalculationEngine, StrategyType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine() -> ProfitCalculationEngine {
    ProfitCalculationEngine::new(EngineConfig::default()).unwrap()
}

fn options() -> CalculationOptions {
    CalculationOptions::default()
        .with_sample_count(2_000)
        .with_bootstrap_resamples(200)
        .with_seed(1234)
}

fn arbitrage(buy: Decimal, sell: Decimal, volume: Decimal) -> Opportunity {
    Opportunity::new(StrategyType::Arbitrage, buy, sell, volume, "uniswap")
        .with_secondary_venue("sushiswap")
        .with_token_pair("WETH/USDC")
}

#[test]
fn ten_percent_spread_reports_ten_percent_base_profit() {
    let report = engine()
        .calculate_with(&arbitrage(dec!(100), dec!(110), dec!(1000)), &options())
        .unwrap();

    assert_eq!(report.base_profit.percentage, dec!(10));
    assert_eq!(report.base_profit.gross, dec!(10000));
    assert!(report.costs.total > Decimal::ZERO);
    assert!(report.is_profitable());
}

#[test]
fn narrower_spread_lowers_expected_profit() {
    let engine = engine();
    let wide = engine
        .calculate_with(&arbitrage(dec!(100), dec!(110), dec!(1000)), &options())
        .unwrap();
    let narrow = engine
        .calculate_with(&arbitrage(dec!(100), dec!(100.5), dec!(1000)), &options())
        .unwrap();

    assert!(narrow.net_profit.expected < wide.net_profit.expected);
}

#[test]
fn larger_volume_raises_combined_risk() {
    let engine = engine();
    let large = engine
        .calculate_with(&arbitrage(dec!(100), dec!(110), dec!(10000)), &options())
        .unwrap();
    let small = engine
        .calculate_with(&arbitrage(dec!(100), dec!(110), dec!(100)), &options())
        .unwrap();

    assert!(large.risks.combined_risk_score > small.risks.combined_risk_score);
    assert!(large.risks.competition > small.risks.competition);
}

#[test]
fn volume_monotonicity_holds_at_the_volume_ceiling() {
    let engine = engine();
    let options = options().with_sample_count(200);
    let below = engine
        .calculate_with(&arbitrage(dec!(100), dec!(110), MAX_VOLUME - dec!(1)), &options)
        .unwrap();
    let at = engine
        .calculate_with(&arbitrage(dec!(100), dec!(110), MAX_VOLUME), &options)
        .unwrap();

    assert!(at.risks.combined_risk_score > below.risks.combined_risk_score);
}

#[test]
fn volume_above_the_ceiling_is_rejected() {
    let err = engine()
        .calculate(&arbitrage(dec!(100), dec!(110), MAX_VOLUME + dec!(1)))
        .unwrap_err();

    assert!(matches!(err, EngineError::EconomicInvariant { .. }));
}

#[test]
fn huge_slippage_on_shallow_venue_still_reports() {
    let mut config = EngineConfig::default();
    config.slippage.venue_liquidity.insert("uniswap".to_string(), dec!(1));
    config.slippage.venue_liquidity.insert("sushiswap".to_string(), dec!(1));
    let engine = ProfitCalculationEngine::new(config).unwrap();

    let report = engine
        .calculate_with(
            &arbitrage(dec!(100), dec!(110), MAX_VOLUME),
            &options().with_sample_count(200),
        )
        .unwrap();

    // squaring a cost this large overflows a decimal
    let slippage = &report.costs.estimates.slippage;
    assert!(slippage.total > dec!(1_000_000_000_000_000));
    assert!(slippage.variance.is_finite() && slippage.variance > 1e29);
    assert!(!report.is_profitable());
}

#[test]
fn levels_next_to_one_still_calculate() {
    let report = engine()
        .calculate_with(
            &arbitrage(dec!(100), dec!(110), dec!(1000)),
            &options().with_confidence_level(0.9999999999999999),
        )
        .unwrap();

    let net = &report.net_profit;
    assert!(net.confidence_lower <= net.expected && net.expected <= net.confidence_upper);
}

#[test]
fn empty_opportunity_reports_every_missing_field() {
    let err = engine().calculate(&Opportunity::default()).unwrap_err();

    match err {
        EngineError::MissingField { fields } => {
            assert_eq!(
                fields,
                vec!["strategy_type", "buy_price", "sell_price", "volume", "primary_venue"]
            );
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn inverted_prices_violate_economics() {
    let err = engine()
        .calculate(&arbitrage(dec!(105), dec!(100), dec!(1000)))
        .unwrap_err();

    assert!(matches!(err, EngineError::EconomicInvariant { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn zero_buy_price_is_a_numeric_degeneracy() {
    let err = engine()
        .calculate(&arbitrage(dec!(0), dec!(1), dec!(1000)))
        .unwrap_err();

    assert!(matches!(err, EngineError::NumericDegeneracy { .. }));
}

#[test]
fn single_sample_has_no_spread() {
    let report = engine()
        .calculate_with(
            &arbitrage(dec!(100), dec!(110), dec!(1000)),
            &options().with_sample_count(1),
        )
        .unwrap();

    let net = &report.net_profit;
    assert_eq!(report.sample_count, 1);
    assert_eq!(net.worst_case, net.best_case);
    assert_eq!(net.worst_case, net.expected);
    assert_eq!(net.confidence_lower, net.expected);
    assert_eq!(net.confidence_upper, net.expected);
}

#[test]
fn confidence_bounds_contain_expected_for_both_methods() {
    let engine = engine();
    let opp = arbitrage(dec!(100), dec!(101), dec!(5000));

    for method in [IntervalMethod::Parametric, IntervalMethod::Bootstrap] {
        for sample_count in [2, 10, 500] {
            let report = engine
                .calculate_with(
                    &opp,
                    &options()
                        .with_sample_count(sample_count)
                        .with_interval_method(method),
                )
                .unwrap();
            let net = &report.net_profit;
            assert!(net.confidence_lower <= net.expected, "{method:?} n={sample_count}");
            assert!(net.expected <= net.confidence_upper, "{method:?} n={sample_count}");
        }
    }
}

#[test]
fn success_probability_mirrors_profitability() {
    let report = engine()
        .calculate_with(&arbitrage(dec!(100), dec!(100.2), dec!(1000)), &options())
        .unwrap();

    let p = report.probabilities.profitability;
    assert!((0.0..=1.0).contains(&p));
    assert_eq!(report.probabilities.success, p);
}

#[test]
fn every_strategy_produces_a_report() {
    let engine = engine();
    for strategy in StrategyType::ALL {
        let opp = Opportunity::new(strategy, dec!(2990), dec!(3010), dec!(25), "uniswap");
        let report = engine.calculate_with(&opp, &options()).unwrap();
        assert_eq!(report.strategy, strategy);
        assert!(report.costs.gas > Decimal::ZERO);
        assert!((1.0..=10.0).contains(&report.risks.combined_risk_score));
    }
}

#[test]
fn stale_detection_raises_risk() {
    let engine = engine();
    let now = Utc::now();
    let fresh = arbitrage(dec!(100), dec!(110), dec!(1000)).with_detection_timestamp(now);
    let stale = arbitrage(dec!(100), dec!(110), dec!(1000))
        .with_detection_timestamp(now - Duration::seconds(60));
    let options = options().with_evaluated_at(now);

    let fresh = engine.calculate_with(&fresh, &options).unwrap();
    let stale = engine.calculate_with(&stale, &options).unwrap();

    assert!(stale.risks.combined_risk_score > fresh.risks.combined_risk_score);
}

#[test]
fn price_history_drives_volatility_signal() {
    let start = Utc::now() - Duration::minutes(30);
    let mut history = InMemoryPriceHistory::new(3_600);
    for i in 0..30 {
        // alternating 10% swings
        let price = if i % 2 == 0 { 3000.0 } else { 3300.0 };
        history.record("WETH/USDC", start + Duration::minutes(i), price);
    }

    let with_history =
        ProfitCalculationEngine::with_price_history(EngineConfig::default(), Arc::new(history))
            .unwrap();
    let opp = arbitrage(dec!(100), dec!(110), dec!(1000));

    let volatile = with_history.calculate_with(&opp, &options()).unwrap();
    let prior = engine().calculate_with(&opp, &options()).unwrap();

    assert_eq!(volatile.risks.volatility, 1.0);
    assert!(volatile.risks.volatility > prior.risks.volatility);
    assert!(volatile.risks.combined_risk_score > prior.risks.combined_risk_score);
}

#[test]
fn report_serializes_with_camel_case_fields() {
    let report = engine()
        .calculate_with(&arbitrage(dec!(100), dec!(110), dec!(1000)), &options())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["netProfit"]["riskAdjusted"].is_string() || json["netProfit"]["riskAdjusted"].is_number());
    assert!(json["risks"]["combinedRiskScore"].is_number());
    assert!(json["calculationTimeMs"].is_number());
    assert_eq!(json["strategy"], "arbitrage");
    assert!(json["intervals"]["parametric"]["confidenceLevel"].is_number());
    assert!(json["intervals"]["parametric"].get("confidence_level").is_none());
    assert!(json["baseProfit"]["gross"].is_string());
    assert!(json["probabilities"]["profitability"].is_number());
}
