//! Profit calculation engine: validation, cost and risk modules, simulation
//! and interval estimation assembled into a single report

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use crate::{
    config::EngineConfig,
    costs::{CostModule, GasCostEstimator, SlippageEstimator, TradingFeeEstimator},
    errors::EngineResult,
    risk::{CompetitionAnalyzer, RiskModule, RiskScorer, VolatilityAnalyzer},
    simulation::MonteCarloSimulator,
    stats::ConfidenceEstimator,
    types::{
        BaseProfit, CalculationOptions, CostEstimate, CostEstimates, CostSummary, IntervalSummary, NetProfit,
        Opportunity, Probabilities, ProfitReport, RiskSignal, RiskSignals, RiskSummary, ValidOpportunity,
    },
    utils::{checked_div, checked_mul, to_decimal},
    validation::{validate_opportunity, validate_options},
    volatility::{NoPriceHistory, PriceHistory},
};

/// Stateless between calls: every module holds read-only configuration, so
/// one engine can serve any number of concurrent calculations.
pub struct ProfitCalculationEngine {
    config: EngineConfig,
    gas: GasCostEstimator,
    slippage: SlippageEstimator,
    fees: TradingFeeEstimator,
    competition: CompetitionAnalyzer,
    volatility: VolatilityAnalyzer,
    scorer: RiskScorer,
    simulator: MonteCarloSimulator,
    intervals: ConfidenceEstimator,
}

impl ProfitCalculationEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_price_history(config, Arc::new(NoPriceHistory))
    }

    pub fn with_price_history(
        config: EngineConfig,
        history: Arc<dyn PriceHistory>,
    ) -> EngineResult<Self> {
        config.validate()?;

        Ok(Self {
            gas: GasCostEstimator::new(config.gas.clone()),
            slippage: SlippageEstimator::new(config.slippage.clone()),
            fees: TradingFeeEstimator::new(config.fees.clone()),
            competition: CompetitionAnalyzer::new(config.competition.clone()),
            volatility: VolatilityAnalyzer::new(config.volatility.clone(), history),
            scorer: RiskScorer::new(config.risk.clone()),
            simulator: MonteCarloSimulator::new(config.simulation.clone()),
            intervals: ConfidenceEstimator::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Options built from the engine's configured simulation defaults.
    pub fn default_options(&self) -> CalculationOptions {
        CalculationOptions::default()
            .with_sample_count(self.config.simulation.default_sample_count)
            .with_confidence_level(self.config.simulation.default_confidence_level)
            .with_bootstrap_resamples(self.config.simulation.bootstrap_resamples)
    }

    pub fn calculate(&self, opp: &Opportunity) -> EngineResult<ProfitReport> {
        self.calculate_with(opp, &self.default_options())
    }

    pub fn calculate_with(
        &self,
        opp: &Opportunity,
        options: &CalculationOptions,
    ) -> EngineResult<ProfitReport> {
        let start = Instant::now();

        validate_options(options)?;
        let valid = validate_opportunity(opp)?;

        let costs = self.estimate_costs(&valid)?;
        let evaluated_at = options.evaluated_at.unwrap_or_else(Utc::now);
        let risks = self.analyze_risks(&valid, evaluated_at);

        let spread = valid.price_spread();
        let base_profit = BaseProfit {
            gross: checked_mul(spread, valid.volume, "gross profit")?,
            percentage: checked_mul(
                checked_div(spread, valid.buy_price, "base profit percentage")?,
                dec!(100),
                "base profit percentage",
            )?,
        };

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let simulation = self
            .simulator
            .run(&valid, &costs, &risks, options.sample_count, &mut rng)?;

        let intervals = IntervalSummary {
            parametric: self
                .intervals
                .parametric(simulation.samples(), options.confidence_level)?,
            bootstrap: self.intervals.bootstrap(
                simulation.samples(),
                options.confidence_level,
                options.bootstrap_resamples,
                &mut rng,
            )?,
        };

        let expected = to_decimal(simulation.mean, "expected net profit")?;
        let selected = intervals.get(options.interval_method);
        // a bootstrap interval of the mean can miss the sample mean on tiny
        // or very skewed samples; the reported band always contains it
        let confidence_lower = to_decimal(selected.lower, "confidence lower")?.min(expected);
        let confidence_upper = to_decimal(selected.upper, "confidence upper")?.max(expected);

        let combined_risk_score = risks.combined.score;
        let discount = self.config.simulation.risk_adjustment_weight * combined_risk_score / 10.0;
        let risk_adjusted = to_decimal(simulation.mean * (1.0 - discount), "risk-adjusted profit")?;

        let net_profit = NetProfit {
            expected,
            median: to_decimal(simulation.median, "median net profit")?,
            worst_case: to_decimal(simulation.worst_case, "worst case")?,
            best_case: to_decimal(simulation.best_case, "best case")?,
            percentile_5: to_decimal(simulation.percentile(5.0), "5th percentile")?,
            percentile_95: to_decimal(simulation.percentile(95.0), "95th percentile")?,
            confidence_lower,
            confidence_upper,
            confidence_method: options.interval_method,
            risk_adjusted,
        };

        let costs = CostSummary {
            gas: costs.gas.total,
            slippage: costs.slippage.total,
            fees: costs.fees.total,
            total: costs.total(),
            estimates: costs,
        };

        let risks = RiskSummary {
            competition: risks.competition.score,
            volatility: risks.volatility.score,
            combined_risk_score,
            level: risks.level,
            signals: risks,
        };

        let report = ProfitReport {
            id: uuid::Uuid::new_v4().to_string(),
            cache_key: cache_key(opp, options),
            strategy: valid.strategy,
            calculated_at: Utc::now(),
            base_profit,
            costs,
            risks,
            net_profit,
            intervals,
            probabilities: Probabilities {
                profitability: simulation.profitability_probability,
                success: simulation.profitability_probability,
            },
            sample_count: simulation.sample_count,
            calculation_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            report_id = %report.id,
            strategy = %report.strategy,
            expected = %report.net_profit.expected,
            risk_score = report.risks.combined_risk_score,
            profitability = report.probabilities.profitability,
            calculation_time_ms = report.calculation_time_ms,
            "Profit calculation complete"
        );

        Ok(report)
    }

    fn estimate_costs(&self, valid: &ValidOpportunity<'_>) -> EngineResult<CostEstimates> {
        let costs = CostEstimates {
            gas: run_cost_module(&self.gas, valid)?,
            slippage: run_cost_module(&self.slippage, valid)?,
            fees: run_cost_module(&self.fees, valid)?,
        };
        debug!(total = %costs.total(), "Costs estimated");
        Ok(costs)
    }

    fn analyze_risks(
        &self,
        valid: &ValidOpportunity<'_>,
        evaluated_at: chrono::DateTime<Utc>,
    ) -> RiskSignals {
        let competition = run_risk_module(&self.competition, valid);
        let volatility = run_risk_module(&self.volatility, valid);
        let (combined, level) = self
            .scorer
            .analyze(valid, &competition, &volatility, evaluated_at);

        RiskSignals {
            competition,
            volatility,
            combined,
            level,
        }
    }
}

fn run_cost_module(module: &dyn CostModule, valid: &ValidOpportunity<'_>) -> EngineResult<CostEstimate> {
    let estimate = module.estimate(valid)?;
    debug_assert_eq!(estimate.component, module.component());
    Ok(estimate)
}

fn run_risk_module(module: &dyn RiskModule, valid: &ValidOpportunity<'_>) -> RiskSignal {
    let signal = module.analyze(valid);
    debug!(module = module.name(), score = signal.score, confidence = signal.confidence, "Risk module finished");
    signal
}

/// Content hash of the opportunity and every option that shapes the result.
///
/// Process-local: `DefaultHasher` output may change between Rust releases, so
/// the key is only good for in-memory caches and must not be persisted.
pub fn cache_key(opp: &Opportunity, options: &CalculationOptions) -> String {
    let mut hasher = DefaultHasher::new();
    opp.hash(&mut hasher);
    options.sample_count.hash(&mut hasher);
    options.confidence_level.to_bits().hash(&mut hasher);
    options.interval_method.hash(&mut hasher);
    options.bootstrap_resamples.hash(&mut hasher);
    options.seed.hash(&mut hasher);
    options.evaluated_at.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
