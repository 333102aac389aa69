//! Monte Carlo simulation of net profit

use rand::Rng;
use std::time::Instant;
use tracing::debug;
use crate::{
    config::SimulationConfig,
    errors::{EngineError, EngineResult},
    types::{CostEstimate, CostEstimates, RiskSignals, SimulationResult, ValidOpportunity},
    utils::{checked_mul, to_f64},
};
use super::{non_negative_normal, standard_normal};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl CostDistribution {
    fn from_estimate(estimate: &CostEstimate) -> Self {
        Self {
            mean: to_f64(estimate.total).max(0.0),
            std_dev: estimate.variance.max(0.0).sqrt(),
        }
    }
}

/// Per-sample noise derived from the module outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    pub gross_profit: f64,
    pub gas: CostDistribution,
    pub slippage: CostDistribution,
    pub fees: CostDistribution,
    /// One-sigma relative price move between detection and execution.
    pub price_sigma: f64,
    /// Chance another actor captures the opportunity; the sample then only pays gas.
    pub capture_probability: f64,
}

impl NoiseModel {
    pub fn new(
        opp: &ValidOpportunity<'_>,
        costs: &CostEstimates,
        risks: &RiskSignals,
        config: &SimulationConfig,
    ) -> EngineResult<Self> {
        let gross = checked_mul(opp.price_spread(), opp.volume, "gross profit")?;

        // less confident volatility readings widen the price noise, up to twice
        let uncertainty = 2.0 - risks.volatility.confidence.clamp(0.0, 1.0);
        let price_sigma = risks.volatility.score.clamp(0.0, 1.0) * config.max_price_move * uncertainty;
        let capture_probability = risks.competition.score;

        if !price_sigma.is_finite() || !capture_probability.is_finite() {
            return Err(EngineError::numeric(
                "noise model",
                format!("price sigma {price_sigma}, capture probability {capture_probability}"),
            ));
        }

        Ok(Self {
            gross_profit: to_f64(gross),
            gas: CostDistribution::from_estimate(&costs.gas),
            slippage: CostDistribution::from_estimate(&costs.slippage),
            fees: CostDistribution::from_estimate(&costs.fees),
            price_sigma,
            capture_probability: capture_probability.clamp(0.0, 1.0),
        })
    }

    /// Expected net profit without noise.
    pub fn point_estimate(&self) -> f64 {
        (1.0 - self.capture_probability)
            * (self.gross_profit - self.slippage.mean - self.fees.mean)
            - self.gas.mean
    }

    /// One simulated net profit. Consumes the same number of random values
    /// on every call.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let price_factor = (1.0 + self.price_sigma * standard_normal(rng)).max(0.0);
        let gas = non_negative_normal(rng, self.gas.mean, self.gas.std_dev);
        let slippage = non_negative_normal(rng, self.slippage.mean, self.slippage.std_dev);
        let fees = non_negative_normal(rng, self.fees.mean, self.fees.std_dev);
        let captured = rng.random::<f64>() < self.capture_probability;

        if captured {
            -gas
        } else {
            self.gross_profit * price_factor - gas - slippage - fees
        }
    }
}

pub struct MonteCarloSimulator {
    config: SimulationConfig,
}

impl MonteCarloSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Draws `sample_count` independent net-profit samples. A single sample
    /// is the deterministic point estimate. Inputs are only read.
    pub fn run<R: Rng + ?Sized>(
        &self,
        opp: &ValidOpportunity<'_>,
        costs: &CostEstimates,
        risks: &RiskSignals,
        sample_count: usize,
        rng: &mut R,
    ) -> EngineResult<SimulationResult> {
        if sample_count == 0 {
            return Err(EngineError::InvalidOptions {
                reason: "sample count must be at least 1".to_string(),
            });
        }

        let start = Instant::now();
        let model = NoiseModel::new(opp, costs, risks, &self.config)?;

        let samples = if sample_count == 1 {
            vec![model.point_estimate()]
        } else {
            (0..sample_count).map(|_| model.draw(rng)).collect()
        };
        let result = SimulationResult::from_samples(samples)?;

        debug!(
            sample_count,
            mean = result.mean,
            worst_case = result.worst_case,
            best_case = result.best_case,
            profitability = result.profitability_probability,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Monte Carlo simulation finished"
        );

        Ok(result)
    }
}
