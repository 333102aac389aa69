//! Volatility analysis over the token pair's lookback window

use std::sync::Arc;
use tracing::debug;
use crate::{
    config::VolatilityConfig,
    types::{RiskSignal, ValidOpportunity},
    volatility::PriceHistory,
};
use super::RiskModule;

/// Maps lookback volatility to [0, 1]. Confidence tracks how much history was
/// available; without history the configured prior is reported with low
/// confidence rather than a zero score.
pub struct VolatilityAnalyzer {
    config: VolatilityConfig,
    history: Arc<dyn PriceHistory>,
}

impl VolatilityAnalyzer {
    pub const NAME: &'static str = "volatility";

    pub fn new(config: VolatilityConfig, history: Arc<dyn PriceHistory>) -> Self {
        Self { config, history }
    }
}

impl RiskModule for VolatilityAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn analyze(&self, opp: &ValidOpportunity<'_>) -> RiskSignal {
        let observation = opp
            .token_pair_id
            .and_then(|pair| self.history.observe(pair));

        let Some(observation) = observation else {
            debug!(pair = ?opp.token_pair_id, "No volatility history, using prior");
            return RiskSignal::new(Self::NAME, self.config.prior_score, self.config.prior_confidence)
                .with_factor("sample_count", 0.0);
        };

        let score = (observation.volatility_pct / self.config.saturation_pct).clamp(0.0, 1.0);
        let confidence = (observation.sample_count as f64
            / self.config.full_confidence_samples as f64)
            .clamp(self.config.prior_confidence, 1.0);

        debug!(
            pair = ?opp.token_pair_id,
            volatility_pct = observation.volatility_pct,
            score,
            confidence,
            "Volatility analyzed"
        );

        RiskSignal::new(Self::NAME, score, confidence)
            .with_factor("volatility_pct", observation.volatility_pct)
            .with_factor("sample_count", observation.sample_count as f64)
    }
}
