//! Combined 1-10 risk score

use chrono::{DateTime, Utc};
use tracing::debug;
use crate::{
    config::RiskWeights,
    types::{RiskLevel, RiskSignal, ValidOpportunity},
    utils::to_f64,
};
use super::saturation;

pub const MIN_RISK_SCORE: f64 = 1.0;
pub const MAX_RISK_SCORE: f64 = 10.0;

/// Weighted blend of competition, volatility, time since detection and
/// volume exposure, mapped onto [1, 10]. Competition and exposure both rise
/// strictly with volume, so a larger otherwise-identical opportunity always
/// scores strictly higher.
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub const NAME: &'static str = "combined";

    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn analyze(
        &self,
        opp: &ValidOpportunity<'_>,
        competition: &RiskSignal,
        volatility: &RiskSignal,
        evaluated_at: DateTime<Utc>,
    ) -> (RiskSignal, RiskLevel) {
        let w = &self.weights;

        let age_secs = opp
            .detection_timestamp
            .map(|detected| (evaluated_at - detected).num_milliseconds().max(0) as f64 / 1_000.0)
            .unwrap_or(0.0);
        let staleness = saturation(age_secs, w.staleness_half_life_secs);
        let exposure = saturation(to_f64(opp.volume), w.exposure_scale);

        let blended = w.competition * competition.score.clamp(0.0, 1.0)
            + w.volatility * volatility.score.clamp(0.0, 1.0)
            + w.staleness * staleness
            + w.exposure * exposure;
        let score = (MIN_RISK_SCORE + (MAX_RISK_SCORE - MIN_RISK_SCORE) * blended)
            .clamp(MIN_RISK_SCORE, MAX_RISK_SCORE);

        // staleness and exposure are measured, not estimated
        let confidence = (w.competition * competition.confidence
            + w.volatility * volatility.confidence
            + w.staleness
            + w.exposure)
            .clamp(0.0, 1.0);

        let level = RiskLevel::from_score(score);

        debug!(score, ?level, age_secs, exposure, "Risk scored");

        let signal = RiskSignal::new(Self::NAME, score, confidence)
            .with_factor("competition", competition.score)
            .with_factor("volatility", volatility.score)
            .with_factor("staleness", staleness)
            .with_factor("exposure", exposure)
            .with_factor("age_secs", age_secs);

        (signal, level)
    }
}
