//! Competition analysis: chance another searcher captures the opportunity first

use tracing::debug;
use crate::{
    config::CompetitionConfig,
    types::{RiskSignal, ValidOpportunity},
    utils::to_f64,
};
use super::{RiskModule, saturation};

pub struct CompetitionAnalyzer {
    config: CompetitionConfig,
}

impl CompetitionAnalyzer {
    pub const NAME: &'static str = "competition";

    pub fn new(config: CompetitionConfig) -> Self {
        Self { config }
    }
}

impl RiskModule for CompetitionAnalyzer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Simple strategies start from a higher base rate; volume closes the
    /// remaining headroom towards certainty.
    fn analyze(&self, opp: &ValidOpportunity<'_>) -> RiskSignal {
        let base = self.config.base_probability(opp.strategy).clamp(0.0, 1.0);
        let pressure = saturation(to_f64(opp.volume), self.config.volume_scale);
        let probability = (base + (1.0 - base) * pressure).clamp(0.0, 1.0);

        debug!(strategy = %opp.strategy, probability, "Competition analyzed");

        RiskSignal::new(Self::NAME, probability, self.config.confidence)
            .with_factor("base_rate", base)
            .with_factor("volume_pressure", pressure)
    }
}
