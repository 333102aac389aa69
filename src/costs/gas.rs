//! Gas cost estimation

use rust_decimal::Decimal;
use tracing::debug;
use crate::{
    config::GasConfig,
    errors::EngineResult,
    types::{CostComponent, CostEstimate, ValidOpportunity},
    utils::{checked_add, checked_mul, relative_variance},
};
use super::CostModule;

/// Base fee plus priority fee, scaled by how many instructions the strategy
/// needs on chain.
pub struct GasCostEstimator {
    config: GasConfig,
}

impl GasCostEstimator {
    pub fn new(config: GasConfig) -> Self {
        Self { config }
    }
}

impl CostModule for GasCostEstimator {
    fn component(&self) -> CostComponent {
        CostComponent::Gas
    }

    fn estimate(&self, opp: &ValidOpportunity<'_>) -> EngineResult<CostEstimate> {
        let multiplier = self.config.strategy_multiplier(opp.strategy);
        let base_fee = checked_mul(self.config.base_fee, multiplier, "gas base fee")?;
        let priority_fee = checked_mul(self.config.base_priority_fee, multiplier, "gas priority fee")?;
        let total = checked_add(base_fee, priority_fee, "gas total")?.max(Decimal::ZERO);

        let variance = relative_variance(total, self.config.uncertainty);

        debug!(
            strategy = %opp.strategy,
            %total,
            variance,
            "Gas cost estimated"
        );

        Ok(CostEstimate::new(CostComponent::Gas, total, variance)
            .with_item("base_fee", base_fee)
            .with_item("priority_fee", priority_fee))
    }
}
