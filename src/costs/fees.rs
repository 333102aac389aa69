//! Venue trading fee estimation

use rust_decimal::Decimal;
use tracing::debug;
use crate::{
    config::FeeConfig,
    errors::EngineResult,
    types::{CostComponent, CostEstimate, ValidOpportunity},
    utils::{bps_to_fraction, checked_add, checked_mul},
};
use super::{CostModule, leg_label};

/// Proportional fee on `volume` for every leg. Fee schedules are known in
/// advance, so the estimate carries no variance.
pub struct TradingFeeEstimator {
    config: FeeConfig,
}

impl TradingFeeEstimator {
    pub fn new(config: FeeConfig) -> Self {
        Self { config }
    }
}

impl CostModule for TradingFeeEstimator {
    fn component(&self) -> CostComponent {
        CostComponent::Fees
    }

    fn estimate(&self, opp: &ValidOpportunity<'_>) -> EngineResult<CostEstimate> {
        let volume = opp.volume.max(Decimal::ZERO);

        let mut estimate = CostEstimate::new(CostComponent::Fees, Decimal::ZERO, 0.0);
        for (index, venue) in opp.legs().into_iter().enumerate() {
            let fee = checked_mul(volume, bps_to_fraction(self.config.fee_bps(venue)), "trading fee")?;
            estimate.total = checked_add(estimate.total, fee, "trading fee total")?;
            estimate = estimate.with_item(leg_label(index, venue), fee);
        }

        debug!(volume = %opp.volume, total = %estimate.total, "Trading fees estimated");

        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::test_support::valid;
    use crate::types::StrategyType;
    use rust_decimal_macros::dec;

    #[test]
    fn charges_each_venue_its_own_rate() {
        let mut config = FeeConfig::default();
        config.venue_fee_bps.insert("sushiswap".to_string(), 25);
        let estimate = TradingFeeEstimator::new(config)
            .estimate(&valid(StrategyType::Arbitrage, dec!(1000)))
            .unwrap();
        assert_eq!(estimate.breakdown["leg1:uniswap"], dec!(3));
        assert_eq!(estimate.breakdown["leg2:sushiswap"], dec!(2.5));
        assert_eq!(estimate.total, dec!(5.5));
        assert_eq!(estimate.variance, 0.0);
    }

    #[test]
    fn sandwich_pays_primary_venue_twice() {
        let estimate = TradingFeeEstimator::new(FeeConfig::default())
            .estimate(&valid(StrategyType::Sandwich, dec!(1000)))
            .unwrap();
        assert_eq!(estimate.total, dec!(6));
        assert!(estimate.breakdown.keys().all(|k| k.ends_with("uniswap")));
    }
}
