//! Slippage estimation from trade size relative to venue liquidity

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use crate::{
    config::SlippageConfig,
    errors::EngineResult,
    types::{CostComponent, CostEstimate, ValidOpportunity},
    utils::{bps_to_fraction, checked_add, checked_div, checked_mul, relative_variance},
};
use super::{CostModule, leg_label};

/// Per leg: `volume * base_slippage * (1 + volume / depth)`. The base term
/// covers price movement between detection and inclusion, the depth term
/// covers price impact.
pub struct SlippageEstimator {
    config: SlippageConfig,
}

impl SlippageEstimator {
    pub fn new(config: SlippageConfig) -> Self {
        Self { config }
    }
}

impl CostModule for SlippageEstimator {
    fn component(&self) -> CostComponent {
        CostComponent::Slippage
    }

    fn estimate(&self, opp: &ValidOpportunity<'_>) -> EngineResult<CostEstimate> {
        let rate = bps_to_fraction(self.config.base_slippage_bps);
        let volume = opp.volume.max(Decimal::ZERO);

        let mut estimate = CostEstimate::new(CostComponent::Slippage, Decimal::ZERO, 0.0);
        let mut total = Decimal::ZERO;
        for (index, venue) in opp.legs().into_iter().enumerate() {
            let depth = self.config.liquidity_depth(venue);
            let impact = checked_div(volume, depth, "slippage liquidity ratio")?;
            let leg_cost = checked_mul(
                checked_mul(volume, rate, "slippage")?,
                checked_add(dec!(1), impact, "slippage liquidity ratio")?,
                "slippage",
            )?;
            total = checked_add(total, leg_cost, "slippage total")?;
            estimate = estimate.with_item(leg_label(index, venue), leg_cost);
        }

        estimate.total = total;
        estimate.variance = relative_variance(total, self.config.uncertainty);

        debug!(
            volume = %opp.volume,
            total = %estimate.total,
            variance = estimate.variance,
            "Slippage estimated"
        );

        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::test_support::valid;
    use crate::types::StrategyType;

    #[test]
    fn zero_volume_costs_nothing() {
        let estimate = SlippageEstimator::new(SlippageConfig::default())
            .estimate(&valid(StrategyType::Arbitrage, dec!(0)))
            .unwrap();
        assert_eq!(estimate.total, dec!(0));
        assert_eq!(estimate.variance, 0.0);
    }

    #[test]
    fn two_legs_at_default_depth() {
        let estimate = SlippageEstimator::new(SlippageConfig::default())
            .estimate(&valid(StrategyType::Arbitrage, dec!(1000)))
            .unwrap();
        // 2 * 1000 * 0.001 * (1 + 0.001)
        assert_eq!(estimate.total, dec!(2.002));
        assert_eq!(estimate.breakdown.len(), 2);
        assert!(estimate.breakdown.contains_key("leg2:sushiswap"));
    }

    #[test]
    fn shallow_venues_slip_more() {
        let mut config = SlippageConfig::default();
        let deep = SlippageEstimator::new(config.clone())
            .estimate(&valid(StrategyType::Arbitrage, dec!(50_000)))
            .unwrap();
        config.venue_liquidity.insert("sushiswap".to_string(), dec!(100_000));
        let shallow = SlippageEstimator::new(config)
            .estimate(&valid(StrategyType::Arbitrage, dec!(50_000)))
            .unwrap();
        assert!(shallow.total > deep.total);
        assert!(shallow.variance > deep.variance);
    }

    #[test]
    fn grows_faster_than_volume() {
        let estimator = SlippageEstimator::new(SlippageConfig::default());
        let small = estimator.estimate(&valid(StrategyType::Arbitrage, dec!(1_000))).unwrap();
        let large = estimator.estimate(&valid(StrategyType::Arbitrage, dec!(10_000))).unwrap();
        assert!(large.total > small.total * dec!(10));
    }
}
