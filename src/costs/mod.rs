//! Cost modules: gas, slippage and trading fees
//!
//! Each module is deterministic for a given opportunity and configuration.
//! Randomness is applied later by the simulator using the reported variance.

pub mod gas;
pub mod slippage;
pub mod fees;

pub use gas::*;
pub use slippage::*;
pub use fees::*;

use crate::{
    errors::EngineResult,
    types::{CostComponent, CostEstimate, ValidOpportunity},
};

pub trait CostModule: Send + Sync {
    fn component(&self) -> CostComponent;

    /// Expected cost and variance. Both are never negative.
    fn estimate(&self, opp: &ValidOpportunity<'_>) -> EngineResult<CostEstimate>;
}

fn leg_label(index: usize, venue: &str) -> String {
    format!("leg{}:{}", index + 1, venue)
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;
    use crate::types::{StrategyType, ValidOpportunity};

    pub fn valid(strategy: StrategyType, volume: Decimal) -> ValidOpportunity<'static> {
        ValidOpportunity {
            strategy,
            buy_price: Decimal::from(100),
            sell_price: Decimal::from(110),
            volume,
            primary_venue: "uniswap",
            secondary_venue: "sushiswap",
            token_pair_id: Some("WETH/USDC"),
            detection_timestamp: None,
        }
    }
}
