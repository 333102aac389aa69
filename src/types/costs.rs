//! Cost estimate types

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostComponent {
    Gas,
    Slippage,
    Fees,
}

/// Expected cost of one component with its variance. `total` and
/// `variance` are never negative; the variance is a statistic and lives in f64.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub component: CostComponent,
    pub total: Decimal,
    pub variance: f64,
    pub breakdown: BTreeMap<String, Decimal>,
}

impl CostEstimate {
    pub fn new(component: CostComponent, total: Decimal, variance: f64) -> Self {
        Self {
            component,
            total,
            variance,
            breakdown: BTreeMap::new(),
        }
    }

    pub fn with_item(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.breakdown.insert(name.into(), amount);
        self
    }
}

/// One estimate per cost module, as produced for a single opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimates {
    pub gas: CostEstimate,
    pub slippage: CostEstimate,
    pub fees: CostEstimate,
}

impl CostEstimates {
    pub fn total(&self) -> Decimal {
        self.gas.total + self.slippage.total + self.fees.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostEstimate> {
        [&self.gas, &self.slippage, &self.fees].into_iter()
    }
}
