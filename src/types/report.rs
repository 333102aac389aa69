//! Profit report returned by the engine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::{
    ConfidenceInterval, CostEstimates, IntervalMethod, RiskLevel, RiskSignals, StrategyType,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub id: String,
    /// Process-local content hash of the opportunity and options.
    pub cache_key: String,
    pub strategy: StrategyType,
    pub calculated_at: DateTime<Utc>,
    pub base_profit: BaseProfit,
    pub costs: CostSummary,
    pub risks: RiskSummary,
    pub net_profit: NetProfit,
    pub intervals: IntervalSummary,
    pub probabilities: Probabilities,
    pub sample_count: usize,
    pub calculation_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProfit {
    pub gross: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub gas: Decimal,
    pub slippage: Decimal,
    pub fees: Decimal,
    pub total: Decimal,
    pub estimates: CostEstimates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub competition: f64,
    pub volatility: f64,
    pub combined_risk_score: f64,
    pub level: RiskLevel,
    pub signals: RiskSignals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetProfit {
    pub expected: Decimal,
    pub median: Decimal,
    pub worst_case: Decimal,
    pub best_case: Decimal,
    pub percentile_5: Decimal,
    pub percentile_95: Decimal,
    pub confidence_lower: Decimal,
    pub confidence_upper: Decimal,
    pub confidence_method: IntervalMethod,
    pub risk_adjusted: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSummary {
    pub parametric: ConfidenceInterval,
    pub bootstrap: ConfidenceInterval,
}

impl IntervalSummary {
    pub fn get(&self, method: IntervalMethod) -> &ConfidenceInterval {
        match method {
            IntervalMethod::Parametric => &self.parametric,
            IntervalMethod::Bootstrap => &self.bootstrap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Probabilities {
    pub profitability: f64,
    pub success: f64,
}

impl ProfitReport {
    pub fn is_profitable(&self) -> bool {
        self.net_profit.expected > Decimal::ZERO
    }
}
