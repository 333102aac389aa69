//! Price history sources for volatility lookups

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use super::VolatilityCalculator;

/// Volatility of one token pair over the lookback window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityObservation {
    pub volatility_pct: f64,
    pub sample_count: usize,
}

/// Read-only source of historical volatility, shared across concurrent
/// calculations.
pub trait PriceHistory: Send + Sync {
    fn observe(&self, token_pair_id: &str) -> Option<VolatilityObservation>;
}

/// Source with no history at all; every pair falls back to the prior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPriceHistory;

impl PriceHistory for NoPriceHistory {
    fn observe(&self, _token_pair_id: &str) -> Option<VolatilityObservation> {
        None
    }
}

/// In-memory history built up front from `(pair, timestamp, price)` records.
pub struct InMemoryPriceHistory {
    lookback_secs: u64,
    pairs: HashMap<String, VolatilityCalculator>,
}

impl InMemoryPriceHistory {
    pub fn new(lookback_secs: u64) -> Self {
        Self {
            lookback_secs,
            pairs: HashMap::new(),
        }
    }

    pub fn record(&mut self, token_pair_id: &str, timestamp: DateTime<Utc>, price: f64) {
        let lookback_secs = self.lookback_secs;
        self.pairs
            .entry(token_pair_id.to_string())
            .or_insert_with(|| VolatilityCalculator::new(lookback_secs))
            .add_value(timestamp, price);
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

impl PriceHistory for InMemoryPriceHistory {
    fn observe(&self, token_pair_id: &str) -> Option<VolatilityObservation> {
        let calculator = self.pairs.get(token_pair_id)?;
        calculator
            .calculate_volatility_percentage()
            .map(|volatility_pct| VolatilityObservation {
                volatility_pct,
                sample_count: calculator.sample_count(),
            })
    }
}
