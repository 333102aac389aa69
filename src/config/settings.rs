//! Engine configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use crate::{
    errors::{EngineError, EngineResult},
    types::StrategyType,
};

// Gas constants (quote currency per transaction)
pub const DEFAULT_BASE_FEE: Decimal = dec!(2.50);
pub const DEFAULT_PRIORITY_FEE: Decimal = dec!(1.00);
pub const MAX_PRIORITY_FEE: Decimal = dec!(500);
pub const DEFAULT_GAS_UNCERTAINTY: Decimal = dec!(0.25);

// Slippage and fee constants
pub const DEFAULT_BASE_SLIPPAGE_BPS: u32 = 10; // 0.1%
pub const MAX_BASE_SLIPPAGE_BPS: u32 = 500; // 5%
pub const DEFAULT_LIQUIDITY_DEPTH: Decimal = dec!(1_000_000);
pub const DEFAULT_SLIPPAGE_UNCERTAINTY: Decimal = dec!(0.5);
pub const DEFAULT_VENUE_FEE_BPS: u32 = 30; // 0.3%
pub const MAX_VENUE_FEE_BPS: u32 = 1_000;

// Simulation constants
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;
/// Largest volume accepted. Risk pressure is computed in f64 and stays
/// strictly increasing in volume up to here.
pub const MAX_VOLUME: Decimal = dec!(1_000_000_000);
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
pub const DEFAULT_BOOTSTRAP_RESAMPLES: usize = 500;
pub const DEFAULT_MAX_PRICE_MOVE: f64 = 0.02; // 2% one-sigma move at full volatility

// Volatility constants
pub const DEFAULT_LOOKBACK_SECS: u64 = 3_600;
pub const MIN_VOLATILITY_SAMPLES: usize = 3;

#[derive(Debug, Clone)]
pub struct GasConfig {
    pub base_fee: Decimal,
    pub base_priority_fee: Decimal,
    /// Standard deviation of the gas cost as a fraction of its mean.
    pub uncertainty: Decimal,
    pub arbitrage_multiplier: Decimal,
    pub liquidation_multiplier: Decimal,
    pub sandwich_multiplier: Decimal,
}

impl GasConfig {
    pub fn strategy_multiplier(&self, strategy: StrategyType) -> Decimal {
        match strategy {
            StrategyType::Arbitrage => self.arbitrage_multiplier,
            StrategyType::Liquidation => self.liquidation_multiplier,
            StrategyType::Sandwich => self.sandwich_multiplier,
        }
    }
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            base_fee: DEFAULT_BASE_FEE,
            base_priority_fee: DEFAULT_PRIORITY_FEE,
            uncertainty: DEFAULT_GAS_UNCERTAINTY,
            arbitrage_multiplier: dec!(1.0),
            liquidation_multiplier: dec!(1.6),
            // front-run and back-run are two transactions
            sandwich_multiplier: dec!(2.2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlippageConfig {
    pub base_slippage_bps: u32,
    pub default_liquidity_depth: Decimal,
    pub venue_liquidity: HashMap<String, Decimal>,
    pub uncertainty: Decimal,
}

impl SlippageConfig {
    pub fn liquidity_depth(&self, venue: &str) -> Decimal {
        self.venue_liquidity
            .get(venue)
            .copied()
            .unwrap_or(self.default_liquidity_depth)
    }
}

impl Default for SlippageConfig {
    fn default() -> Self {
        Self {
            base_slippage_bps: DEFAULT_BASE_SLIPPAGE_BPS,
            default_liquidity_depth: DEFAULT_LIQUIDITY_DEPTH,
            venue_liquidity: HashMap::new(),
            uncertainty: DEFAULT_SLIPPAGE_UNCERTAINTY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeeConfig {
    pub default_fee_bps: u32,
    pub venue_fee_bps: HashMap<String, u32>,
}

impl FeeConfig {
    pub fn fee_bps(&self, venue: &str) -> u32 {
        self.venue_fee_bps
            .get(venue)
            .copied()
            .unwrap_or(self.default_fee_bps)
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            default_fee_bps: DEFAULT_VENUE_FEE_BPS,
            venue_fee_bps: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompetitionConfig {
    /// Volume at which half of the remaining headroom is contested.
    pub volume_scale: f64,
    pub arbitrage_base: f64,
    pub liquidation_base: f64,
    pub sandwich_base: f64,
    pub confidence: f64,
}

impl CompetitionConfig {
    pub fn base_probability(&self, strategy: StrategyType) -> f64 {
        match strategy {
            StrategyType::Arbitrage => self.arbitrage_base,
            StrategyType::Liquidation => self.liquidation_base,
            StrategyType::Sandwich => self.sandwich_base,
        }
    }
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            volume_scale: 50_000.0,
            arbitrage_base: 0.35,
            liquidation_base: 0.25,
            sandwich_base: 0.20,
            confidence: 0.7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolatilityConfig {
    pub lookback_secs: u64,
    /// Volatility (percent) that maps to a normalized score of 1.
    pub saturation_pct: f64,
    pub full_confidence_samples: usize,
    /// Score reported when no history is available for the pair.
    pub prior_score: f64,
    pub prior_confidence: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            lookback_secs: DEFAULT_LOOKBACK_SECS,
            saturation_pct: 5.0,
            full_confidence_samples: 60,
            prior_score: 0.5,
            prior_confidence: 0.1,
        }
    }
}

/// Weights of the combined risk score. They must sum to 1.
#[derive(Debug, Clone)]
pub struct RiskWeights {
    pub competition: f64,
    pub volatility: f64,
    pub staleness: f64,
    pub exposure: f64,
    pub exposure_scale: f64,
    pub staleness_half_life_secs: f64,
}

impl RiskWeights {
    pub fn sum(&self) -> f64 {
        self.competition + self.volatility + self.staleness + self.exposure
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            competition: 0.4,
            volatility: 0.3,
            staleness: 0.1,
            exposure: 0.2,
            exposure_scale: 100_000.0,
            staleness_half_life_secs: 12.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub default_sample_count: usize,
    pub default_confidence_level: f64,
    pub bootstrap_resamples: usize,
    pub max_price_move: f64,
    /// Share of the combined risk score applied to the risk-adjusted profit.
    pub risk_adjustment_weight: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_sample_count: DEFAULT_SAMPLE_COUNT,
            default_confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            bootstrap_resamples: DEFAULT_BOOTSTRAP_RESAMPLES,
            max_price_move: DEFAULT_MAX_PRICE_MOVE,
            risk_adjustment_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub gas: GasConfig,
    pub slippage: SlippageConfig,
    pub fees: FeeConfig,
    pub competition: CompetitionConfig,
    pub volatility: VolatilityConfig,
    pub risk: RiskWeights,
    pub simulation: SimulationConfig,
}

impl EngineConfig {
    pub fn load() -> Self {
        let mut config = Self::default();

        config.gas.base_fee = env::var("BASE_FEE")
            .ok()
            .and_then(|s| Decimal::from_str(&s).ok())
            .unwrap_or(DEFAULT_BASE_FEE)
            .max(dec!(0));
        config.gas.base_priority_fee = env::var("BASE_PRIORITY_FEE")
            .ok()
            .and_then(|s| Decimal::from_str(&s).ok())
            .unwrap_or(DEFAULT_PRIORITY_FEE)
            .max(dec!(0))
            .min(MAX_PRIORITY_FEE);

        config.slippage.base_slippage_bps = env::var("BASE_SLIPPAGE_BPS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BASE_SLIPPAGE_BPS)
            .min(MAX_BASE_SLIPPAGE_BPS);
        config.slippage.venue_liquidity = env::var("VENUE_LIQUIDITY")
            .map(|s| parse_venue_map(&s, |v| Decimal::from_str(v).ok().filter(|d| *d > dec!(0))))
            .unwrap_or_default();

        config.fees.default_fee_bps = env::var("DEFAULT_VENUE_FEE_BPS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_VENUE_FEE_BPS)
            .min(MAX_VENUE_FEE_BPS);
        config.fees.venue_fee_bps = env::var("VENUE_FEES")
            .map(|s| parse_venue_map(&s, |v| v.parse::<u32>().ok().map(|b| b.min(MAX_VENUE_FEE_BPS))))
            .unwrap_or_default();

        config.simulation.default_sample_count = env::var("SAMPLE_COUNT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_COUNT)
            .max(1)
            .min(MAX_SAMPLE_COUNT);
        config.simulation.default_confidence_level = env::var("CONFIDENCE_LEVEL")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|c| *c > 0.0 && *c < 1.0)
            .unwrap_or(DEFAULT_CONFIDENCE_LEVEL);
        config.simulation.bootstrap_resamples = env::var("BOOTSTRAP_RESAMPLES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BOOTSTRAP_RESAMPLES)
            .max(1);
        config.simulation.max_price_move = env::var("MAX_PRICE_MOVE")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_MAX_PRICE_MOVE)
            .clamp(0.0, 1.0);
        config.simulation.risk_adjustment_weight = env::var("RISK_ADJUSTMENT_WEIGHT")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);

        config
    }

    pub fn validate(&self) -> EngineResult<()> {
        let weight_sum = self.risk.sum();
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(invalid(format!("risk weights sum to {weight_sum}, expected 1")));
        }
        let weights = [
            self.risk.competition,
            self.risk.volatility,
            self.risk.staleness,
            self.risk.exposure,
        ];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(invalid("risk weights must lie in [0, 1]".to_string()));
        }
        if self.risk.competition + self.risk.exposure <= 0.0 {
            return Err(invalid("competition and exposure weights cannot both be zero".to_string()));
        }
        if self.risk.exposure_scale <= 0.0 || self.risk.staleness_half_life_secs <= 0.0 {
            return Err(invalid("risk scales must be positive".to_string()));
        }

        let bases = [
            self.competition.arbitrage_base,
            self.competition.liquidation_base,
            self.competition.sandwich_base,
            self.competition.confidence,
        ];
        if bases.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(invalid("competition probabilities must lie in [0, 1]".to_string()));
        }
        if self.competition.volume_scale <= 0.0 {
            return Err(invalid("competition volume scale must be positive".to_string()));
        }

        if self.volatility.saturation_pct <= 0.0 || self.volatility.full_confidence_samples == 0 {
            return Err(invalid("volatility saturation and sample target must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.volatility.prior_score)
            || !(0.0..=1.0).contains(&self.volatility.prior_confidence)
        {
            return Err(invalid("volatility prior must lie in [0, 1]".to_string()));
        }

        if self.gas.base_fee < dec!(0)
            || self.gas.base_priority_fee < dec!(0)
            || self.gas.uncertainty < dec!(0)
        {
            return Err(invalid("gas parameters must be non-negative".to_string()));
        }
        for strategy in StrategyType::ALL {
            if self.gas.strategy_multiplier(strategy) < dec!(0) {
                return Err(invalid(format!("gas multiplier for {strategy} is negative")));
            }
        }

        if self.slippage.default_liquidity_depth <= dec!(0)
            || self.slippage.venue_liquidity.values().any(|d| *d <= dec!(0))
        {
            return Err(invalid("liquidity depth must be positive".to_string()));
        }
        if self.slippage.uncertainty < dec!(0) {
            return Err(invalid("slippage uncertainty must be non-negative".to_string()));
        }

        if !(0.0..=1.0).contains(&self.simulation.max_price_move)
            || !(0.0..=1.0).contains(&self.simulation.risk_adjustment_weight)
        {
            return Err(invalid("simulation ratios must lie in [0, 1]".to_string()));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidConfig { reason }
}

/// Parses `venue:value,venue:value`, skipping malformed entries.
fn parse_venue_map<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> HashMap<String, T> {
    raw.split(',')
        .filter_map(|entry| {
            let (venue, value) = entry.split_once(':')?;
            let venue = venue.trim();
            if venue.is_empty() {
                return None;
            }
            Some((venue.to_string(), parse(value.trim())?))
        })
        .collect()
}
