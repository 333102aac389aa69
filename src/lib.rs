//! MEV Profit Engine - probabilistic profit calculation for DEX opportunities
//!
//! Takes a detected arbitrage, liquidation or sandwich opportunity and turns
//! it into a risk-adjusted, simulation-backed profit report with confidence
//! intervals. Batches can be evaluated sequentially or on the blocking pool.

pub mod config;
pub mod types;
pub mod errors;
pub mod validation;
pub mod costs;
pub mod risk;
pub mod volatility;
pub mod simulation;
pub mod stats;
pub mod engine;
pub mod utils;

// Re-export commonly used items
pub use config::EngineConfig;
pub use engine::{BatchItem, BatchSummary, ProfitCalculationEngine};
pub use errors::{EngineError, EngineResult};
pub use types::*;
