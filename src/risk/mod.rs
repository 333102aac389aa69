//! Risk modules: competition, volatility and the combined risk score

pub mod competition;
pub mod volatility;
pub mod scorer;

pub use competition::*;
pub use volatility::*;
pub use scorer::*;

use crate::types::{RiskSignal, ValidOpportunity};

pub trait RiskModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Normalized signal for one opportunity. Never fails: missing inputs
    /// lower the confidence instead.
    fn analyze(&self, opp: &ValidOpportunity<'_>) -> RiskSignal;
}

/// Saturating share `x / (x + scale)`, strictly increasing for finite x >= 0.
pub(crate) fn saturation(x: f64, scale: f64) -> f64 {
    let x = x.max(0.0);
    x / (x + scale)
}
