//! Risk signal types

use serde::Serialize;
use std::collections::BTreeMap;

/// Normalized output of a risk module. `score` stays inside the module's
/// declared range and `confidence` inside [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSignal {
    pub module: &'static str,
    pub score: f64,
    pub confidence: f64,
    pub factors: BTreeMap<String, f64>,
}

impl RiskSignal {
    pub fn new(module: &'static str, score: f64, confidence: f64) -> Self {
        Self {
            module,
            score,
            confidence,
            factors: BTreeMap::new(),
        }
    }

    pub fn with_factor(mut self, name: impl Into<String>, value: f64) -> Self {
        self.factors.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,    // < 4
    Medium, // 4-7
    High,   // >= 7
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 4.0 => RiskLevel::Low,
            s if s < 7.0 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

/// Competition and volatility signals plus the combined 1-10 score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSignals {
    pub competition: RiskSignal,
    pub volatility: RiskSignal,
    pub combined: RiskSignal,
    pub level: RiskLevel,
}
