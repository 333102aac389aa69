//! Confidence interval types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalMethod {
    Parametric,
    Bootstrap,
}

/// `lower <= upper`; equal only for zero-variance input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub method: IntervalMethod,
}

impl ConfidenceInterval {
    pub fn degenerate(value: f64, confidence_level: f64, method: IntervalMethod) -> Self {
        Self {
            lower: value,
            upper: value,
            confidence_level,
            method,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}
