//! Per-call calculation options

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::{DEFAULT_BOOTSTRAP_RESAMPLES, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SAMPLE_COUNT};
use super::IntervalMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationOptions {
    pub sample_count: usize,
    pub confidence_level: f64,
    /// Interval reported as `confidence_lower`/`confidence_upper`. Both are always computed.
    pub interval_method: IntervalMethod,
    pub bootstrap_resamples: usize,
    /// Fixed random source for reproducible runs.
    pub seed: Option<u64>,
    /// Clock used for time-since-detection. Defaults to now.
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            interval_method: IntervalMethod::Parametric,
            bootstrap_resamples: DEFAULT_BOOTSTRAP_RESAMPLES,
            seed: None,
            evaluated_at: None,
        }
    }
}

impl CalculationOptions {
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_interval_method(mut self, method: IntervalMethod) -> Self {
        self.interval_method = method;
        self
    }

    pub fn with_bootstrap_resamples(mut self, resamples: usize) -> Self {
        self.bootstrap_resamples = resamples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_evaluated_at(mut self, evaluated_at: DateTime<Utc>) -> Self {
        self.evaluated_at = Some(evaluated_at);
        self
    }
}
