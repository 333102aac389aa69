//! Monte Carlo simulation result types

use serde::Serialize;
use crate::{
    errors::{EngineError, EngineResult},
    stats,
};

/// Simulated net-profit distribution. `samples` is sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(skip)]
    samples: Vec<f64>,
    pub sample_count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub worst_case: f64,
    pub best_case: f64,
    pub profitability_probability: f64,
}

impl SimulationResult {
    pub fn from_samples(mut samples: Vec<f64>) -> EngineResult<Self> {
        if samples.is_empty() {
            return Err(EngineError::numeric("simulation", "no samples were drawn"));
        }
        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::numeric(
                "simulation",
                format!("non-finite sample {bad}"),
            ));
        }

        samples.sort_by(|a, b| a.total_cmp(b));

        let sample_count = samples.len();
        let mean = stats::mean(&samples);
        let std_dev = stats::std_dev(&samples);
        let median = stats::percentile_sorted(&samples, 50.0);
        let profitable = samples.iter().filter(|v| **v > 0.0).count();

        Ok(Self {
            sample_count,
            mean,
            median,
            std_dev,
            worst_case: samples[0],
            best_case: samples[sample_count - 1],
            profitability_probability: profitable as f64 / sample_count as f64,
            samples,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Linear-interpolated percentile, `p` in [0, 100].
    pub fn percentile(&self, p: f64) -> f64 {
        stats::percentile_sorted(&self.samples, p)
    }
}
