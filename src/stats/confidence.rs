//! Parametric and bootstrap confidence intervals

use rand::Rng;
use tracing::debug;
use crate::{
    errors::{EngineError, EngineResult},
    types::{ConfidenceInterval, IntervalMethod},
};
use super::{mean, min_max, percentile_sorted, std_dev, z_score};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Normal approximation: mean ± z(level) · sample standard deviation.
    pub fn parametric(
        &self,
        samples: &[f64],
        confidence_level: f64,
    ) -> EngineResult<ConfidenceInterval> {
        let z = check_inputs(samples, confidence_level)?;
        if let Some(value) = constant_value(samples) {
            return Ok(ConfidenceInterval::degenerate(
                value,
                confidence_level,
                IntervalMethod::Parametric,
            ));
        }

        let center = mean(samples);
        let half_width = z * std_dev(samples);

        Ok(ConfidenceInterval {
            lower: center - half_width,
            upper: center + half_width,
            confidence_level,
            method: IntervalMethod::Parametric,
        })
    }

    /// Percentile bootstrap of the mean: resample with replacement, take the
    /// mean of each resample, and read the interval off the empirical
    /// distribution of those means.
    pub fn bootstrap<R: Rng + ?Sized>(
        &self,
        samples: &[f64],
        confidence_level: f64,
        resamples: usize,
        rng: &mut R,
    ) -> EngineResult<ConfidenceInterval> {
        check_inputs(samples, confidence_level)?;
        if resamples == 0 {
            return Err(EngineError::InvalidOptions {
                reason: "bootstrap needs at least one resample".to_string(),
            });
        }
        if let Some(value) = constant_value(samples) {
            return Ok(ConfidenceInterval::degenerate(
                value,
                confidence_level,
                IntervalMethod::Bootstrap,
            ));
        }

        let n = samples.len();
        let mut means: Vec<f64> = (0..resamples)
            .map(|_| {
                let total: f64 = (0..n).map(|_| samples[rng.random_range(0..n)]).sum();
                total / n as f64
            })
            .collect();
        means.sort_by(|a, b| a.total_cmp(b));

        let tail_pct = (1.0 - confidence_level) / 2.0 * 100.0;
        let interval = ConfidenceInterval {
            lower: percentile_sorted(&means, tail_pct),
            upper: percentile_sorted(&means, 100.0 - tail_pct),
            confidence_level,
            method: IntervalMethod::Bootstrap,
        };

        debug!(
            resamples,
            sample_count = n,
            lower = interval.lower,
            upper = interval.upper,
            "Bootstrap interval computed"
        );

        Ok(interval)
    }
}

fn check_inputs(samples: &[f64], confidence_level: f64) -> EngineResult<f64> {
    if samples.is_empty() {
        return Err(EngineError::numeric(
            "confidence interval",
            "no samples to estimate from",
        ));
    }
    let invalid = || EngineError::InvalidOptions {
        reason: format!("confidence level {confidence_level} must lie in (0, 1)"),
    };
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(invalid());
    }
    z_score(confidence_level).ok_or_else(invalid)
}

fn constant_value(samples: &[f64]) -> Option<f64> {
    let (min, max) = min_max(samples);
    (min == max).then_some(min)
}
