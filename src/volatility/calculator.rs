//! Lookback-window volatility calculator for a single token pair

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use tracing::warn;
use crate::config::MIN_VOLATILITY_SAMPLES;

const MAX_LOOKBACK_SECS: u64 = (i64::MAX / 1_000) as u64;

pub struct VolatilityCalculator {
    window: VecDeque<(DateTime<Utc>, f64)>,
    lookback: Duration,
}

impl VolatilityCalculator {
    pub fn new(lookback_secs: u64) -> Self {
        VolatilityCalculator {
            window: VecDeque::new(),
            lookback: Duration::seconds(lookback_secs.min(MAX_LOOKBACK_SECS) as i64),
        }
    }

    /// Appends a price observation and drops anything older than the lookback
    /// measured from the newest observation.
    pub fn add_value(&mut self, timestamp: DateTime<Utc>, price: f64) {
        if !price.is_finite() || price <= 0.0 {
            warn!("Ignoring invalid price observation: {}", price);
            return;
        }
        if let Some((last, _)) = self.window.back() {
            if timestamp < *last {
                warn!("Ignoring out-of-order price observation at {}", timestamp);
                return;
            }
        }
        self.window.push_back((timestamp, price));

        while let Some((oldest, _)) = self.window.front() {
            if timestamp - *oldest > self.lookback {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }

    /// Standard deviation of log returns across the window, in percent.
    pub fn calculate_volatility_percentage(&self) -> Option<f64> {
        if self.window.len() < MIN_VOLATILITY_SAMPLES {
            return None;
        }

        let returns: Vec<f64> = self
            .window
            .iter()
            .zip(self.window.iter().skip(1))
            .map(|((_, prev), (_, next))| (next / prev).ln())
            .collect();
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (returns.len() - 1) as f64;

        Some(variance.sqrt() * 100.0)
    }

    pub fn sample_count(&self) -> usize {
        self.window.len()
    }
}
