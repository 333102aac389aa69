//! Batch evaluation: sequential and concurrent, always in input order

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};
use super::ProfitCalculationEngine;
use crate::{
    errors::{EngineError, EngineResult},
    types::{CalculationOptions, Opportunity, ProfitReport},
};

/// One entry per input opportunity; failures never abort the batch.
pub type BatchItem = EngineResult<ProfitReport>;

impl ProfitCalculationEngine {
    pub fn calculate_batch(
        &self,
        opportunities: &[Opportunity],
        options: &CalculationOptions,
    ) -> Vec<BatchItem> {
        let results: Vec<BatchItem> = opportunities
            .iter()
            .enumerate()
            .map(|(index, opp)| {
                let result = self.calculate_with(opp, &item_options(options, index));
                if let Err(e) = &result {
                    warn!(index, kind = e.kind(), error = %e, "Batch item failed");
                }
                result
            })
            .collect();

        log_batch(&results);
        results
    }

    /// Runs every item on the blocking pool. Results are collected in input
    /// order; with a deadline, items still running when it passes are aborted
    /// and reported as `DeadlineExceeded`.
    pub async fn calculate_batch_concurrent(
        self: &Arc<Self>,
        opportunities: Vec<Opportunity>,
        options: CalculationOptions,
        deadline: Option<Duration>,
    ) -> Vec<BatchItem> {
        let deadline_at = deadline.map(|d| Instant::now() + d);

        let handles: Vec<JoinHandle<BatchItem>> = opportunities
            .into_iter()
            .enumerate()
            .map(|(index, opp)| {
                let engine = Arc::clone(self);
                let options = item_options(&options, index);
                tokio::task::spawn_blocking(move || engine.calculate_with(&opp, &options))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (index, mut handle) in handles.into_iter().enumerate() {
            let joined = match deadline_at {
                Some(at) => match tokio::time::timeout_at(at, &mut handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        handle.abort();
                        warn!(index, "Batch item missed the deadline");
                        results.push(Err(EngineError::DeadlineExceeded { index }));
                        continue;
                    }
                },
                None => handle.await,
            };

            let result = joined.unwrap_or_else(|e| {
                Err(EngineError::Worker {
                    message: e.to_string(),
                })
            });
            if let Err(e) = &result {
                warn!(index, kind = e.kind(), error = %e, "Batch item failed");
            }
            results.push(result);
        }

        log_batch(&results);
        results
    }
}

/// Derives per-item options so seeded batches stay reproducible regardless
/// of how items are scheduled.
fn item_options(options: &CalculationOptions, index: usize) -> CalculationOptions {
    let mut item = options.clone();
    item.seed = options.seed.map(|seed| seed.wrapping_add(index as u64));
    item
}

fn log_batch(results: &[BatchItem]) {
    let summary = BatchSummary::from_results(results);
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        profitable = summary.profitable,
        total_expected_profit = %summary.total_expected_profit,
        "Batch complete"
    );
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub profitable: usize,
    /// Sum of expected net profit over profitable reports.
    pub total_expected_profit: Decimal,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchItem]) -> Self {
        let mut summary = Self {
            total: results.len(),
            succeeded: 0,
            failed: 0,
            profitable: 0,
            total_expected_profit: Decimal::ZERO,
        };

        for result in results {
            match result {
                Ok(report) => {
                    summary.succeeded += 1;
                    if report.is_profitable() {
                        summary.profitable += 1;
                        summary.total_expected_profit = summary
                            .total_expected_profit
                            .saturating_add(report.net_profit.expected);
                    }
                }
                Err(_) => summary.failed += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::StrategyType;
    use rust_decimal_macros::dec;

    fn engine() -> ProfitCalculationEngine {
        ProfitCalculationEngine::new(EngineConfig::default()).unwrap()
    }

    fn options() -> CalculationOptions {
        CalculationOptions::default()
            .with_sample_count(200)
            .with_bootstrap_resamples(20)
            .with_seed(7)
    }

    #[test]
    fn item_seeds_are_offset_by_index() {
        let options = options();
        assert_eq!(item_options(&options, 0).seed, Some(7));
        assert_eq!(item_options(&options, 3).seed, Some(10));
        assert_eq!(item_options(&options.clone().with_seed(u64::MAX), 1).seed, Some(0));

        let mut unseeded = options;
        unseeded.seed = None;
        assert_eq!(item_options(&unseeded, 5).seed, None);
    }

    #[test]
    fn summary_counts_failures_and_profit() {
        let engine = engine();
        let good = Opportunity::new(StrategyType::Arbitrage, dec!(100), dec!(110), dec!(1000), "uniswap");
        let results = engine.calculate_batch(&[good.clone(), Opportunity::default(), good], &options());

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.profitable, 2);
        assert!(summary.total_expected_profit > Decimal::ZERO);
    }

    #[test]
    fn empty_batch_is_empty() {
        let results = engine().calculate_batch(&[], &options());
        assert!(results.is_empty());
        assert_eq!(BatchSummary::from_results(&results).total, 0);
    }
}
