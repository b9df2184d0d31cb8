//! Batch valuation of many contracts against one snapshot.

use std::time::Instant;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::instruments::fx::FxOptionContract;
use tracing::{info, warn};

use super::process_in_batches;
use crate::config::EngineConfig;
use crate::engine::FxOptionEngine;
use crate::result::PricingResult;

/// Statistics of one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Number of contracts in the batch.
    pub contracts_processed: usize,
    /// Contracts valued without error.
    pub successful: usize,
    /// Contracts that failed.
    pub failed: usize,
    /// Wall time in nanoseconds.
    pub total_time_ns: u64,
    /// Number of chunks handed to rayon (1 when sequential).
    pub batches_processed: usize,
    /// Whether the batch ran on the rayon pool.
    pub used_parallel: bool,
}

impl BatchStats {
    /// Returns total computation time in milliseconds.
    #[inline]
    pub fn total_time_ms(&self) -> f64 {
        self.total_time_ns as f64 / 1_000_000.0
    }

    /// Returns the success rate as a percentage.
    #[inline]
    pub fn success_rate(&self) -> f64 {
        if self.contracts_processed == 0 {
            0.0
        } else {
            (self.successful as f64 / self.contracts_processed as f64) * 100.0
        }
    }
}

/// Per-contract results in input order, plus run statistics.
#[derive(Debug, Clone)]
pub struct BatchValuation {
    /// One entry per input contract.
    pub results: Vec<Result<PricingResult, PricingError>>,
    /// Run statistics.
    pub stats: BatchStats,
}

impl BatchValuation {
    /// Present values of the successful contracts summed per currency.
    pub fn present_value_by_currency(&self) -> Vec<CurrencyAmount> {
        aggregate_present_value(&self.results)
    }
}

/// Values every contract with [`FxOptionEngine::price_with_greeks`] on
/// direct-quote Greeks.
///
/// A contract that fails is reported in its slot and does not stop the
/// others. Batches at or above `config.parallel.parallel_threshold` run on
/// the rayon pool in chunks of `config.parallel.batch_size`.
pub fn price_batch<S: MarketSnapshot + ?Sized>(
    contracts: &[FxOptionContract],
    snapshot: &S,
    config: &EngineConfig,
) -> BatchValuation {
    let engine = FxOptionEngine::new(*config);
    let start = Instant::now();
    let used_parallel = config.parallel.should_parallelize(contracts.len());

    let value = |contract: &FxOptionContract| engine.price_with_greeks(contract, snapshot, true);
    let (results, batches_processed): (Vec<_>, usize) = if used_parallel {
        let chunks = process_in_batches(contracts, config.parallel.batch_size, |chunk| {
            chunk.iter().map(value).collect::<Vec<_>>()
        });
        let n_chunks = chunks.len();
        (chunks.into_iter().flatten().collect(), n_chunks)
    } else {
        (contracts.iter().map(value).collect(), usize::from(!contracts.is_empty()))
    };

    let mut failed = 0;
    for (index, (contract, result)) in contracts.iter().zip(&results).enumerate() {
        if let Err(e) = result {
            failed += 1;
            warn!(index, family = contract.family(), error = %e, "contract valuation failed");
        }
    }

    let stats = BatchStats {
        contracts_processed: contracts.len(),
        successful: contracts.len() - failed,
        failed,
        total_time_ns: start.elapsed().as_nanos() as u64,
        batches_processed,
        used_parallel,
    };
    info!(
        contracts = stats.contracts_processed,
        failed = stats.failed,
        parallel = stats.used_parallel,
        batches = stats.batches_processed,
        elapsed_ms = stats.total_time_ms(),
        "batch valued"
    );
    BatchValuation { results, stats }
}

/// Sums the present values of successful results per currency, in order of
/// first appearance. Failed results are skipped.
pub fn aggregate_present_value(results: &[Result<PricingResult, PricingError>]) -> Vec<CurrencyAmount> {
    let mut totals: Vec<CurrencyAmount> = Vec::new();
    for pv in results.iter().flatten().map(|r| r.present_value) {
        match totals.iter_mut().find(|t| t.currency() == pv.currency()) {
            Some(total) => *total = CurrencyAmount::new(pv.currency(), total.amount() + pv.amount()),
            None => totals.push(pv),
        }
    }
    totals
}
