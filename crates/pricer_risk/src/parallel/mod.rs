//! Rayon-based batch valuation.
//!
//! [`price_batch`] values a slice of contracts against one snapshot,
//! switching from a sequential loop to chunked `par_chunks` processing once
//! the batch reaches [`ParallelConfig::parallel_threshold`]. Results keep
//! the input order.

mod batch;

pub use batch::{aggregate_present_value, price_batch, BatchStats, BatchValuation};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Batch size for parallel processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Contracts below this count are priced sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Processes items in parallel batches.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `batch_size` - Number of items per batch (0 is treated as 1)
/// * `processor` - Function to apply to each batch
///
/// # Returns
///
/// One result per batch, in input order.
pub fn process_in_batches<T, R, F>(items: &[T], batch_size: usize, processor: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> R + Sync + Send,
{
    items.par_chunks(batch_size.max(1)).map(processor).collect()
}

/// Configuration for parallel execution.
///
/// Deserializes from a `[parallel]` TOML table; missing keys take their
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Rejects a zero batch size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_in_batches() {
        let items: Vec<i32> = (0..100).collect();
        let sums: Vec<i32> = process_in_batches(&items, 10, |batch| batch.iter().sum());

        assert_eq!(sums.len(), 10);
        assert_eq!(sums.iter().sum::<i32>(), (0..100).sum());
    }

    #[test]
    fn test_process_in_batches_zero_size() {
        let items: Vec<i32> = (0..5).collect();
        let counts: Vec<usize> = process_in_batches(&items, 0, |batch| batch.len());
        assert_eq!(counts, vec![1; 5]);
    }

    #[test]
    fn test_parallel_config() {
        let config = ParallelConfig::new(0, 10);
        assert_eq!(config.batch_size, 1);
        assert!(!config.should_parallelize(9));
        assert!(config.should_parallelize(10));
        assert!(config.validate().is_ok());

        let zero = ParallelConfig {
            batch_size: 0,
            parallel_threshold: 10,
        };
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidBatchSize(0))));
    }

    #[test]
    fn test_parallel_config_partial_toml() {
        let config: ParallelConfig = toml::from_str("parallel_threshold = 8").unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, 8);
        assert!(toml::from_str::<ParallelConfig>("threads = 4").is_err());
    }
}
