//! Rayon-based parallelisation utilities.
//!
//! Scenario sweeps are embarrassingly parallel: every scenario revalues its
//! own copies of the contracts. [`try_map`] picks the sequential or parallel
//! path from a [`ParallelConfig`]; both produce results in input order, so
//! the outcome does not depend on the path taken.

use rayon::prelude::*;

/// Minimum number of items handed to one rayon task.
///
/// Empirically tuned for cache efficiency.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Default item count from which sweeps run in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Minimum items per rayon task
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

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Parallel map preserving input order.
pub fn parallel_map<T, R, F>(items: &[T], batch_size: usize, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items
        .par_iter()
        .with_min_len(batch_size.max(1))
        .map(mapper)
        .collect()
}

/// Fallible map, parallel above the configured threshold.
///
/// Returns the first error in input order.
pub fn try_map<T, R, E, F>(items: &[T], config: &ParallelConfig, mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        parallel_map(items, config.batch_size, mapper)
            .into_iter()
            .collect()
    } else {
        items.iter().map(mapper).collect()
    }
}
