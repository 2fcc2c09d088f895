use rayon::prelude::*;
use thiserror::Error;

use tessera_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how row-parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check the strategy before any work is dispatched.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }

    /// Number of workers the strategy will run on.
    pub fn num_workers(&self) -> usize {
        match self {
            ExecutionStrategy::ParallelRows => rayon::current_num_threads(),
            ExecutionStrategy::Serial => 1,
            ExecutionStrategy::Fixed(n) => *n,
        }
    }
}

/// Apply a function to each row of the image with the given strategy.
///
/// The closure receives the row index and the mutable row slice
/// (`width * C` elements). Each row is handed to exactly one worker, so no
/// two invocations ever alias the same memory.
///
/// # Errors
///
/// Returns an error if the strategy is invalid or its thread pool cannot be built.
/// No row is touched in that case.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Copy + Send + Sync,
{
    strategy.validate()?;

    let row_stride = dst.cols() * C;
    if row_stride == 0 {
        return Ok(());
    }
    let data = dst.as_slice_mut();

    match strategy {
        ExecutionStrategy::Serial => {
            data.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            data.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                data.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(|(y, row)| f(y, row));
            });
        }
    }

    Ok(())
}
