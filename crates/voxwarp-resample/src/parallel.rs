use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The chunk length for AutoRows must be valid.
    #[error("row stride must be > 0 for AutoRows strategy")]
    InvalidRowStride(usize),
}

/// Controls where the per-voxel work of a resample call runs.
///
/// Every output voxel is computed independently with the same arithmetic, so
/// all strategies produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process every voxel in parallel.
    ParallelElements,

    /// Use the global Rayon thread pool to process chunks of voxels in parallel.
    ///
    /// The stride is the chunk length; `Y * Z` processes one X-slab per task.
    AutoRows(usize),

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Fill `dst` with `f(i)` for every index `i` using the given strategy.
///
/// # Errors
///
/// If the strategy parameters are invalid or the thread pool cannot be built.
pub fn fill_indexed<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    match strategy {
        ExecutionStrategy::Serial => {
            dst.iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
        }
        ExecutionStrategy::ParallelElements => {
            dst.par_iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
        }
        ExecutionStrategy::AutoRows(stride) => {
            if stride == 0 {
                return Err(ParallelError::InvalidRowStride(stride));
            }
            dst.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(row, chunk)| {
                    let base = row * stride;
                    chunk
                        .iter_mut()
                        .enumerate()
                        .for_each(|(j, d)| *d = f(base + j));
                });
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
            });
        }
    }
    Ok(())
}
