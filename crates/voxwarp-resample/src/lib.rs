#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the resampling module.
pub mod error;

/// Interpolation kernels and coordinate grids.
pub mod interpolation;

/// Execution strategies for the per-voxel work.
pub mod parallel;

/// Affine warps of whole volumes.
pub mod warp;

pub use crate::error::ResampleError;
