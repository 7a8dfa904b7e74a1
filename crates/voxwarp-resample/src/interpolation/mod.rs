//! Voxel interpolation methods for volume transformations.
//!
//! Kernels take a volume and a [`CoordinateGrid`] of fractional sample
//! positions in array-index space and return one value per position.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: rounds each coordinate half away from zero and gathers the
//!   voxel; positions outside the volume are hard-clipped to zero.
//! - **Linear**: trilinear blend of the 8 surrounding voxels over a
//!   zero-padded copy; positions near the border blend toward zero.

/// Coordinate grid generation.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod trilinear;

pub use grid::CoordinateGrid;
pub use interpolate::{interpolate, BorderMode, InterpolationMode};
pub use nearest::{interp_nearest, round_half_away_from_zero};
pub use trilinear::{interp_trilinear, trilinear_weights};
