#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Matrices follow the homogeneous convention: the last row is `[0, …, 0, 1]`,
//! the last column holds the translation and the upper-left block holds the
//! linear part. Builders compose, right-most applied first,
//!
//! ```text
//! T · Shz · Shy · Shx · S · Rz · Ry · Rx
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use voxwarp_affine::{build_affine_3d, TransformParameters3d};
//!
//! let params = TransformParameters3d {
//!     translation: [2.0, 0.0, -1.0],
//!     ..Default::default()
//! };
//! let m = build_affine_3d(&params);
//!
//! assert_eq!(m.transform_point([0.0, 0.0, 0.0]), [2.0, 0.0, -1.0]);
//! ```

/// Error types for the affine module.
pub mod error;

/// Homogeneous affine matrices on top of `glam`.
pub mod matrix;

/// Typed transform parameters and sampling ranges.
pub mod params;

/// Randomized affine sampling.
pub mod random;

/// Affine matrix builders from geometric parameters.
pub mod transforms;

pub use crate::error::AffineError;
pub use crate::matrix::{AffineMatrix2d, AffineMatrix3d};
pub use crate::params::{ParameterRanges3d, TransformParameters2d, TransformParameters3d};
pub use crate::random::{
    sample_random_affine_3d, sample_random_parameters_3d, SampledAffine,
};
pub use crate::transforms::{build_affine_2d, build_affine_3d};
