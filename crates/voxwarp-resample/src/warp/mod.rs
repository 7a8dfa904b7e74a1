//! Geometric volume transformations using affine warps.
//!
//! The output voxel at index `p` reads the input at
//!
//! ```text
//! inv(M) · (p - mid) + mid
//! ```
//!
//! where `mid = floor(dim / 2)` per axis. Content therefore moves along `+t`
//! for a translation `t`, and rotations pivot on the volume midpoint.
//!
//! # Examples
//!
//! Shifting a volume by one voxel along the first axis:
//!
//! ```
//! use voxwarp_affine::AffineMatrix3d;
//! use voxwarp_resample::interpolation::{BorderMode, InterpolationMode};
//! use voxwarp_resample::warp::apply_affine;
//! use voxwarp_volume::Volume;
//!
//! let mut volume = Volume::<f32>::zeros([4, 4, 4].into());
//! volume[[1, 1, 1]] = 1.0;
//!
//! let m = AffineMatrix3d::from_translation([1.0, 0.0, 0.0]);
//! let out = apply_affine(&volume, &m, InterpolationMode::Nearest, BorderMode::Zero).unwrap();
//!
//! assert_eq!(out[[2, 1, 1]], 1.0);
//! assert_eq!(out[[1, 1, 1]], 0.0);
//! ```

mod affine;

pub use affine::{apply_affine, apply_affine_str, apply_affine_with_strategy, sampling_grid};
