#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use voxwarp_volume as volume;

#[doc(inline)]
pub use voxwarp_affine as affine;

#[doc(inline)]
pub use voxwarp_resample as resample;

/// Random affine augmentation of single volumes and volume groups.
pub mod augment;

/// Augmentation settings loaded from JSON.
pub mod config;

/// Error types for the augmentation layer.
pub mod error;

pub use crate::augment::RandomAffine;
pub use crate::config::AugmentConfig;
pub use crate::error::AugmentError;
