use voxwarp_affine::AffineError;
use voxwarp_volume::VolumeError;

use crate::parallel::ParallelError;

/// Errors raised by the resampling operations.
///
/// Every error is returned before any output is produced.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ResampleError {
    /// The volume does not have exactly three dimensions.
    #[error("Volume must be 3-dimensional, got {0} dimensions")]
    InvalidDimension(usize),

    /// The affine matrix has a (numerically) zero determinant.
    #[error("Affine matrix is singular, resampling is undefined")]
    SingularMatrix,

    /// The requested interpolation is not one of `nearest`, `linear`.
    #[error("Interpolation type '{0}' is not supported")]
    UnsupportedInterpolation(String),

    /// The requested border mode is not `zero`.
    #[error("Border mode '{0}' is not supported")]
    UnsupportedBorderMode(String),

    /// The coordinate grid and the volume disagree in size or dimensionality.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected extent.
        expected: usize,
        /// Actual extent.
        actual: usize,
    },

    /// A parameter or range error from `voxwarp-affine`.
    ///
    /// The resampling operations never raise it themselves. It carries the
    /// errors a caller propagates with `?` when it samples or builds the
    /// transform and resamples in one function.
    #[error(transparent)]
    Affine(AffineError),

    /// A conversion error from `voxwarp-volume`.
    ///
    /// The resampling operations never raise it themselves. It carries a
    /// failed [`Volume::cast`](voxwarp_volume::Volume::cast) propagated with
    /// `?` by a caller that converts the resampled volume.
    #[error(transparent)]
    Volume(VolumeError),

    /// The execution strategy could not run.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl From<AffineError> for ResampleError {
    fn from(e: AffineError) -> Self {
        match e {
            AffineError::SingularMatrix => ResampleError::SingularMatrix,
            other => ResampleError::Affine(other),
        }
    }
}

impl From<VolumeError> for ResampleError {
    fn from(e: VolumeError) -> Self {
        match e {
            VolumeError::InvalidDimension(ndim) => ResampleError::InvalidDimension(ndim),
            VolumeError::InvalidShape { expected, actual } => {
                ResampleError::ShapeMismatch { expected, actual }
            }
            other => ResampleError::Volume(other),
        }
    }
}
