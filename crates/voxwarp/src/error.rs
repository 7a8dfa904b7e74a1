use voxwarp_affine::AffineError;
use voxwarp_resample::ResampleError;
use voxwarp_volume::VolumeShape;

/// Errors raised by the augmentation layer.
#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    /// The sampling ranges are invalid.
    #[error(transparent)]
    Affine(#[from] AffineError),

    /// Resampling a volume failed.
    #[error(transparent)]
    Resample(#[from] ResampleError),

    /// The probability is not in `[0, 1]`.
    #[error("Probability must be in [0, 1], got {0}")]
    InvalidProbability(f64),

    /// A group augmentation was requested with no volumes.
    #[error("Cannot augment an empty group of volumes")]
    EmptyGroup,

    /// The volumes of a group do not share one shape.
    #[error("Group volumes must share a shape: expected {expected}, got {actual}")]
    GroupShapeMismatch {
        /// Shape of the first volume in the group.
        expected: VolumeShape,
        /// Shape of the offending volume.
        actual: VolumeShape,
    },

    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`crate::AugmentConfig`].
    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}
