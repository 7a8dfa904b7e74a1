/// An error type for the volume module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VolumeError {
    /// Error when the shape does not have exactly three axes.
    #[error("Volumes must be 3-dimensional, got {0} dimensions")]
    InvalidDimension(usize),

    /// Error when the data length does not match the shape.
    #[error("Data length ({actual}) does not match the volume size ({expected})")]
    InvalidShape {
        /// Number of voxels implied by the shape.
        expected: usize,
        /// Number of elements in the data.
        actual: usize,
    },

    /// Error when an element cannot be represented in the target type.
    #[error("Failed to cast voxel value to {0}")]
    CastError(String),
}
