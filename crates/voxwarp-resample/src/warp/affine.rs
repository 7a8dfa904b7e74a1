use voxwarp_affine::AffineMatrix3d;
use voxwarp_volume::{Volume, VolumeDtype, VolumeShape};

use crate::error::ResampleError;
use crate::interpolation::{interpolate, BorderMode, CoordinateGrid, InterpolationMode};
use crate::parallel::ExecutionStrategy;

/// Source coordinates for every output voxel of `shape`.
///
/// Each output index is centered on the volume midpoint, mapped through `inv`
/// and moved back to array-index space. Coordinates stay in `f64` all the way
/// to the interpolation kernels.
///
/// # Arguments
///
/// * `shape` - The spatial shape of the output volume.
/// * `inv` - The inverse of the forward transform.
pub fn sampling_grid(shape: VolumeShape, inv: &AffineMatrix3d) -> CoordinateGrid {
    let mid = shape.midpoint().map(|m| m as f64);

    CoordinateGrid::from_fn(shape, |index| {
        let p = [
            index[0] as f64 - mid[0],
            index[1] as f64 - mid[1],
            index[2] as f64 - mid[2],
        ];
        let src = inv.transform_point(p);
        [src[0] + mid[0], src[1] + mid[1], src[2] + mid[2]]
    })
}

/// Applies an affine transformation to a volume.
///
/// Runs single-threaded; see [`apply_affine_with_strategy`] to choose where
/// the work runs.
///
/// # Arguments
///
/// * `volume` - The input volume with shape (X, Y, Z).
/// * `matrix` - The 4x4 forward transform, about the volume midpoint.
/// * `interpolation` - The interpolation mode to use.
/// * `border_mode` - The policy for out-of-bounds samples.
///
/// # Returns
///
/// A new volume with the same shape and data type as the input.
///
/// # Errors
///
/// [`ResampleError::SingularMatrix`] if `matrix` cannot be inverted.
pub fn apply_affine<T: VolumeDtype>(
    volume: &Volume<T>,
    matrix: &AffineMatrix3d,
    interpolation: InterpolationMode,
    border_mode: BorderMode,
) -> Result<Volume<T>, ResampleError> {
    apply_affine_with_strategy(
        volume,
        matrix,
        interpolation,
        border_mode,
        ExecutionStrategy::default(),
    )
}

/// Applies an affine transformation to a volume with the given execution strategy.
///
/// Every strategy produces identical output.
pub fn apply_affine_with_strategy<T: VolumeDtype>(
    volume: &Volume<T>,
    matrix: &AffineMatrix3d,
    interpolation: InterpolationMode,
    border_mode: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<Volume<T>, ResampleError> {
    // invert the forward transform to find the source position of each output voxel
    let inv = matrix.inverse()?;

    let shape = volume.shape();
    log::debug!(
        "apply_affine: shape={} interpolation={} border_mode={} strategy={:?}",
        shape,
        interpolation,
        border_mode,
        strategy
    );

    let grid = sampling_grid(shape, &inv);

    interpolate(volume, &grid, interpolation, border_mode, strategy)
}

/// Applies an affine transformation with the modes given by name.
///
/// Both names are validated before any work is done.
///
/// # Errors
///
/// * [`ResampleError::UnsupportedInterpolation`] if `interpolation` is not
///   `"nearest"` or `"linear"`.
/// * [`ResampleError::UnsupportedBorderMode`] if `border_mode` is not `"zero"`.
/// * [`ResampleError::SingularMatrix`] if `matrix` cannot be inverted.
///
/// # Example
///
/// ```
/// use voxwarp_affine::AffineMatrix3d;
/// use voxwarp_resample::warp::apply_affine_str;
/// use voxwarp_resample::ResampleError;
/// use voxwarp_volume::Volume;
///
/// let volume = Volume::<f32>::zeros([2, 2, 2].into());
/// let res = apply_affine_str(&volume, &AffineMatrix3d::identity(), "cubic", "zero");
///
/// assert_eq!(res, Err(ResampleError::UnsupportedInterpolation("cubic".into())));
/// ```
pub fn apply_affine_str<T: VolumeDtype>(
    volume: &Volume<T>,
    matrix: &AffineMatrix3d,
    interpolation: &str,
    border_mode: &str,
) -> Result<Volume<T>, ResampleError> {
    let interpolation = interpolation.parse::<InterpolationMode>()?;
    let border_mode = border_mode.parse::<BorderMode>()?;
    apply_affine(volume, matrix, interpolation, border_mode)
}
