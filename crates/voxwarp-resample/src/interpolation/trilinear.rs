use voxwarp_volume::{Volume, VolumeDtype, VolumeShape};

use super::grid::CoordinateGrid;
use super::interpolate::BorderMode;
use crate::error::ResampleError;
use crate::parallel::{fill_indexed, ExecutionStrategy};

/// Blend weights of the 8 voxels surrounding a coordinate.
///
/// Corner `k` takes the ceil index on axis `a` when bit `a` of `k` is set and
/// the floor index otherwise. Its weight is the product over the axes of
/// `frac` (ceil) or `1 - frac` (floor), where `frac = c - floor(c)`.
///
/// The weights sum to one up to floating point error.
///
/// # Examples
///
/// ```
/// use voxwarp_resample::interpolation::trilinear_weights;
///
/// let w = trilinear_weights([0.5, 0.0, 0.0]);
/// assert_eq!(w[0], 0.5); // floor on every axis
/// assert_eq!(w[1], 0.5); // ceil on axis 0
/// assert_eq!(w[2..].iter().sum::<f64>(), 0.0);
/// ```
#[inline]
pub fn trilinear_weights(c: [f64; 3]) -> [f64; 8] {
    let frac = [c[0] - c[0].floor(), c[1] - c[1].floor(), c[2] - c[2].floor()];

    let mut weights = [1.0f64; 8];
    for (k, w) in weights.iter_mut().enumerate() {
        for (a, f) in frac.iter().enumerate() {
            *w *= if (k >> a) & 1 == 1 { *f } else { 1.0 - *f };
        }
    }
    weights
}

/// Copy of the volume as `f64` with one layer of zeros around every face.
fn pad_zero<T: VolumeDtype>(volume: &Volume<T>) -> (Vec<f64>, VolumeShape) {
    let shape = volume.shape();
    let padded = VolumeShape::from([shape.x + 2, shape.y + 2, shape.z + 2]);

    let mut data = vec![0.0f64; padded.num_voxels()];
    let src = volume.as_slice();

    for x in 0..shape.x {
        for y in 0..shape.y {
            let src_row = shape.offset([x, y, 0]);
            let dst_row = padded.offset([x + 1, y + 1, 1]);
            data[dst_row..dst_row + shape.z]
                .iter_mut()
                .zip(&src[src_row..src_row + shape.z])
                .for_each(|(d, s)| *d = s.to_f64());
        }
    }

    (data, padded)
}

/// Kernel for trilinear interpolation
///
/// # Arguments
///
/// * `volume` - The volume to sample from.
/// * `grid` - The sample coordinates in array-index space.
/// * `border_mode` - The policy for out-of-bounds positions.
/// * `strategy` - Where the per-voxel work runs.
///
/// # Returns
///
/// A volume with the grid's spatial shape. Samples near the border blend
/// toward zero and samples more than one voxel outside are zero. Values are
/// accumulated in `f64` and converted back with [`VolumeDtype::from_f64`].
pub fn interp_trilinear<T: VolumeDtype>(
    volume: &Volume<T>,
    grid: &CoordinateGrid,
    border_mode: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<Volume<T>, ResampleError> {
    let (padded, padded_shape) = match border_mode {
        BorderMode::Zero => pad_zero(volume),
    };
    let max_index = padded_shape.dims().map(|d| (d - 1) as f64);

    let mut out = vec![T::default(); grid.len()];

    fill_indexed(strategy, &mut out, |i| {
        let c = grid.get(i).map(|v| v + 1.0);
        if c.iter().any(|v| !v.is_finite()) {
            return T::default();
        }

        let weights = trilinear_weights(c);
        let mut floor = [0usize; 3];
        let mut ceil = [0usize; 3];
        for a in 0..3 {
            let f = c[a].floor();
            floor[a] = f.clamp(0.0, max_index[a]) as usize;
            ceil[a] = (f + 1.0).clamp(0.0, max_index[a]) as usize;
        }

        let mut acc = 0.0f64;
        for (k, w) in weights.iter().enumerate() {
            let mut index = [0usize; 3];
            for a in 0..3 {
                index[a] = if (k >> a) & 1 == 1 { ceil[a] } else { floor[a] };
            }
            acc += w * padded[padded_shape.offset(index)];
        }

        T::from_f64(acc)
    })?;

    Ok(Volume::new(grid.shape(), out)?)
}
