use voxwarp_volume::{Volume, VolumeDtype};

use super::grid::CoordinateGrid;
use super::interpolate::BorderMode;
use crate::error::ResampleError;
use crate::parallel::{fill_indexed, ExecutionStrategy};

/// Round to the nearest integer, ties away from zero.
///
/// `1.5 -> 2`, `0.5 -> 1`, `-0.5 -> -1`, `-1.5 -> -2`.
#[inline]
pub fn round_half_away_from_zero(x: f64) -> f64 {
    x.round()
}

/// Rounded voxel index of a coordinate and whether any axis falls outside.
///
/// Flagged positions get the placeholder index `[0, 0, 0]`, which only keeps
/// the gather in bounds; its value is discarded by the border policy.
#[inline]
fn nearest_index(c: [f64; 3], dims: [usize; 3]) -> ([usize; 3], bool) {
    let mut index = [0usize; 3];
    let mut out_of_bounds = false;

    for axis in 0..3 {
        let r = round_half_away_from_zero(c[axis]);
        // written so that NaN counts as out of bounds
        if r >= 0.0 && r < dims[axis] as f64 {
            index[axis] = r as usize;
        } else {
            out_of_bounds = true;
        }
    }

    match out_of_bounds {
        true => ([0; 3], true),
        false => (index, false),
    }
}

/// Kernel for nearest neighbor interpolation
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
/// A volume with the grid's spatial shape. Positions whose rounded index is
/// `< 0` or `>= dim` on any axis hold zero.
pub fn interp_nearest<T: VolumeDtype>(
    volume: &Volume<T>,
    grid: &CoordinateGrid,
    border_mode: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<Volume<T>, ResampleError> {
    let shape = volume.shape();
    let dims = shape.dims();
    let data = volume.as_slice();

    let mut out = vec![T::default(); grid.len()];

    // nothing to gather from: every position is out of bounds
    if data.is_empty() {
        return Ok(Volume::new(grid.shape(), out)?);
    }

    fill_indexed(strategy, &mut out, |i| {
        let (index, out_of_bounds) = nearest_index(grid.get(i), dims);
        let value = data[shape.offset(index)];

        match border_mode {
            BorderMode::Zero if out_of_bounds => T::default(),
            BorderMode::Zero => value,
        }
    })?;

    Ok(Volume::new(grid.shape(), out)?)
}
