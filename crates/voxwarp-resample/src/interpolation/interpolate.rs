use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use voxwarp_volume::{Volume, VolumeDtype};

use super::grid::CoordinateGrid;
use super::nearest::interp_nearest;
use super::trilinear::interp_trilinear;
use crate::error::ResampleError;
use crate::parallel::ExecutionStrategy;

/// Interpolation mode for the resample operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
    /// Trilinear interpolation
    Linear,
}

impl InterpolationMode {
    /// The name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMode::Nearest => "nearest",
            InterpolationMode::Linear => "linear",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMode {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(InterpolationMode::Nearest),
            "linear" => Ok(InterpolationMode::Linear),
            other => Err(ResampleError::UnsupportedInterpolation(other.to_string())),
        }
    }
}

/// Policy for samples that fall outside the volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    /// Out-of-bounds samples read as zero
    #[default]
    Zero,
}

impl BorderMode {
    /// The name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderMode::Zero => "zero",
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderMode {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(BorderMode::Zero),
            other => Err(ResampleError::UnsupportedBorderMode(other.to_string())),
        }
    }
}

/// Sample a volume at every position of a coordinate grid.
///
/// # Arguments
///
/// * `volume` - The volume to sample from.
/// * `grid` - Sample positions in array-index space.
/// * `interpolation` - The interpolation mode to use.
/// * `border_mode` - The policy for out-of-bounds positions.
/// * `strategy` - Where the per-voxel work runs.
///
/// # Returns
///
/// A volume with the grid's spatial shape.
pub fn interpolate<T: VolumeDtype>(
    volume: &Volume<T>,
    grid: &CoordinateGrid,
    interpolation: InterpolationMode,
    border_mode: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<Volume<T>, ResampleError> {
    match interpolation {
        InterpolationMode::Nearest => interp_nearest(volume, grid, border_mode, strategy),
        InterpolationMode::Linear => interp_trilinear(volume, grid, border_mode, strategy),
    }
}
