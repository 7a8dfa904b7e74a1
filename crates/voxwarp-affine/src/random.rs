use rand::Rng;

use crate::error::AffineError;
use crate::matrix::AffineMatrix3d;
use crate::params::{ParameterRanges3d, TransformParameters3d};
use crate::transforms::build_affine_3d;

/// Outcome of [`sample_random_affine_3d`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampledAffine {
    /// The composed 4x4 matrix.
    Matrix(AffineMatrix3d),
    /// The raw sampled parameters.
    Parameters(TransformParameters3d),
}

impl SampledAffine {
    /// The matrix, building it from the parameters if needed.
    pub fn into_matrix(self) -> AffineMatrix3d {
        match self {
            SampledAffine::Matrix(m) => m,
            SampledAffine::Parameters(p) => build_affine_3d(&p),
        }
    }

    /// The parameters, if this holds parameters.
    pub fn parameters(&self) -> Option<&TransformParameters3d> {
        match self {
            SampledAffine::Parameters(p) => Some(p),
            SampledAffine::Matrix(_) => None,
        }
    }
}

// min + u * (max - min) reproduces `min` bit-exactly for degenerate ranges
fn sample_range<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f64; 2]) -> f64 {
    let u: f64 = rng.random();
    min + u * (max - min)
}

fn sample_ranges<const K: usize, R: Rng + ?Sized>(
    rng: &mut R,
    ranges: &[[f64; 2]; K],
) -> [f64; K] {
    let mut out = [0.0; K];
    for (o, r) in out.iter_mut().zip(ranges.iter()) {
        *o = sample_range(rng, *r);
    }
    out
}

/// Sample transform parameters uniformly within the given ranges.
///
/// # Errors
///
/// [`AffineError::InvalidRange`] if the ranges do not validate.
pub fn sample_random_parameters_3d<R: Rng + ?Sized>(
    ranges: &ParameterRanges3d,
    rng: &mut R,
) -> Result<TransformParameters3d, AffineError> {
    ranges.validate()?;

    let translation = sample_ranges(rng, &ranges.translation);
    let rotation = sample_ranges(rng, &ranges.rotation);
    let scale = sample_ranges(rng, &ranges.scale);
    let shear = sample_ranges(rng, &ranges.shear);

    let params = TransformParameters3d {
        translation,
        rotation,
        scale,
        shear: [[shear[0], shear[1]], [shear[2], shear[3]], [shear[4], shear[5]]],
    };
    log::trace!("sampled affine parameters: {params:?}");

    Ok(params)
}

/// Sample a random 3D affine transform.
///
/// Every component is drawn uniformly from its `[min, max]` range. Components
/// whose range is omitted keep the identity value.
///
/// # Arguments
///
/// * `ranges` - Sampling bounds per component.
/// * `return_params` - Return the sampled parameters instead of the matrix.
/// * `rng` - Source of randomness.
///
/// # Errors
///
/// [`AffineError::InvalidRange`] if the ranges do not validate.
///
/// Example:
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use voxwarp_affine::{sample_random_affine_3d, ParameterRanges3d};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let ranges = ParameterRanges3d {
///     translation: [[-5.0, 5.0]; 3],
///     ..Default::default()
/// };
///
/// let sampled = sample_random_affine_3d(&ranges, true, &mut rng).unwrap();
/// let params = sampled.parameters().unwrap();
/// assert!(params.translation.iter().all(|t| (-5.0..=5.0).contains(t)));
/// assert_eq!(params.scale, [1.0; 3]);
/// ```
pub fn sample_random_affine_3d<R: Rng + ?Sized>(
    ranges: &ParameterRanges3d,
    return_params: bool,
    rng: &mut R,
) -> Result<SampledAffine, AffineError> {
    let params = sample_random_parameters_3d(ranges, rng)?;

    Ok(match return_params {
        true => SampledAffine::Parameters(params),
        false => SampledAffine::Matrix(build_affine_3d(&params)),
    })
}
