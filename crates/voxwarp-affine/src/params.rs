use serde::{Deserialize, Serialize};

use crate::error::AffineError;

/// Geometric parameters of a 3D affine transform.
///
/// `Default` is the identity transform: zero translation, rotation and shear
/// and unit scale.
///
/// # Examples
///
/// ```
/// use voxwarp_affine::TransformParameters3d;
///
/// let params = TransformParameters3d::new(
///     [1.0, 0.0, 0.0],
///     [0.0, 0.0, std::f64::consts::FRAC_PI_2],
///     [1.0, 1.0, 2.0],
///     [[0.0; 2]; 3],
/// ).unwrap();
///
/// assert_eq!(params.scale, [1.0, 1.0, 2.0]);
/// assert!(TransformParameters3d::new([0.0; 3], [0.0; 3], [1.0, 0.0, 1.0], [[0.0; 2]; 3]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters3d {
    /// Translation in voxels along X, Y, Z.
    pub translation: [f64; 3],
    /// Rotation angles in radians about the X, Y, Z axes.
    pub rotation: [f64; 3],
    /// Positive scale factors along X, Y, Z.
    pub scale: [f64; 3],
    /// Shear coefficients `[[xy, xz], [yx, yz], [zx, zy]]`.
    pub shear: [[f64; 2]; 3],
}

impl Default for TransformParameters3d {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            shear: [[0.0; 2]; 3],
        }
    }
}

impl TransformParameters3d {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// [`AffineError::InvalidParameter`] if any value is not finite or a scale
    /// factor is not strictly positive.
    pub fn new(
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: [f64; 3],
        shear: [[f64; 2]; 3],
    ) -> Result<Self, AffineError> {
        let params = Self {
            translation,
            rotation,
            scale,
            shear,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every value is finite and every scale factor positive.
    pub fn validate(&self) -> Result<(), AffineError> {
        check_finite("translation", &self.translation)?;
        check_finite("rotation", &self.rotation)?;
        check_finite("shear", &self.shear.concat())?;
        check_scale(&self.scale)
    }

    /// Whether these parameters describe the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Geometric parameters of a 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters2d {
    /// Translation along X, Y.
    pub translation: [f64; 2],
    /// Rotation angle in radians.
    pub rotation: f64,
    /// Positive scale factors along X, Y.
    pub scale: [f64; 2],
    /// Shear coefficients `[xy, yx]`.
    pub shear: [f64; 2],
}

impl Default for TransformParameters2d {
    fn default() -> Self {
        Self {
            translation: [0.0; 2],
            rotation: 0.0,
            scale: [1.0; 2],
            shear: [0.0; 2],
        }
    }
}

impl TransformParameters2d {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// [`AffineError::InvalidParameter`] if any value is not finite or a scale
    /// factor is not strictly positive.
    pub fn new(
        translation: [f64; 2],
        rotation: f64,
        scale: [f64; 2],
        shear: [f64; 2],
    ) -> Result<Self, AffineError> {
        let params = Self {
            translation,
            rotation,
            scale,
            shear,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every value is finite and every scale factor positive.
    pub fn validate(&self) -> Result<(), AffineError> {
        check_finite("translation", &self.translation)?;
        check_finite("rotation", &[self.rotation])?;
        check_finite("shear", &self.shear)?;
        check_scale(&self.scale)
    }
}

/// Uniform sampling bounds `[min, max]` for every 3D transform component.
///
/// Omitted fields default to the degenerate range of the identity value, so a
/// partially specified config only randomizes what it names.
///
/// # Examples
///
/// ```
/// use voxwarp_affine::ParameterRanges3d;
///
/// let ranges: ParameterRanges3d = serde_json::from_str(
///     r#"{ "translation": [[-5, 5], [-5, 5], [0, 0]] }"#,
/// ).unwrap();
///
/// assert_eq!(ranges.translation[0], [-5.0, 5.0]);
/// assert_eq!(ranges.scale, [[1.0, 1.0]; 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterRanges3d {
    /// `[min, max]` translation along X, Y, Z.
    pub translation: [[f64; 2]; 3],
    /// `[min, max]` rotation in radians about X, Y, Z.
    pub rotation: [[f64; 2]; 3],
    /// `[min, max]` scale along X, Y, Z.
    pub scale: [[f64; 2]; 3],
    /// `[min, max]` shear for xy, xz, yx, yz, zx, zy.
    pub shear: [[f64; 2]; 6],
}

impl Default for ParameterRanges3d {
    fn default() -> Self {
        Self {
            translation: [[0.0; 2]; 3],
            rotation: [[0.0; 2]; 3],
            scale: [[1.0; 2]; 3],
            shear: [[0.0; 2]; 6],
        }
    }
}

impl ParameterRanges3d {
    /// Symmetric ranges `[-limit, limit]` for translation, rotation and shear
    /// and `[1 - limit, 1 + limit]` for scale.
    pub fn symmetric(translation: f64, rotation: f64, scale: f64, shear: f64) -> Self {
        Self {
            translation: [[-translation, translation]; 3],
            rotation: [[-rotation, rotation]; 3],
            scale: [[1.0 - scale, 1.0 + scale]; 3],
            shear: [[-shear, shear]; 6],
        }
    }

    /// Check every range for finite, ordered bounds and positive scale.
    ///
    /// # Errors
    ///
    /// [`AffineError::InvalidRange`] naming the first offending component.
    pub fn validate(&self) -> Result<(), AffineError> {
        check_ranges("translation", &self.translation)?;
        check_ranges("rotation", &self.rotation)?;
        check_ranges("scale", &self.scale)?;
        check_ranges("shear", &self.shear)?;

        if let Some((i, r)) = self.scale.iter().enumerate().find(|(_, r)| r[0] <= 0.0) {
            return Err(AffineError::InvalidRange(format!(
                "scale[{i}] lower bound must be positive, got {}",
                r[0]
            )));
        }

        Ok(())
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), AffineError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(AffineError::InvalidParameter(format!(
            "{name}[{i}] must be finite, got {}",
            values[i]
        ))),
        None => Ok(()),
    }
}

fn check_scale(scale: &[f64]) -> Result<(), AffineError> {
    check_finite("scale", scale)?;
    match scale.iter().position(|s| *s <= 0.0) {
        Some(i) => Err(AffineError::InvalidParameter(format!(
            "scale[{i}] must be positive, got {}",
            scale[i]
        ))),
        None => Ok(()),
    }
}

fn check_ranges(name: &str, ranges: &[[f64; 2]]) -> Result<(), AffineError> {
    for (i, [min, max]) in ranges.iter().enumerate() {
        if !min.is_finite() || !max.is_finite() {
            return Err(AffineError::InvalidRange(format!(
                "{name}[{i}] bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(AffineError::InvalidRange(format!(
                "{name}[{i}] has min {min} greater than max {max}"
            )));
        }
    }
    Ok(())
}
