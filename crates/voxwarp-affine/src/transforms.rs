use crate::matrix::{AffineMatrix2d, AffineMatrix3d};
use crate::params::{TransformParameters2d, TransformParameters3d};

/// Rotation about the X axis by `angle` radians.
pub fn rotation_x(angle: f64) -> AffineMatrix3d {
    let (s, c) = angle.sin_cos();
    AffineMatrix3d::from_linear([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
}

/// Rotation about the Y axis by `angle` radians.
pub fn rotation_y(angle: f64) -> AffineMatrix3d {
    let (s, c) = angle.sin_cos();
    AffineMatrix3d::from_linear([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
}

/// Rotation about the Z axis by `angle` radians.
pub fn rotation_z(angle: f64) -> AffineMatrix3d {
    let (s, c) = angle.sin_cos();
    AffineMatrix3d::from_linear([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

/// Per-axis scaling.
pub fn scaling_3d(scale: [f64; 3]) -> AffineMatrix3d {
    AffineMatrix3d::from_linear([
        [scale[0], 0.0, 0.0],
        [0.0, scale[1], 0.0],
        [0.0, 0.0, scale[2]],
    ])
}

/// Composite shear `Shz · Shy · Shx`.
///
/// Each elementary shear is the identity with the two off-diagonal entries of
/// its row set from `shear`, i.e. `Shx[0,1] = shear[0][0]`,
/// `Shx[0,2] = shear[0][1]` and likewise for Y and Z.
pub fn shearing_3d(shear: [[f64; 2]; 3]) -> AffineMatrix3d {
    let shx = AffineMatrix3d::from_linear([
        [1.0, shear[0][0], shear[0][1]],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);
    let shy = AffineMatrix3d::from_linear([
        [1.0, 0.0, 0.0],
        [shear[1][0], 1.0, shear[1][1]],
        [0.0, 0.0, 1.0],
    ]);
    let shz = AffineMatrix3d::from_linear([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [shear[2][0], shear[2][1], 1.0],
    ]);

    shz * shy * shx
}

/// Build a 3D affine matrix (4x4) from geometric parameters.
///
/// The transform is composed as
///
/// ```text
/// T · (Shz · Shy · Shx) · S · (Rz · Ry · Rx)
/// ```
///
/// so a point is rotated about X, then Y, then Z, scaled, sheared and finally
/// translated. Rotation is not commutative and the order is part of the
/// contract.
///
/// # Arguments
///
/// * `params` - Translation, rotation, scale and shear.
///
/// # Returns
///
/// The 4x4 homogeneous matrix. Identity parameters give exactly the identity.
///
/// Example:
///
/// ```
/// use voxwarp_affine::{build_affine_3d, AffineMatrix3d, TransformParameters3d};
///
/// let m = build_affine_3d(&TransformParameters3d::default());
/// assert_eq!(m, AffineMatrix3d::identity());
/// ```
pub fn build_affine_3d(params: &TransformParameters3d) -> AffineMatrix3d {
    let [rx, ry, rz] = params.rotation;
    let rotation = rotation_z(rz) * rotation_y(ry) * rotation_x(rx);
    let linear = shearing_3d(params.shear) * (scaling_3d(params.scale) * rotation);

    AffineMatrix3d::from_translation(params.translation) * linear
}

/// Build a 2D affine matrix (3x3) from geometric parameters.
///
/// The linear part is `Sh · S · R` with `R = [[cos θ, -sin θ], [sin θ, cos θ]]`
/// and `Sh = [[1, shear[0]], [shear[1], 1]]`; the translation fills the last
/// column.
///
/// Example:
///
/// ```
/// use voxwarp_affine::{build_affine_2d, TransformParameters2d};
///
/// let params = TransformParameters2d {
///     translation: [3.0, 4.0],
///     ..Default::default()
/// };
/// let m = build_affine_2d(&params);
/// assert_eq!(m.transform_point([1.0, 1.0]), [4.0, 5.0]);
/// ```
pub fn build_affine_2d(params: &TransformParameters2d) -> AffineMatrix2d {
    let (s, c) = params.rotation.sin_cos();
    let rotation = AffineMatrix2d::from_linear([[c, -s], [s, c]]);
    let scaling = AffineMatrix2d::from_linear([[params.scale[0], 0.0], [0.0, params.scale[1]]]);
    let shearing = AffineMatrix2d::from_linear([[1.0, params.shear[0]], [params.shear[1], 1.0]]);

    AffineMatrix2d::from_translation(params.translation) * (shearing * (scaling * rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_point_eq(a: [f64; 3], b: [f64; 3]) {
        for i in 0..3 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn identity_params_give_identity() {
        assert_eq!(
            build_affine_3d(&TransformParameters3d::default()),
            AffineMatrix3d::identity()
        );
        assert_eq!(
            build_affine_2d(&TransformParameters2d::default()),
            AffineMatrix2d::identity()
        );
    }

    #[test]
    fn elementary_rotations() {
        assert_point_eq(rotation_x(FRAC_PI_2).transform_point([0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_point_eq(rotation_y(FRAC_PI_2).transform_point([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
        assert_point_eq(rotation_z(FRAC_PI_2).transform_point([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let params = TransformParameters3d {
            rotation: [FRAC_PI_2, 0.0, FRAC_PI_2],
            ..Default::default()
        };
        let m = build_affine_3d(&params);

        // Rx sends +y to +z, Rz leaves +z in place
        assert_point_eq(m.transform_point([0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        // Rx leaves +x in place, Rz sends +x to +y
        assert_point_eq(m.transform_point([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn scale_applied_after_rotation() {
        let params = TransformParameters3d {
            rotation: [0.0, 0.0, FRAC_PI_2],
            scale: [2.0, 3.0, 1.0],
            ..Default::default()
        };
        let m = build_affine_3d(&params);

        // +x rotates onto +y and is then scaled by the Y factor
        assert_point_eq(m.transform_point([1.0, 0.0, 0.0]), [0.0, 3.0, 0.0]);
    }

    #[test]
    fn shear_entries() {
        let params = TransformParameters3d {
            shear: [[0.1, 0.2], [0.0, 0.0], [0.0, 0.0]],
            ..Default::default()
        };
        let m = build_affine_3d(&params);
        assert_eq!(m.rows()[0], [1.0, 0.1, 0.2, 0.0]);
        assert_eq!(m.rows()[1], [0.0, 1.0, 0.0, 0.0]);

        // Shx is applied before Shy: y picks up the sheared x
        let sh = shearing_3d([[0.5, 0.0], [2.0, 0.0], [0.0, 0.0]]);
        assert_point_eq(sh.transform_point([0.0, 1.0, 0.0]), [0.5, 2.0, 0.0]);
    }

    #[test]
    fn translation_in_last_column() {
        let params = TransformParameters3d {
            translation: [1.0, -2.0, 3.5],
            rotation: [0.3, -0.2, 0.1],
            scale: [1.1, 0.9, 1.0],
            shear: [[0.01, 0.0], [0.0, 0.02], [0.0, 0.0]],
        };
        let m = build_affine_3d(&params);
        assert_eq!(m.translation(), [1.0, -2.0, 3.5]);
        assert_eq!(m.rows()[3], [0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(
            m.determinant(),
            1.1 * 0.9,
            epsilon = 1e-12
        );
    }

    #[test]
    fn affine_2d_composition() {
        let params = TransformParameters2d {
            translation: [1.0, 0.0],
            rotation: FRAC_PI_2,
            scale: [2.0, 1.0],
            shear: [0.0, 0.0],
        };
        let m = build_affine_2d(&params);
        let p = m.transform_point([0.0, 1.0]);

        // rotate (0,1) -> (-1,0), scale x by 2 -> (-2,0), translate -> (-1,0)
        assert_relative_eq!(p[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 0.0, epsilon = 1e-12);
        assert_eq!(m.rows()[2], [0.0, 0.0, 1.0]);

        let sheared = build_affine_2d(&TransformParameters2d {
            shear: [0.5, 0.25],
            ..Default::default()
        });
        assert_eq!(sheared.rows()[0], [1.0, 0.5, 0.0]);
        assert_eq!(sheared.rows()[1], [0.25, 1.0, 0.0]);
    }
}
