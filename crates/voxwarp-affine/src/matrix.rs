use glam::{DMat2, DMat3, DMat4, DVec2, DVec3};

use crate::error::AffineError;

/// Determinant magnitude below which a matrix is treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

// Thin newtypes over the f64 glam matrices. Accessors take and return
// row-major arrays while glam stores columns.
macro_rules! define_affine_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $glam_type:ty,
        $n:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[repr(transparent)]
        pub struct $name($glam_type);

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl $name {
            /// The identity transform.
            pub fn identity() -> Self {
                Self(<$glam_type>::IDENTITY)
            }

            /// Wrap caller-constructed rows without validation.
            pub fn from_rows(rows: [[f64; $n]; $n]) -> Self {
                Self(<$glam_type>::from_cols_array_2d(&rows).transpose())
            }

            /// The rows of the matrix.
            pub fn rows(&self) -> [[f64; $n]; $n] {
                self.0.transpose().to_cols_array_2d()
            }

            /// Get the entry at `(row, col)`, or `None` if out of range.
            pub fn get(&self, row: usize, col: usize) -> Option<f64> {
                self.rows().get(row).and_then(|r| r.get(col)).copied()
            }

            /// The underlying glam matrix.
            pub fn as_glam(&self) -> &$glam_type {
                &self.0
            }

            /// Matrix product `self · other`.
            ///
            /// Applied to a point, the result performs `other` first and `self` second.
            pub fn compose(&self, other: &Self) -> Self {
                Self(self.0 * other.0)
            }

            /// Whether every entry is within `eps` of the corresponding entry of `other`.
            pub fn abs_diff_eq(&self, other: &Self, eps: f64) -> bool {
                self.0.abs_diff_eq(other.0, eps)
            }

            /// The determinant of the matrix.
            pub fn determinant(&self) -> f64 {
                self.0.determinant()
            }

            /// Invert the matrix.
            ///
            /// # Errors
            ///
            /// [`AffineError::SingularMatrix`] if the magnitude of the
            /// determinant is below `1e-12`.
            pub fn inverse(&self) -> Result<Self, AffineError> {
                if self.0.determinant().abs() < SINGULAR_EPS {
                    return Err(AffineError::SingularMatrix);
                }
                Ok(Self(self.0.inverse()))
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul for &$name {
            type Output = $name;

            fn mul(self, rhs: Self) -> Self::Output {
                self.compose(rhs)
            }
        }

        // Row-major arrays, as written on paper.
        impl From<[[f64; $n]; $n]> for $name {
            fn from(rows: [[f64; $n]; $n]) -> Self {
                Self::from_rows(rows)
            }
        }

        impl From<$glam_type> for $name {
            fn from(m: $glam_type) -> Self {
                Self(m)
            }
        }

        impl From<$name> for $glam_type {
            fn from(m: $name) -> Self {
                m.0
            }
        }
    };
}

define_affine_type!(
    /// A 4x4 homogeneous matrix for 3D transforms.
    ///
    /// Matrices produced by the builders in this crate always have
    /// `[0, 0, 0, 1]` as their last row. Matrices created with
    /// [`AffineMatrix3d::from_rows`] are taken as given: affine-ness is the
    /// caller's contract and is not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_affine::AffineMatrix3d;
    ///
    /// let m = AffineMatrix3d::from_rows([
    ///     [2.0, 0.0, 0.0, 1.0],
    ///     [0.0, 4.0, 0.0, 0.0],
    ///     [0.0, 0.0, 1.0, -3.0],
    ///     [0.0, 0.0, 0.0, 1.0],
    /// ]);
    /// let m_inv = m.inverse().unwrap();
    ///
    /// assert!(m.compose(&m_inv).abs_diff_eq(&AffineMatrix3d::identity(), 1e-12));
    /// ```
    AffineMatrix3d,
    DMat4,
    4
);

define_affine_type!(
    /// A 3x3 homogeneous matrix for 2D transforms.
    AffineMatrix2d,
    DMat3,
    3
);

impl AffineMatrix3d {
    /// Build a pure translation.
    pub fn from_translation(t: [f64; 3]) -> Self {
        Self(DMat4::from_translation(DVec3::from(t)))
    }

    /// Embed a row-major 3x3 linear block into a homogeneous matrix without translation.
    pub fn from_linear(linear: [[f64; 3]; 3]) -> Self {
        Self(DMat4::from_mat3(
            DMat3::from_cols_array_2d(&linear).transpose(),
        ))
    }

    /// The translation column.
    pub fn translation(&self) -> [f64; 3] {
        self.0.w_axis.truncate().to_array()
    }

    /// The upper-left 3x3 linear block, row-major.
    pub fn linear(&self) -> [[f64; 3]; 3] {
        DMat3::from_mat4(self.0).transpose().to_cols_array_2d()
    }

    /// Map a point through the matrix with homogeneous coordinate 1.
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        self.0.transform_point3(DVec3::from(p)).to_array()
    }
}

impl AffineMatrix2d {
    /// Build a pure translation.
    pub fn from_translation(t: [f64; 2]) -> Self {
        Self(DMat3::from_translation(DVec2::from(t)))
    }

    /// Embed a row-major 2x2 linear block into a homogeneous matrix without translation.
    pub fn from_linear(linear: [[f64; 2]; 2]) -> Self {
        Self(DMat3::from_mat2(
            DMat2::from_cols_array_2d(&linear).transpose(),
        ))
    }

    /// The translation column.
    pub fn translation(&self) -> [f64; 2] {
        self.0.z_axis.truncate().to_array()
    }

    /// Map a point through the matrix with homogeneous coordinate 1.
    pub fn transform_point(&self, p: [f64; 2]) -> [f64; 2] {
        self.0.transform_point2(DVec2::from(p)).to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_exact() {
        let m = AffineMatrix3d::identity();
        assert_eq!(
            m.rows(),
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]
        );
        assert_eq!(m.inverse(), Ok(m));
        assert_eq!(AffineMatrix3d::default(), m);
    }

    #[test]
    fn rows_are_row_major() {
        let rows = [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let m = AffineMatrix3d::from_rows(rows);
        assert_eq!(m.rows(), rows);
        assert_eq!(m.get(0, 3), Some(4.0));
        assert_eq!(m.translation(), [4.0, 8.0, 12.0]);
        assert_eq!(m.linear()[1], [5.0, 6.0, 7.0]);
        assert_eq!(m.as_glam().row(2).to_array(), rows[2]);
    }

    #[test]
    fn translation_inverse() -> Result<(), AffineError> {
        let m = AffineMatrix3d::from_translation([1.5, -2.0, 3.0]);
        let m_inv = m.inverse()?;
        let t = m_inv.translation();
        assert_relative_eq!(t[0], -1.5, epsilon = 1e-12);
        assert_relative_eq!(t[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(t[2], -3.0, epsilon = 1e-12);
        assert!(AffineMatrix3d::from_linear(m_inv.linear())
            .abs_diff_eq(&AffineMatrix3d::identity(), 1e-12));
        Ok(())
    }

    #[test]
    fn inverse_round_trip_general() -> Result<(), AffineError> {
        let m = AffineMatrix3d::from_rows([
            [0.0, 2.0, 0.5, 1.0],
            [1.0, 0.1, 0.0, -4.0],
            [0.3, 0.0, 3.0, 2.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let m_inv = m.inverse()?;
        assert!((m * m_inv).abs_diff_eq(&AffineMatrix3d::identity(), 1e-12));
        assert!((m_inv * m).abs_diff_eq(&AffineMatrix3d::identity(), 1e-12));
        Ok(())
    }

    #[test]
    fn singular_matrix_rejected() {
        let m = AffineMatrix3d::from_linear([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m.inverse(), Err(AffineError::SingularMatrix));
        assert_relative_eq!(m.determinant(), 0.0, epsilon = 1e-12);

        let zero_scale = AffineMatrix2d::from_linear([[0.0, 0.0], [0.0, 1.0]]);
        assert_eq!(zero_scale.inverse(), Err(AffineError::SingularMatrix));
    }

    #[test]
    fn singular_threshold_on_determinant() {
        // det = 1e-13, below the threshold although no entry is zero
        let tiny = AffineMatrix3d::from_linear([[1e-13, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(tiny.inverse(), Err(AffineError::SingularMatrix));

        // det = 1e-11, still invertible
        let small = AffineMatrix3d::from_linear([[1e-11, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(small.inverse().is_ok());

        let tiny_2d = AffineMatrix2d::from_linear([[1e-7, 0.0], [0.0, 1e-7]]);
        assert_eq!(tiny_2d.inverse(), Err(AffineError::SingularMatrix));
    }

    #[test]
    fn determinant_of_scale_and_swap() {
        let scale = AffineMatrix3d::from_linear([[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]]);
        assert_relative_eq!(scale.determinant(), 24.0);

        let swap = AffineMatrix2d::from_linear([[0.0, 1.0], [1.0, 0.0]]);
        assert_relative_eq!(swap.determinant(), -1.0);
    }

    #[test]
    fn compose_applies_right_first() {
        let t = AffineMatrix3d::from_translation([1.0, 0.0, 0.0]);
        let s = AffineMatrix3d::from_linear([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

        // scale first, then translate
        assert_eq!((t * s).transform_point([1.0, 0.0, 0.0]), [3.0, 0.0, 0.0]);
        // translate first, then scale
        assert_eq!((s * t).transform_point([1.0, 0.0, 0.0]), [4.0, 0.0, 0.0]);
        assert_eq!(&t * &s, t.compose(&s));
    }

    #[test]
    fn transform_point_2d() {
        let m = AffineMatrix2d::from_rows([[0.0, -1.0, 2.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.transform_point([1.0, 0.0]), [2.0, 1.0]);
        assert_eq!(m.translation(), [2.0, 0.0]);
        assert_eq!(m.get(1, 0), Some(1.0));
        assert_eq!(m.get(3, 0), None);
    }
}
