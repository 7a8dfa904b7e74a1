/// Error types for affine matrix construction and algebra.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AffineError {
    /// The matrix has a (numerically) zero determinant and cannot be inverted.
    #[error("Affine matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// A transform parameter is outside its valid domain.
    #[error("Invalid transform parameter: {0}")]
    InvalidParameter(String),

    /// A sampling range is malformed.
    #[error("Invalid parameter range: {0}")]
    InvalidRange(String),
}
