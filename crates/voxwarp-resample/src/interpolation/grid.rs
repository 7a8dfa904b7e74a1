use voxwarp_volume::VolumeShape;

use crate::error::ResampleError;

/// Sample coordinates for every output position, shape `(3, N)`.
///
/// The coordinates are stored axis-major: one contiguous run of `N` values per
/// spatial axis. `shape` is the spatial layout the `N` positions reshape into.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateGrid {
    coords: [Vec<f64>; 3],
    shape: VolumeShape,
}

impl CoordinateGrid {
    /// Create a grid from per-axis coordinate vectors.
    ///
    /// # Errors
    ///
    /// [`ResampleError::ShapeMismatch`] if an axis does not hold exactly one
    /// coordinate per position of `shape`.
    pub fn new(shape: VolumeShape, coords: [Vec<f64>; 3]) -> Result<Self, ResampleError> {
        let expected = shape.num_voxels();
        if let Some(axis) = coords.iter().find(|axis| axis.len() != expected) {
            return Err(ResampleError::ShapeMismatch {
                expected,
                actual: axis.len(),
            });
        }

        Ok(Self { coords, shape })
    }

    /// Create a grid from a flat row-major `(rows, N)` array.
    ///
    /// # Errors
    ///
    /// [`ResampleError::ShapeMismatch`] if `rows` is not 3, i.e. the grid and
    /// the volume disagree in dimensionality, or if the data length is not
    /// `rows * N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_resample::interpolation::CoordinateGrid;
    /// use voxwarp_resample::ResampleError;
    ///
    /// let grid = CoordinateGrid::from_rows(3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], [1, 1, 2].into()).unwrap();
    /// assert_eq!(grid.get(1), [1.0, 3.0, 5.0]);
    ///
    /// let err = CoordinateGrid::from_rows(2, vec![0.0; 4], [1, 1, 2].into()).unwrap_err();
    /// assert_eq!(err, ResampleError::ShapeMismatch { expected: 3, actual: 2 });
    /// ```
    pub fn from_rows(rows: usize, data: Vec<f64>, shape: VolumeShape) -> Result<Self, ResampleError> {
        if rows != 3 {
            return Err(ResampleError::ShapeMismatch {
                expected: 3,
                actual: rows,
            });
        }

        let n = shape.num_voxels();
        if data.len() != rows * n {
            return Err(ResampleError::ShapeMismatch {
                expected: rows * n,
                actual: data.len(),
            });
        }

        let mut data = data;
        let z = data.split_off(2 * n);
        let y = data.split_off(n);
        Self::new(shape, [data, y, z])
    }

    /// Create a grid by evaluating `f` at every voxel index of `shape` in C order.
    pub fn from_fn(shape: VolumeShape, f: impl Fn([usize; 3]) -> [f64; 3]) -> Self {
        let n = shape.num_voxels();
        let mut coords = [
            Vec::with_capacity(n),
            Vec::with_capacity(n),
            Vec::with_capacity(n),
        ];

        for x in 0..shape.x {
            for y in 0..shape.y {
                for z in 0..shape.z {
                    let c = f([x, y, z]);
                    for (axis, v) in coords.iter_mut().zip(c) {
                        axis.push(v);
                    }
                }
            }
        }

        Self { coords, shape }
    }

    /// The grid centered on the volume midpoint.
    ///
    /// Axis `i` ranges over `[-mid_i, dim_i - mid_i)` with `mid_i = floor(dim_i / 2)`,
    /// so the origin sits on voxel `mid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_resample::interpolation::CoordinateGrid;
    ///
    /// let grid = CoordinateGrid::centered([3, 1, 4].into());
    /// assert_eq!(grid.axis(0), &[-1.0, -1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    /// assert_eq!(grid.axis(2)[..4], [-2.0, -1.0, 0.0, 1.0]);
    /// ```
    pub fn centered(shape: VolumeShape) -> Self {
        let mid = shape.midpoint();
        Self::from_fn(shape, |index| {
            let mut c = [0.0; 3];
            for i in 0..3 {
                c[i] = index[i] as f64 - mid[i] as f64;
            }
            c
        })
    }

    /// Number of sample positions `N`.
    pub fn len(&self) -> usize {
        self.coords[0].len()
    }

    /// Whether the grid holds no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spatial layout of the sample positions.
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// The coordinates along one axis.
    ///
    /// PRECONDITION: `axis < 3`.
    pub fn axis(&self, axis: usize) -> &[f64] {
        &self.coords[axis]
    }

    /// The coordinate of position `i`.
    ///
    /// PRECONDITION: `i < self.len()`.
    #[inline]
    pub fn get(&self, i: usize) -> [f64; 3] {
        [self.coords[0][i], self.coords[1][i], self.coords[2][i]]
    }
}
