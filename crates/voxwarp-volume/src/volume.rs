use std::ops;

use crate::error::VolumeError;

/// Volume shape in voxels
///
/// The extent of a volume along its three spatial axes.
///
/// # Examples
///
/// ```
/// use voxwarp_volume::VolumeShape;
///
/// let shape = VolumeShape { x: 4, y: 5, z: 6 };
///
/// assert_eq!(shape.num_voxels(), 120);
/// assert_eq!(shape.midpoint(), [2, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VolumeShape {
    /// Number of voxels along the first axis
    pub x: usize,
    /// Number of voxels along the second axis
    pub y: usize,
    /// Number of voxels along the third axis
    pub z: usize,
}

impl VolumeShape {
    /// Total number of voxels.
    pub fn num_voxels(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Geometric midpoint `floor(dim / 2)` per axis.
    ///
    /// This is the voxel the origin of the resampling grid maps to.
    pub fn midpoint(&self) -> [usize; 3] {
        [self.x / 2, self.y / 2, self.z / 2]
    }

    /// The shape as an array `[x, y, z]`.
    pub fn dims(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear offset of a voxel in C order.
    ///
    /// PRECONDITION: the index is within bounds.
    #[inline]
    pub fn offset(&self, index: [usize; 3]) -> usize {
        (index[0] * self.y + index[1]) * self.z + index[2]
    }

    /// Whether the index lies inside the volume.
    #[inline]
    pub fn contains(&self, index: [usize; 3]) -> bool {
        index[0] < self.x && index[1] < self.y && index[2] < self.z
    }
}

impl std::fmt::Display for VolumeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

impl From<[usize; 3]> for VolumeShape {
    fn from(dims: [usize; 3]) -> Self {
        VolumeShape {
            x: dims[0],
            y: dims[1],
            z: dims[2],
        }
    }
}

impl From<VolumeShape> for [usize; 3] {
    fn from(shape: VolumeShape) -> Self {
        shape.dims()
    }
}

impl TryFrom<&[usize]> for VolumeShape {
    type Error = VolumeError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        match dims {
            [x, y, z] => Ok(VolumeShape {
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => Err(VolumeError::InvalidDimension(dims.len())),
        }
    }
}

/// Trait for voxel data types.
///
/// Interpolation is carried out in `f64`, which holds every value of the
/// supported types exactly; integer types round and saturate when converted
/// back.
pub trait VolumeDtype: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Convert the value to `f64`.
    fn to_f64(self) -> f64;

    /// Convert a `f64` value to the voxel data type.
    fn from_f64(x: f64) -> Self;
}

impl VolumeDtype for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl VolumeDtype for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(x: f64) -> Self {
        x
    }
}

macro_rules! impl_integer_dtype {
    ($($t:ty),*) => {
        $(
            impl VolumeDtype for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(x: f64) -> Self {
                    // `as` saturates at the type bounds and maps NaN to zero
                    x.round() as $t
                }
            }
        )*
    };
}

impl_integer_dtype!(u8, u16, i16, i32);

/// Represents a dense 3D grid of scalar intensities.
///
/// The data is stored in C order: the last axis varies fastest, so voxel
/// `[x, y, z]` lives at offset `(x * Y + y) * Z + z`.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume<T> {
    data: Vec<T>,
    shape: VolumeShape,
}

impl<T> Volume<T> {
    /// Create a new volume from voxel data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the volume in voxels.
    /// * `data` - The voxel data in C order.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the shape, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_volume::Volume;
    ///
    /// let volume = Volume::new([2, 3, 4].into(), vec![0f32; 24]).unwrap();
    ///
    /// assert_eq!(volume.shape().dims(), [2, 3, 4]);
    /// assert_eq!(volume.num_voxels(), 24);
    /// ```
    pub fn new(shape: VolumeShape, data: Vec<T>) -> Result<Self, VolumeError> {
        if data.len() != shape.num_voxels() {
            return Err(VolumeError::InvalidShape {
                expected: shape.num_voxels(),
                actual: data.len(),
            });
        }

        Ok(Self { data, shape })
    }

    /// Create a new volume from a dynamically sized shape.
    ///
    /// This is the entry point for arrays decoded elsewhere, whose rank is
    /// only known at runtime.
    ///
    /// # Errors
    ///
    /// [`VolumeError::InvalidDimension`] if `dims` does not have exactly three
    /// entries, [`VolumeError::InvalidShape`] if the data length disagrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_volume::{Volume, VolumeError};
    ///
    /// let err = Volume::from_shape_vec_dyn(&[4, 4], vec![0f32; 16]).unwrap_err();
    /// assert_eq!(err, VolumeError::InvalidDimension(2));
    /// ```
    pub fn from_shape_vec_dyn(dims: &[usize], data: Vec<T>) -> Result<Self, VolumeError> {
        let shape = VolumeShape::try_from(dims)?;
        Self::new(shape, data)
    }

    /// Create a new volume by evaluating a function at every voxel index.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_volume::Volume;
    ///
    /// let volume = Volume::from_shape_fn([2, 2, 2].into(), |[x, y, z]| (x + y + z) as f32);
    ///
    /// assert_eq!(volume[[1, 1, 1]], 3.0);
    /// ```
    pub fn from_shape_fn(shape: VolumeShape, f: impl Fn([usize; 3]) -> T) -> Self {
        let mut data = Vec::with_capacity(shape.num_voxels());
        for x in 0..shape.x {
            for y in 0..shape.y {
                for z in 0..shape.z {
                    data.push(f([x, y, z]));
                }
            }
        }

        Self { data, shape }
    }

    /// Get the shape of the volume.
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Get the number of voxels.
    pub fn num_voxels(&self) -> usize {
        self.data.len()
    }

    /// Get the voxel data as a slice in C order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the voxel data as a mutable slice in C order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the volume and return its voxel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to a voxel, or `None` if the index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        if !self.shape.contains(index) {
            return None;
        }
        self.data.get(self.shape.offset(index))
    }

    /// Get a mutable reference to a voxel, or `None` if the index is out of bounds.
    pub fn get_mut(&mut self, index: [usize; 3]) -> Option<&mut T> {
        if !self.shape.contains(index) {
            return None;
        }
        let offset = self.shape.offset(index);
        self.data.get_mut(offset)
    }

    /// Apply a function to every voxel and return the new volume.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Volume<U> {
        Volume {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
        }
    }
}

impl<T: Clone> Volume<T> {
    /// Create a new volume filled with a single value.
    pub fn from_shape_val(shape: VolumeShape, val: T) -> Self {
        Self {
            data: vec![val; shape.num_voxels()],
            shape,
        }
    }
}

impl<T: VolumeDtype> Volume<T> {
    /// Create a new volume filled with the zero value of the data type.
    pub fn zeros(shape: VolumeShape) -> Self {
        Self::from_shape_val(shape, T::default())
    }

    /// Cast the voxel data of the volume to a different type.
    ///
    /// # Errors
    ///
    /// If a value cannot be represented in the target type, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxwarp_volume::Volume;
    ///
    /// let labels = Volume::new([1, 1, 2].into(), vec![3u8, 7]).unwrap();
    /// let labels_f32 = labels.cast::<f32>().unwrap();
    ///
    /// assert_eq!(labels_f32.as_slice(), &[3.0, 7.0]);
    /// ```
    pub fn cast<U>(&self) -> Result<Volume<U>, VolumeError>
    where
        U: VolumeDtype + num_traits::NumCast,
        T: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&x| {
                U::from(x)
                    .ok_or_else(|| VolumeError::CastError(std::any::type_name::<U>().to_string()))
            })
            .collect::<Result<Vec<U>, VolumeError>>()?;

        Volume::new(self.shape, data)
    }
}

impl<T> ops::Index<[usize; 3]> for Volume<T> {
    type Output = T;

    fn index(&self, index: [usize; 3]) -> &Self::Output {
        assert!(
            self.shape.contains(index),
            "voxel index {index:?} out of bounds for volume of shape {}",
            self.shape
        );
        &self.data[self.shape.offset(index)]
    }
}

impl<T> ops::IndexMut<[usize; 3]> for Volume<T> {
    fn index_mut(&mut self, index: [usize; 3]) -> &mut Self::Output {
        assert!(
            self.shape.contains(index),
            "voxel index {index:?} out of bounds for volume of shape {}",
            self.shape
        );
        let offset = self.shape.offset(index);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::{Volume, VolumeDtype, VolumeShape};
    use crate::error::VolumeError;

    #[test]
    fn volume_shape() {
        let shape = VolumeShape { x: 3, y: 4, z: 5 };
        assert_eq!(shape.num_voxels(), 60);
        assert_eq!(shape.midpoint(), [1, 2, 2]);
        assert_eq!(shape.to_string(), "3x4x5");
    }

    #[test]
    fn volume_smoke() -> Result<(), VolumeError> {
        let volume = Volume::<u8>::new([2, 3, 4].into(), vec![0u8; 24])?;
        assert_eq!(volume.shape(), VolumeShape { x: 2, y: 3, z: 4 });
        assert_eq!(volume.num_voxels(), 24);
        Ok(())
    }

    #[test]
    fn volume_invalid_length() {
        let res = Volume::<f32>::new([2, 2, 2].into(), vec![0.0; 7]);
        assert_eq!(
            res,
            Err(VolumeError::InvalidShape {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn volume_dyn_shape() -> Result<(), VolumeError> {
        let volume = Volume::from_shape_vec_dyn(&[1, 2, 3], vec![1f32; 6])?;
        assert_eq!(volume.shape().dims(), [1, 2, 3]);

        let err = Volume::from_shape_vec_dyn(&[1, 2, 3, 4], vec![1f32; 24]);
        assert_eq!(err, Err(VolumeError::InvalidDimension(4)));
        Ok(())
    }

    #[test]
    fn volume_c_order() -> Result<(), VolumeError> {
        let volume = Volume::new([2, 2, 3].into(), (0..12).map(|v| v as f32).collect())?;
        assert_eq!(volume[[0, 0, 2]], 2.0);
        assert_eq!(volume[[0, 1, 0]], 3.0);
        assert_eq!(volume[[1, 0, 0]], 6.0);
        assert_eq!(volume.get([1, 1, 2]), Some(&11.0));
        assert_eq!(volume.get([2, 0, 0]), None);
        Ok(())
    }

    #[test]
    fn volume_from_shape_fn() {
        let volume = Volume::from_shape_fn([3, 3, 3].into(), |[x, y, z]| x * 100 + y * 10 + z);
        assert_eq!(volume[[2, 1, 0]], 210);
        assert_eq!(volume.as_slice()[5], 12);
    }

    #[test]
    fn volume_cast() -> Result<(), VolumeError> {
        let volume = Volume::new([1, 1, 3].into(), vec![1.0f32, 2.0, 300.0])?;
        let as_i32: Volume<i32> = volume.cast()?;
        assert_eq!(as_i32.as_slice(), &[1, 2, 300]);

        let err = volume.cast::<u8>();
        assert!(matches!(err, Err(VolumeError::CastError(_))));
        Ok(())
    }

    #[test]
    fn dtype_roundtrip_saturates() {
        assert_eq!(u8::from_f64(254.6), 255);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert_eq!(i16::from_f64(-2.5), -3);
        assert_eq!(i32::from_f64(f64::NAN), 0);
        assert_eq!(f32::from_f64(0.25), 0.25);
        assert_eq!(7u16.to_f64(), 7.0);
    }

    #[test]
    fn dtype_keeps_wide_values_exact() {
        // not representable in f32
        assert_eq!(i32::from_f64(16_777_217i32.to_f64()), 16_777_217);
        assert_eq!(i32::from_f64(i32::MAX.to_f64()), i32::MAX);
        assert_eq!(f64::from_f64(12345.678f64.to_f64()), 12345.678);
    }
}
