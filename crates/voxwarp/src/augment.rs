use rand::Rng;
use voxwarp_affine::{sample_random_affine_3d, AffineMatrix3d};
use voxwarp_resample::interpolation::InterpolationMode;
use voxwarp_resample::parallel::ExecutionStrategy;
use voxwarp_resample::warp::apply_affine_with_strategy;
use voxwarp_volume::{Volume, VolumeDtype, VolumeShape};

use crate::config::AugmentConfig;
use crate::error::AugmentError;

/// A random affine augmentation.
///
/// Each call draws one transform from the configured ranges and resamples the
/// given volumes with it. With probability `1 - probability` the call skips
/// the transform and returns copies of the inputs.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use voxwarp::{AugmentConfig, RandomAffine};
/// use voxwarp::affine::ParameterRanges3d;
/// use voxwarp::volume::Volume;
///
/// let config = AugmentConfig {
///     ranges: ParameterRanges3d::symmetric(2.0, 0.1, 0.05, 0.0),
///     ..Default::default()
/// };
/// let augment = RandomAffine::new(config).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let volume = Volume::<f32>::zeros([8, 8, 8].into());
/// let out = augment.apply(&mut rng, &volume).unwrap();
///
/// assert_eq!(out.shape(), volume.shape());
/// ```
#[derive(Clone, Debug)]
pub struct RandomAffine {
    config: AugmentConfig,
    strategy: ExecutionStrategy,
}

impl RandomAffine {
    /// Create the augmentation from a validated configuration.
    ///
    /// # Errors
    ///
    /// If the ranges or the probability are invalid.
    pub fn new(config: AugmentConfig) -> Result<Self, AugmentError> {
        config.validate()?;
        Ok(Self {
            config,
            strategy: ExecutionStrategy::default(),
        })
    }

    /// Run the resampling with the given execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The configuration of the augmentation.
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Draw the transform of one call, `None` when the call is skipped.
    pub fn sample_matrix<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<AffineMatrix3d>, AugmentError> {
        if !rng.random_bool(self.config.probability) {
            log::debug!(
                "random affine skipped (probability={})",
                self.config.probability
            );
            return Ok(None);
        }

        let sampled = sample_random_affine_3d(&self.config.ranges, false, rng)?;
        Ok(Some(sampled.into_matrix()))
    }

    /// Augment a single volume.
    pub fn apply<T: VolumeDtype, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        volume: &Volume<T>,
    ) -> Result<Volume<T>, AugmentError> {
        match self.sample_matrix(rng)? {
            Some(m) => self.resample(volume, &m, self.config.interpolation),
            None => Ok(volume.clone()),
        }
    }

    /// Augment a group of volumes with one shared transform.
    ///
    /// Volumes that show the same scene, such as co-registered scans of one
    /// subject, stay aligned after the augmentation.
    ///
    /// # Errors
    ///
    /// * [`AugmentError::EmptyGroup`] if `volumes` is empty.
    /// * [`AugmentError::GroupShapeMismatch`] if the volumes differ in shape.
    pub fn apply_group<T: VolumeDtype, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        volumes: &[Volume<T>],
    ) -> Result<Vec<Volume<T>>, AugmentError> {
        let first = volumes.first().ok_or(AugmentError::EmptyGroup)?;
        for volume in volumes.iter().skip(1) {
            check_same_shape(first.shape(), volume.shape())?;
        }

        match self.sample_matrix(rng)? {
            Some(m) => volumes
                .iter()
                .map(|v| self.resample(v, &m, self.config.interpolation))
                .collect(),
            None => Ok(volumes.to_vec()),
        }
    }

    /// Augment an intensity volume and its label map with one shared transform.
    ///
    /// The intensities use the configured interpolation. Labels always use
    /// nearest neighbor so that no new label values appear.
    ///
    /// # Errors
    ///
    /// [`AugmentError::GroupShapeMismatch`] if the two volumes differ in shape.
    pub fn apply_with_labels<T, L, R>(
        &self,
        rng: &mut R,
        image: &Volume<T>,
        labels: &Volume<L>,
    ) -> Result<(Volume<T>, Volume<L>), AugmentError>
    where
        T: VolumeDtype,
        L: VolumeDtype,
        R: Rng + ?Sized,
    {
        check_same_shape(image.shape(), labels.shape())?;

        match self.sample_matrix(rng)? {
            Some(m) => Ok((
                self.resample(image, &m, self.config.interpolation)?,
                self.resample(labels, &m, InterpolationMode::Nearest)?,
            )),
            None => Ok((image.clone(), labels.clone())),
        }
    }

    fn resample<T: VolumeDtype>(
        &self,
        volume: &Volume<T>,
        m: &AffineMatrix3d,
        interpolation: InterpolationMode,
    ) -> Result<Volume<T>, AugmentError> {
        Ok(apply_affine_with_strategy(
            volume,
            m,
            interpolation,
            self.config.border_mode,
            self.strategy,
        )?)
    }
}

fn check_same_shape(expected: VolumeShape, actual: VolumeShape) -> Result<(), AugmentError> {
    if expected != actual {
        return Err(AugmentError::GroupShapeMismatch { expected, actual });
    }
    Ok(())
}
