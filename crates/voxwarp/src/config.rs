use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use voxwarp_affine::ParameterRanges3d;
use voxwarp_resample::interpolation::{BorderMode, InterpolationMode};

use crate::error::AugmentError;

fn default_probability() -> f64 {
    1.0
}

/// Settings of a random affine augmentation.
///
/// Every field is optional in JSON; missing fields take their defaults, which
/// describe an identity augmentation that always runs.
///
/// ```json
/// {
///   "ranges": { "translation": [[-4, 4], [-4, 4], [0, 0]] },
///   "interpolation": "linear",
///   "probability": 0.5,
///   "seed": 7
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Sampling ranges of the transform parameters.
    pub ranges: ParameterRanges3d,
    /// Interpolation used to resample the volumes.
    pub interpolation: InterpolationMode,
    /// Policy for samples outside the volume.
    pub border_mode: BorderMode,
    /// Chance that a call applies the augmentation at all.
    #[serde(default = "default_probability")]
    pub probability: f64,
    /// Seed for a reproducible random generator.
    pub seed: Option<u64>,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            ranges: ParameterRanges3d::default(),
            interpolation: InterpolationMode::default(),
            border_mode: BorderMode::default(),
            probability: default_probability(),
            seed: None,
        }
    }
}

impl AugmentConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, AugmentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AugmentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the ranges and the probability.
    ///
    /// # Errors
    ///
    /// [`AugmentError::Affine`] for invalid ranges and
    /// [`AugmentError::InvalidProbability`] if the probability is not in `[0, 1]`.
    pub fn validate(&self) -> Result<(), AugmentError> {
        self.ranges.validate()?;
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(AugmentError::InvalidProbability(self.probability));
        }
        Ok(())
    }

    /// A random generator seeded from `seed`, or from the OS when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_json_gives_defaults() -> Result<(), AugmentError> {
        let config = AugmentConfig::from_json("{}")?;
        assert_eq!(config, AugmentConfig::default());
        assert_eq!(config.probability, 1.0);
        assert_eq!(config.seed, None);
        Ok(())
    }

    #[test]
    fn parse_full_config() -> Result<(), AugmentError> {
        let config = AugmentConfig::from_json(
            r#"{
                "ranges": { "rotation": [[-0.1, 0.1], [0, 0], [0, 0]] },
                "interpolation": "linear",
                "border_mode": "zero",
                "probability": 0.25,
                "seed": 3
            }"#,
        )?;
        assert_eq!(config.interpolation, InterpolationMode::Linear);
        assert_eq!(config.ranges.rotation[0], [-0.1, 0.1]);
        assert_eq!(config.ranges.scale, ParameterRanges3d::default().scale);
        assert_eq!(config.probability, 0.25);
        assert_eq!(config.seed, Some(3));
        Ok(())
    }

    #[test]
    fn reject_unknown_interpolation() {
        let res = AugmentConfig::from_json(r#"{ "interpolation": "cubic" }"#);
        assert!(matches!(res, Err(AugmentError::Config(_))));
    }

    #[test]
    fn reject_bad_probability() {
        let res = AugmentConfig::from_json(r#"{ "probability": 1.5 }"#);
        assert!(matches!(res, Err(AugmentError::InvalidProbability(p)) if p == 1.5));
    }

    #[test]
    fn reject_bad_ranges() {
        let res = AugmentConfig::from_json(r#"{ "ranges": { "scale": [[0, 1], [1, 1], [1, 1]] } }"#);
        assert!(matches!(res, Err(AugmentError::Affine(_))));
    }

    #[test]
    fn read_config_file() -> Result<(), AugmentError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "seed": 11, "probability": 0.0 }}"#)?;

        let config = AugmentConfig::from_file(file.path())?;
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.probability, 0.0);
        Ok(())
    }

    #[test]
    fn missing_config_file() {
        let res = AugmentConfig::from_file("/nonexistent/voxwarp.json");
        assert!(matches!(res, Err(AugmentError::Io(_))));
    }
}
