//! Numeric knobs for the crop pipeline, optionally loaded from TOML.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid tuning file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// Sizes and thresholds used while selecting face crops.
///
/// Every field is optional in TOML; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Edge length of recentered crops, in pixels.
    pub face_size: u32,
    /// Detected faces must be strictly taller than this, in pixels.
    pub min_face_size: u32,
    /// Minimum Laplacian variance of the detected region.
    pub sharpness_threshold: f64,
    /// Frames are shrunk by this factor before detection.
    pub downscale_factor: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            face_size: 500,
            min_face_size: 200,
            sharpness_threshold: 20.0,
            downscale_factor: 4,
        }
    }
}

impl Tuning {
    pub fn from_toml_str(src: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = toml::from_str(src)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let src = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.face_size == 0 {
            return Err(TuningError::Invalid("face_size must be positive".into()));
        }
        if self.downscale_factor == 0 {
            return Err(TuningError::Invalid(
                "downscale_factor must be at least 1".into(),
            ));
        }
        if !self.sharpness_threshold.is_finite() {
            return Err(TuningError::Invalid(
                "sharpness_threshold must be finite".into(),
            ));
        }
        Ok(())
    }
}
