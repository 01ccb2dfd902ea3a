//! auron-core: face location and crop selection for video frames.
//!
//! Uses SCRFD for face detection via ONNX Runtime, then adjusts each
//! detected region and scores it for sharpness before it is written out.

pub mod detector;
pub mod locator;
pub mod quality;
pub mod region;
pub mod sharpness;
pub mod tuning;
pub mod types;

pub use detector::{Detect, DetectorError, FaceDetector};
pub use locator::FaceLocator;
pub use quality::{classify, Classification};
pub use region::RegionAdjuster;
pub use tuning::{Tuning, TuningError};
pub use types::{CropRect, Detection, FaceBox};

use std::path::PathBuf;

/// File name of the SCRFD detection model inside the model directory.
pub const SCRFD_MODEL_FILE: &str = "det_10g.onnx";

/// Default model directory: `$XDG_DATA_HOME/auron/models`, falling back to
/// `~/.local/share/auron/models`.
pub fn default_model_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local/share")
        })
        .join("auron")
        .join("models")
}
