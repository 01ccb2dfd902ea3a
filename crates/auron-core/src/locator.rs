//! Face location on full-resolution frames.
//!
//! Detection runs on a downscaled copy of the frame; boxes are trimmed to
//! the downscaled bounds, rounded to whole pixels and scaled back up.

use crate::detector::{Detect, DetectorError};
use crate::types::{Detection, FaceBox};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Runs a detector on downscaled frames and maps boxes back to frame space.
pub struct FaceLocator<D> {
    detector: D,
    factor: u32,
}

impl<D: Detect> FaceLocator<D> {
    /// `factor` is the integer shrink applied before detection (4 = quarter size).
    pub fn new(detector: D, factor: u32) -> Self {
        Self {
            detector,
            factor: factor.max(1),
        }
    }

    /// Locate faces in `frame`, in detector order, as full-frame boxes.
    pub fn locate(&mut self, frame: &RgbImage) -> Result<Vec<FaceBox>, DetectorError> {
        let (small_w, small_h) = downscaled_size(frame.width(), frame.height(), self.factor);
        if small_w == 0 || small_h == 0 {
            return Ok(Vec::new());
        }

        let small = imageops::resize(frame, small_w, small_h, FilterType::Triangle);
        let detections = self.detector.detect(&small)?;

        let boxes: Vec<FaceBox> = detections
            .iter()
            .filter_map(|d| trim_to_bounds(d, small_w, small_h))
            .map(|b| b.scaled(self.factor as i32))
            .collect();

        tracing::trace!(
            detections = detections.len(),
            kept = boxes.len(),
            "located faces"
        );

        Ok(boxes)
    }
}

/// Size of a frame shrunk by `factor`, rounded to the nearest pixel.
fn downscaled_size(width: u32, height: u32, factor: u32) -> (u32, u32) {
    let shrink = |v: u32| (v as f64 / factor as f64).round() as u32;
    (shrink(width), shrink(height))
}

/// Round a detection to whole pixels and trim it to a `width` × `height` image.
///
/// Returns `None` when the trimmed box has no area.
fn trim_to_bounds(det: &Detection, width: u32, height: u32) -> Option<FaceBox> {
    let top = (det.y.round() as i32).max(0);
    let left = (det.x.round() as i32).max(0);
    let bottom = ((det.y + det.height).round() as i32).min(height as i32);
    let right = ((det.x + det.width).round() as i32).min(width as i32);

    if bottom <= top || right <= left {
        return None;
    }
    Some(FaceBox::new(top, right, bottom, left))
}
