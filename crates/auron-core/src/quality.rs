//! Per-candidate decision: keep a face crop or skip it, and why.

use crate::region::RegionAdjuster;
use crate::sharpness;
use crate::types::{CropRect, FaceBox};
use image::RgbImage;

/// Outcome for one detected face.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Write `crop`, the in-frame part of the adjusted `region`.
    Accepted {
        region: FaceBox,
        crop: CropRect,
        sharpness: f64,
    },
    /// Detected box not taller than the minimum face size.
    TooSmall { height: i32 },
    /// Detected region scored below the sharpness threshold.
    Blurry { sharpness: f64 },
    /// Adjusted region does not overlap the frame at all.
    OutOfFrame { region: FaceBox },
    /// The frame had no faces to classify. Recorded once per frame.
    NoDetection,
}

/// Decide what to do with one detected face.
///
/// Sharpness is measured on the region as detected, before any adjustment.
pub fn classify(
    frame: &RgbImage,
    detected: FaceBox,
    adjuster: &RegionAdjuster,
    sharpness_threshold: f64,
) -> Classification {
    if !adjuster.is_eligible(&detected) {
        return Classification::TooSmall {
            height: detected.height(),
        };
    }

    let region = adjuster.adjust(detected);

    let score = detected
        .clip_to(frame.width(), frame.height())
        .map(|rect| sharpness::region_sharpness(frame, rect))
        .unwrap_or(0.0);
    if score < sharpness_threshold {
        return Classification::Blurry { sharpness: score };
    }

    match region.clip_to(frame.width(), frame.height()) {
        Some(crop) => Classification::Accepted {
            region,
            crop,
            sharpness: score,
        },
        None => Classification::OutOfFrame { region },
    }
}
