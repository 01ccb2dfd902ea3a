//! Crop region adjustment: minimum-size gate, fixed-size recentering and
//! margin expansion.

use crate::types::FaceBox;

/// Turns a detected face box into the region that gets cropped.
#[derive(Debug, Clone)]
pub struct RegionAdjuster {
    /// Target edge length when recentering.
    pub face_size: i32,
    /// Boxes must be strictly taller than this to be considered.
    pub min_face_size: i32,
    /// Recenter every box onto a `face_size` square.
    pub fixed_size: bool,
    /// Pixels added around the box after recentering.
    pub margin: Option<i32>,
}

impl RegionAdjuster {
    pub fn new(face_size: u32, min_face_size: u32, fixed_size: bool, margin: Option<i32>) -> Self {
        Self {
            face_size: face_size as i32,
            min_face_size: min_face_size as i32,
            fixed_size,
            margin,
        }
    }

    /// Whether a detected box is tall enough to be processed.
    pub fn is_eligible(&self, face: &FaceBox) -> bool {
        face.height() > self.min_face_size
    }

    /// Apply the enabled adjustments, recentering first.
    pub fn adjust(&self, face: FaceBox) -> FaceBox {
        let mut region = face;
        if self.fixed_size {
            region = recenter(region, self.face_size);
        }
        if let Some(margin) = self.margin {
            region = expand(region, margin);
        }
        region
    }
}

/// Pad `face` out to a `size` × `size` square around its center.
///
/// When the padded edge would reach 0 or below, the box is pinned to the
/// origin on that axis and spans `0..size`. The far edge is not clamped.
pub fn recenter(face: FaceBox, size: i32) -> FaceBox {
    let pad_y = size.saturating_sub(face.height());
    let pad_x = size.saturating_sub(face.width());

    let (top, bottom) = pin_axis(face.top, pad_y, size);
    let (left, right) = pin_axis(face.left, pad_x, size);

    FaceBox {
        top,
        right,
        bottom,
        left,
    }
}

fn pin_axis(start: i32, pad: i32, size: i32) -> (i32, i32) {
    let shifted = start.saturating_sub(pad.div_euclid(2));
    if shifted <= 0 {
        (0, size)
    } else {
        (shifted, shifted.saturating_add(size))
    }
}

/// Grow `face` by `margin` on top, bottom and left, then square it using the
/// expanded height as the width.
///
/// Coordinates saturate at the `i32` limits instead of wrapping.
pub fn expand(face: FaceBox, margin: i32) -> FaceBox {
    let top = face.top.saturating_sub(margin);
    let bottom = face.bottom.saturating_add(margin);
    let left = face.left.saturating_sub(margin);
    FaceBox {
        top,
        right: left.saturating_add(bottom.saturating_sub(top)),
        bottom,
        left,
    }
}
