use serde::{Deserialize, Serialize};

/// Raw detector output in the coordinate space of the image it ran on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// Face rectangle in pixel coordinates, stored as (top, right, bottom, left).
///
/// Coordinates are signed: once adjusted, a box may extend past the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl FaceBox {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: i32) -> Self {
        Self {
            top: self.top.saturating_mul(factor),
            right: self.right.saturating_mul(factor),
            bottom: self.bottom.saturating_mul(factor),
            left: self.left.saturating_mul(factor),
        }
    }

    /// Intersect with a `width` × `height` frame.
    ///
    /// Returns `None` when nothing of the box lies inside the frame.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<CropRect> {
        let x0 = self.left.max(0) as i64;
        let y0 = self.top.max(0) as i64;
        let x1 = (self.right as i64).min(width as i64);
        let y1 = (self.bottom as i64).min(height as i64);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(CropRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// In-bounds pixel rectangle ready to be cut out of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let b = FaceBox::new(10, 90, 60, 30);
        assert_eq!(b.height(), 50);
        assert_eq!(b.width(), 60);
    }

    #[test]
    fn test_scaled_by_four() {
        let b = FaceBox::new(10, 90, 60, 30).scaled(4);
        assert_eq!(b, FaceBox::new(40, 360, 240, 120));
    }

    #[test]
    fn test_clip_inside() {
        let b = FaceBox::new(10, 90, 60, 30);
        let rect = b.clip_to(100, 100).unwrap();
        assert_eq!(
            rect,
            CropRect { x: 30, y: 10, width: 60, height: 50 }
        );
    }

    #[test]
    fn test_clip_negative_origin() {
        let b = FaceBox::new(-10, 510, 510, -10);
        let rect = b.clip_to(640, 360).unwrap();
        assert_eq!(
            rect,
            CropRect { x: 0, y: 0, width: 510, height: 360 }
        );
    }

    #[test]
    fn test_clip_outside() {
        let b = FaceBox::new(400, 900, 900, 400);
        assert!(b.clip_to(320, 240).is_none());
    }
}
