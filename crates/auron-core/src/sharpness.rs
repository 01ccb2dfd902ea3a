//! Sharpness scoring: grayscale conversion and variance of the Laplacian.

use crate::types::CropRect;
use image::RgbImage;

/// Convert a region of an RGB image to 8-bit luma (ITU-R BT.601 weights).
pub fn grayscale_region(image: &RgbImage, rect: CropRect) -> Vec<u8> {
    let mut gray = Vec::with_capacity((rect.width * rect.height) as usize);
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            let [r, g, b] = image.get_pixel(x, y).0;
            let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            gray.push(luma.round().clamp(0.0, 255.0) as u8);
        }
    }
    gray
}

/// Variance of the 4-neighbour Laplacian over a grayscale buffer.
///
/// Borders are reflected without repeating the edge pixel
/// (`dcb|abcd|cba`). Low values mean little edge energy, i.e. blur.
pub fn laplacian_variance(gray: &[u8], width: u32, height: u32) -> f64 {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 || gray.len() < w * h {
        return 0.0;
    }

    let at = |x: isize, y: isize| -> f64 {
        let xi = reflect(x, w);
        let yi = reflect(y, h);
        gray[yi * w + xi] as f64
    };

    let n = (w * h) as f64;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;

    for y in 0..h as isize {
        for x in 0..w as isize {
            let lap = at(x, y - 1) + at(x - 1, y) + at(x + 1, y) + at(x, y + 1) - 4.0 * at(x, y);
            sum += lap;
            sum_sq += lap * lap;
        }
    }

    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

/// Sharpness of `rect` within `image`.
pub fn region_sharpness(image: &RgbImage, rect: CropRect) -> f64 {
    let gray = grayscale_region(image, rect);
    laplacian_variance(&gray, rect.width, rect.height)
}

fn reflect(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    if i < 0 {
        i = -i;
    }
    if i > last {
        i = 2 * last - i;
    }
    i.clamp(0, last) as usize
}
