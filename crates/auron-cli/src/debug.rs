//! Debug overlay: accepted regions marked on a copy of each frame.

use auron_core::FaceBox;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::io::BufRead;
use std::path::{Path, PathBuf};

const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const MARKER_THICKNESS: i32 = 2;

/// Outline `region` on `canvas`. Parts outside the canvas are not drawn.
pub fn mark_region(canvas: &mut RgbImage, region: FaceBox) {
    // Edges further out than the marker thickness are off-canvas anyway.
    let x_max = canvas.width() as i32 + MARKER_THICKNESS;
    let y_max = canvas.height() as i32 + MARKER_THICKNESS;
    let region = FaceBox::new(
        region.top.clamp(-MARKER_THICKNESS, y_max),
        region.right.clamp(-MARKER_THICKNESS, x_max),
        region.bottom.clamp(-MARKER_THICKNESS, y_max),
        region.left.clamp(-MARKER_THICKNESS, x_max),
    );

    for inset in 0..MARKER_THICKNESS {
        let width = region.width() - 2 * inset;
        let height = region.height() - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(region.left + inset, region.top + inset)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, MARKER_COLOR);
    }
}

/// Where annotated frames go, and whether to wait after each one.
pub struct DebugOverlay {
    dir: PathBuf,
    pause: bool,
}

impl DebugOverlay {
    /// Annotated frames are saved under `<output_dir>/debug/`.
    pub fn new(output_dir: &Path, pause: bool) -> Self {
        Self {
            dir: output_dir.join("debug"),
            pause,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save the annotated frame and optionally wait for Enter.
    ///
    /// Failures are logged and never abort the run.
    pub fn present(&self, canvas: &RgbImage, frame_name: &str) {
        let path = self.dir.join(frame_name);
        let saved = std::fs::create_dir_all(&self.dir)
            .map_err(image::ImageError::from)
            .and_then(|_| canvas.save(&path));

        match saved {
            Ok(()) => tracing::info!(path = %path.display(), "annotated frame saved"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not save annotated frame"),
        }

        if self.pause {
            eprintln!("{frame_name}: press Enter to continue");
            let mut line = String::new();
            if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
                tracing::warn!(error = %e, "could not read acknowledgment; continuing");
            }
        }
    }
}
