//! Numbered crop output.

use auron_core::CropRect;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ImageResult, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const CROP_PREFIX: &str = "auron_";
const JPEG_QUALITY: u8 = 95;

/// Writes crops as `auron_1.jpg`, `auron_2.jpg`, ... into one directory.
///
/// The counter only advances after a crop has been written successfully.
pub struct CropWriter {
    dir: PathBuf,
    next_index: u32,
}

impl CropWriter {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            next_index: 1,
        }
    }

    /// Number of crops written so far.
    pub fn written(&self) -> u32 {
        self.next_index - 1
    }

    /// Path the next crop will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("{CROP_PREFIX}{}.jpg", self.next_index))
    }

    /// Cut `crop` out of `frame` and write it under the next number.
    pub fn write(&mut self, frame: &RgbImage, crop: CropRect) -> ImageResult<PathBuf> {
        let view = imageops::crop_imm(frame, crop.x, crop.y, crop.width, crop.height).to_image();
        let path = self.next_path();

        let mut out = BufWriter::new(File::create(&path)?);
        JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&view)?;
        out.flush()?;

        self.next_index += 1;
        Ok(path)
    }
}
