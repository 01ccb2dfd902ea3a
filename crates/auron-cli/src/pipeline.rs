//! Per-frame crop pipeline: locate faces, classify each, write the keepers,
//! then delete the frame.

use auron_core::{classify, Classification, Detect, DetectorError, FaceLocator, RegionAdjuster, Tuning};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::debug::{self, DebugOverlay};
use crate::writer::CropWriter;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot decode frame {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("detector error: {0}")]
    Detect(#[from] DetectorError),
    #[error("cannot write crop {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("cannot remove frame {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// User-selected crop adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CropOptions {
    pub fixed_size: bool,
    pub margin: Option<i32>,
}

/// What happened to one frame.
#[derive(Debug)]
pub struct FrameReport {
    /// One entry per detected face, or a single `NoDetection`.
    pub outcomes: Vec<Classification>,
    pub written: Vec<PathBuf>,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub frames_without_faces: usize,
    pub accepted: usize,
    pub too_small: usize,
    pub blurry: usize,
    pub out_of_frame: usize,
}

impl RunSummary {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        for outcome in &report.outcomes {
            match outcome {
                Classification::Accepted { .. } => self.accepted += 1,
                Classification::TooSmall { .. } => self.too_small += 1,
                Classification::Blurry { .. } => self.blurry += 1,
                Classification::OutOfFrame { .. } => self.out_of_frame += 1,
                Classification::NoDetection => self.frames_without_faces += 1,
            }
        }
    }
}

pub struct Pipeline<D> {
    locator: FaceLocator<D>,
    adjuster: RegionAdjuster,
    sharpness_threshold: f64,
    writer: CropWriter,
    debug: Option<DebugOverlay>,
}

impl<D: Detect> Pipeline<D> {
    pub fn new(
        detector: D,
        tuning: &Tuning,
        options: CropOptions,
        output_dir: &Path,
        debug: Option<DebugOverlay>,
    ) -> Self {
        Self {
            locator: FaceLocator::new(detector, tuning.downscale_factor),
            adjuster: RegionAdjuster::new(
                tuning.face_size,
                tuning.min_face_size,
                options.fixed_size,
                options.margin,
            ),
            sharpness_threshold: tuning.sharpness_threshold,
            writer: CropWriter::new(output_dir),
            debug,
        }
    }

    /// Process every frame in order, deleting each once handled.
    pub fn run(&mut self, frames: &[PathBuf], progress: &ProgressBar) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();
        for path in frames {
            let report = self.process_frame(path)?;
            tracing::trace!(frame = %path.display(), crops = report.written.len(), "frame done");
            summary.record(&report);
            progress.inc(1);
        }
        progress.finish_and_clear();
        Ok(summary)
    }

    /// Crop the faces of one frame file, then delete it.
    pub fn process_frame(&mut self, path: &Path) -> Result<FrameReport, PipelineError> {
        let frame = image::open(path)
            .map_err(|source| PipelineError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let faces = self.locator.locate(&frame)?;
        let mut canvas = self.debug.as_ref().map(|_| frame.clone());
        let mut outcomes = Vec::with_capacity(faces.len().max(1));
        let mut written = Vec::new();

        if faces.is_empty() {
            tracing::debug!(frame = %path.display(), "no faces detected");
            outcomes.push(Classification::NoDetection);
        }

        for face in faces {
            let outcome = classify(&frame, face, &self.adjuster, self.sharpness_threshold);

            if let Classification::Accepted { region, crop, sharpness } = &outcome {
                let out = self.writer.write(&frame, *crop).map_err(|source| PipelineError::Write {
                    path: self.writer.next_path(),
                    source,
                })?;
                tracing::debug!(path = %out.display(), ?region, sharpness, "crop written");
                written.push(out);

                if let Some(canvas) = canvas.as_mut() {
                    debug::mark_region(canvas, *region);
                    println!("{} {}", region.height(), region.width());
                }
            } else {
                tracing::debug!(frame = %path.display(), ?face, ?outcome, "face skipped");
            }

            outcomes.push(outcome);
        }

        if let (Some(overlay), Some(canvas)) = (&self.debug, &canvas) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame.jpg".to_string());
            overlay.present(canvas, &name);
        }

        std::fs::remove_file(path).map_err(|source| PipelineError::Remove {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(FrameReport { outcomes, written })
    }

    pub fn crops_written(&self) -> u32 {
        self.writer.written()
    }
}
