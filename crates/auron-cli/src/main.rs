use anyhow::{Context, Result};
use auron_core::{FaceDetector, Tuning};
use auron_video::FrameExtractor;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod debug;
mod pipeline;
mod writer;

use config::Config;
use debug::DebugOverlay;
use pipeline::{CropOptions, Pipeline};

const DEFAULT_LOG_FILTER: &str = "auron=info,auron_core=info,auron_video=info,ort=warn";
/// Largest accepted `--increase`, in pixels, either direction.
const MAX_MARGIN: i64 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "auron", about = "Extract face crops from every frame of a video")]
struct Cli {
    /// Input video path
    #[arg(short = 'v', long)]
    video: PathBuf,

    /// Output directory for intermediate frames and face crops
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Mark accepted faces and save annotated frames under <output>/debug
    #[arg(short, long)]
    debug: bool,

    /// Wait for Enter after each annotated frame
    #[arg(long, requires = "debug")]
    pause: bool,

    /// Recenter each face on a fixed-size square
    #[arg(short, long)]
    fixed_size: bool,

    /// Grow each face region by this many pixels and square it on its height
    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i32).range(-MAX_MARGIN..=MAX_MARGIN)
    )]
    increase: Option<i32>,

    /// TOML file overriding face sizes, sharpness threshold and downscale factor
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn crop_options(&self) -> CropOptions {
        CropOptions {
            fixed_size: self.fixed_size,
            // A zero margin means no expansion at all, not a squared box.
            margin: self.increase.filter(|&m| m != 0),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let tuning = match &cli.config {
        Some(path) => Tuning::load(path).context("loading tuning file")?,
        None => Tuning::default(),
    };
    tracing::debug!(?config, ?tuning, "configuration loaded");

    let model_path = config.scrfd_model_path();
    let detector = FaceDetector::load(&model_path, config.detector_threads)
        .with_context(|| format!("loading face detector from {}", model_path.display()))?;

    let extractor = FrameExtractor::new(&config.ffmpeg, &config.ffprobe);
    let extracted = extractor
        .extract(&cli.video, &cli.output)
        .with_context(|| format!("extracting frames from {}", cli.video.display()))?;

    let frames = extracted.frames;
    tracing::info!(fps = extracted.fps, frames = frames.len(), "processing frames");

    let progress = if cli.debug {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(frames.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} frames [{elapsed_precise}]")?
                .progress_chars("##-"),
        );
        bar
    };

    let overlay = cli.debug.then(|| DebugOverlay::new(&cli.output, cli.pause));
    if let Some(overlay) = &overlay {
        tracing::info!(dir = %overlay.dir().display(), pause = cli.pause, "debug overlay enabled");
    }
    let mut pipeline = Pipeline::new(detector, &tuning, cli.crop_options(), &cli.output, overlay);
    let summary = pipeline.run(&frames, &progress)?;

    tracing::info!(
        frames = summary.frames,
        crops = pipeline.crops_written(),
        no_faces = summary.frames_without_faces,
        too_small = summary.too_small,
        blurry = summary.blurry,
        out_of_frame = summary.out_of_frame,
        output = %cli.output.display(),
        "done"
    );

    Ok(())
}
