use std::path::PathBuf;
use thiserror::Error;

pub type VideoResult<T> = Result<T, VideoError>;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("{0} not found in PATH")]
    ToolNotFound(String),

    #[error("input video not found: {0}")]
    FileNotFound(PathBuf),

    #[error("ffprobe failed on {path}: {stderr}")]
    ProbeFailed { path: PathBuf, stderr: String },

    #[error("ffmpeg exited with {status}: {stderr}")]
    DecodeFailed { status: String, stderr: String },

    #[error("invalid video file: {0}")]
    InvalidVideo(String),

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
