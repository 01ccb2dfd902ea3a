//! auron-video: turns a video file into a directory of still frames.
//!
//! Frame rate comes from `ffprobe`; frames are written by `ffmpeg` as
//! sequentially numbered JPEG files that the crop pipeline consumes and
//! deletes one by one.

pub mod error;
pub mod extract;
pub mod frames;
pub mod probe;

pub use error::{VideoError, VideoResult};
pub use extract::{ExtractSummary, FrameExtractor};
pub use frames::{list_frames, FRAME_PREFIX};
pub use probe::probe_frame_rate;
