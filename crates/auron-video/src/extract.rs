//! Frame extraction with ffmpeg.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{VideoError, VideoResult};
use crate::frames::{frame_pattern, list_frames};
use crate::probe::probe_frame_rate;

/// JPEG quality scale passed to ffmpeg (`-qscale:v`, 2 = near best).
const JPEG_QSCALE: &str = "2";

/// What an extraction run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSummary {
    pub fps: f64,
    /// Extracted frame files in sequence order.
    pub frames: Vec<PathBuf>,
}

/// Splits a video into one JPEG per frame using external ffmpeg/ffprobe binaries.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    ffmpeg: String,
    ffprobe: String,
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl FrameExtractor {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Write every frame of `video` into `out_dir` as `imagename%05d.jpg`.
    ///
    /// Creates `out_dir` if needed. The run blocks until ffmpeg exits.
    pub fn extract(&self, video: &Path, out_dir: &Path) -> VideoResult<ExtractSummary> {
        ensure_dir(out_dir)?;

        let fps = probe_frame_rate(&self.ffprobe, video)?;

        which::which(&self.ffmpeg).map_err(|_| VideoError::ToolNotFound(self.ffmpeg.clone()))?;

        tracing::info!(
            video = %video.display(),
            out_dir = %out_dir.display(),
            fps,
            "extracting frames"
        );

        let output = Command::new(&self.ffmpeg)
            .args(decode_args(video, fps, out_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(VideoError::DecodeFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let frames = list_frames(out_dir)?;
        tracing::info!(frames = frames.len(), "frame extraction finished");

        Ok(ExtractSummary { fps, frames })
    }
}

/// Create `dir` and its parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> VideoResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| VideoError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn decode_args(video: &Path, fps: f64, out_dir: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(video.as_os_str().to_owned());
    args.push("-vf".into());
    args.push(format!("fps={fps}").into());
    args.push("-qscale:v".into());
    args.push(JPEG_QSCALE.into());
    args.push(frame_pattern(out_dir).into_os_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_args() {
        let args = decode_args(Path::new("in.mp4"), 29.97, Path::new("out"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-hide_banner",
                "-loglevel",
                "error",
                "-y",
                "-i",
                "in.mp4",
                "-vf",
                "fps=29.97",
                "-qscale:v",
                "2",
                "out/imagename%05d.jpg",
            ]
        );
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("b");
        ensure_dir(&dir).unwrap();
        std::fs::write(dir.join("auron_1.jpg"), b"x").unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.join("auron_1.jpg").exists());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("taken");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(ensure_dir(&file), Err(VideoError::OutputDir { .. })));
    }

    #[test]
    fn test_extract_missing_video() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("output");
        let result = FrameExtractor::default().extract(Path::new("/nonexistent/in.mp4"), &out);
        assert!(matches!(result, Err(VideoError::FileNotFound(_))));
        assert!(out.is_dir());
    }

    #[test]
    fn test_extract_missing_ffprobe() {
        let root = tempfile::tempdir().unwrap();
        let video = root.path().join("in.mp4");
        std::fs::write(&video, b"not a video").unwrap();
        let extractor = FrameExtractor::new("ffmpeg", "auron-no-such-ffprobe");
        let result = extractor.extract(&video, &root.path().join("output"));
        assert!(matches!(result, Err(VideoError::ToolNotFound(_))));
    }

    #[cfg(unix)]
    mod failing_tools {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::sync::Mutex;

        // Writing a script while another test forks can leave it busy at exec.
        static SCRIPTS: Mutex<()> = Mutex::new(());

        const PROBE_OK: &str = r#"echo '{"streams":[{"codec_type":"video","avg_frame_rate":"25/1"}]}'"#;

        fn script(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        fn video(dir: &Path) -> PathBuf {
            let path = dir.join("in.mp4");
            std::fs::write(&path, b"not a video").unwrap();
            path
        }

        #[test]
        fn test_decoder_failure_aborts_with_stderr() {
            let _guard = SCRIPTS.lock().unwrap_or_else(|e| e.into_inner());
            let root = tempfile::tempdir().unwrap();
            let ffprobe = script(root.path(), "ffprobe", PROBE_OK);
            let ffmpeg = script(root.path(), "ffmpeg", "echo boom >&2; exit 1");
            let out = root.path().join("output");

            let result = FrameExtractor::new(ffmpeg, ffprobe).extract(&video(root.path()), &out);
            match result {
                Err(VideoError::DecodeFailed { stderr, .. }) => assert_eq!(stderr, "boom"),
                other => panic!("expected DecodeFailed, got {other:?}"),
            }
            assert!(list_frames(&out).unwrap().is_empty());
        }

        #[test]
        fn test_ffprobe_failure_aborts_with_stderr() {
            let _guard = SCRIPTS.lock().unwrap_or_else(|e| e.into_inner());
            let root = tempfile::tempdir().unwrap();
            let ffprobe = script(root.path(), "ffprobe", "echo 'moov atom not found' >&2; exit 1");
            let ffmpeg = script(root.path(), "ffmpeg", "exit 0");
            let input = video(root.path());

            let result = FrameExtractor::new(ffmpeg, ffprobe).extract(&input, &root.path().join("output"));
            match result {
                Err(VideoError::ProbeFailed { path, stderr }) => {
                    assert_eq!(path, input);
                    assert_eq!(stderr, "moov atom not found");
                }
                other => panic!("expected ProbeFailed, got {other:?}"),
            }
        }

        #[test]
        fn test_successful_run_lists_frames_in_order() {
            let _guard = SCRIPTS.lock().unwrap_or_else(|e| e.into_inner());
            let root = tempfile::tempdir().unwrap();
            let ffprobe = script(root.path(), "ffprobe", PROBE_OK);
            // The output pattern is the last argument; stand in for the encoder.
            let ffmpeg = script(
                root.path(),
                "ffmpeg",
                r#"for last; do :; done; dir=$(dirname "$last"); touch "$dir/imagename00002.jpg" "$dir/imagename00001.jpg""#,
            );
            let out = root.path().join("output");

            let summary = FrameExtractor::new(ffmpeg, ffprobe)
                .extract(&video(root.path()), &out)
                .unwrap();
            assert_eq!(summary.fps, 25.0);
            assert_eq!(
                summary.frames,
                vec![out.join("imagename00001.jpg"), out.join("imagename00002.jpg")]
            );
        }
    }
}
