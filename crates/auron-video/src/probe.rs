//! Frame-rate probing with ffprobe.

use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{VideoError, VideoResult};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
}

/// Frames per second of the first video stream in `path`.
pub fn probe_frame_rate(ffprobe: &str, path: &Path) -> VideoResult<f64> {
    if !path.is_file() {
        return Err(VideoError::FileNotFound(path.to_path_buf()));
    }

    which::which(ffprobe).map_err(|_| VideoError::ToolNotFound(ffprobe.to_string()))?;

    let output = Command::new(ffprobe)
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !output.status.success() {
        return Err(VideoError::ProbeFailed {
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let fps = frame_rate_from_json(&output.stdout)?;
    tracing::debug!(path = %path.display(), fps, "probed frame rate");
    Ok(fps)
}

/// Extract the frame rate from ffprobe's `-show_streams` JSON.
///
/// Prefers `avg_frame_rate`, falling back to `r_frame_rate`.
fn frame_rate_from_json(json: &[u8]) -> VideoResult<f64> {
    let probe: FfprobeOutput = serde_json::from_slice(json)?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| VideoError::InvalidVideo("no video stream found".to_string()))?;

    stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .ok_or_else(|| VideoError::InvalidVideo("video stream has no usable frame rate".to_string()))
}

/// Parse a frame rate string such as "30/1", "30000/1001" or "29.97".
///
/// Zero, negative and non-finite rates are rejected.
fn parse_frame_rate(s: &str) -> Option<f64> {
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.trim().parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_rejects_degenerate() {
        assert!(parse_frame_rate("0/0").is_none());
        assert!(parse_frame_rate("0/1").is_none());
        assert!(parse_frame_rate("abc").is_none());
        assert!(parse_frame_rate("").is_none());
    }

    #[test]
    fn test_frame_rate_from_json_skips_audio() {
        let json = br#"{"streams": [
            {"codec_type": "audio", "avg_frame_rate": "0/0", "r_frame_rate": "0/0"},
            {"codec_type": "video", "avg_frame_rate": "25/1", "r_frame_rate": "50/1"}
        ]}"#;
        assert!((frame_rate_from_json(json).unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_rate_from_json_falls_back_to_r_frame_rate() {
        let json = br#"{"streams": [
            {"codec_type": "video", "avg_frame_rate": "0/0", "r_frame_rate": "24000/1001"}
        ]}"#;
        assert!((frame_rate_from_json(json).unwrap() - 23.976).abs() < 0.001);
    }

    #[test]
    fn test_frame_rate_from_json_no_video() {
        let json = br#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            frame_rate_from_json(json),
            Err(VideoError::InvalidVideo(_))
        ));
        assert!(matches!(
            frame_rate_from_json(b"{}"),
            Err(VideoError::InvalidVideo(_))
        ));
    }

    #[test]
    fn test_probe_missing_input() {
        let result = probe_frame_rate("ffprobe", Path::new("/nonexistent/clip.mp4"));
        assert!(matches!(result, Err(VideoError::FileNotFound(_))));
    }
}
