//! Naming and discovery of intermediate frame files.

use std::io;
use std::path::{Path, PathBuf};

/// File name prefix of every extracted frame.
pub const FRAME_PREFIX: &str = "imagename";
const FRAME_EXTENSION: &str = "jpg";

/// ffmpeg output pattern for frames in `dir`: `imagename%05d.jpg`.
pub fn frame_pattern(dir: &Path) -> PathBuf {
    dir.join(format!("{FRAME_PREFIX}%05d.{FRAME_EXTENSION}"))
}

/// Sequence number of a frame file name such as `imagename00042.jpg`.
fn frame_number(name: &str) -> Option<u64> {
    let digits = name
        .strip_prefix(FRAME_PREFIX)?
        .strip_suffix(FRAME_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Extracted frames in `dir`, in sequence order.
///
/// Ordering is numeric, so `imagename100000.jpg` follows `imagename99999.jpg`.
/// Other files in the directory, including previously written crops, are
/// ignored.
pub fn list_frames(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(number) = name.to_str().and_then(frame_number) else {
            continue;
        };
        frames.push((number, entry.path()));
    }
    frames.sort();
    Ok(frames.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_pattern() {
        let p = frame_pattern(Path::new("./output"));
        assert_eq!(p, PathBuf::from("./output/imagename%05d.jpg"));
    }

    #[test]
    fn test_frame_number() {
        assert_eq!(frame_number("imagename00001.jpg"), Some(1));
        assert_eq!(frame_number("imagename123456.jpg"), Some(123_456));
        assert_eq!(frame_number("auron_1.jpg"), None);
        assert_eq!(frame_number("imagename.jpg"), None);
        assert_eq!(frame_number("imagename0001a.jpg"), None);
        assert_eq!(frame_number("imagename+0001.jpg"), None);
        assert_eq!(frame_number("imagename00001.png"), None);
        assert_eq!(frame_number("imagename00001jpg"), None);
    }

    #[test]
    fn test_list_frames_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "imagename00003.jpg",
            "auron_1.jpg",
            "imagename00001.jpg",
            "notes.txt",
            "imagename00002.jpg",
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("imagename00004.jpg")).unwrap();

        let frames = list_frames(dir.path()).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["imagename00001.jpg", "imagename00002.jpg", "imagename00003.jpg"]
        );
    }

    #[test]
    fn test_list_frames_past_five_digits() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "imagename100000.jpg",
            "imagename10001.jpg",
            "imagename99999.jpg",
            "imagename100001.jpg",
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let frames = list_frames(dir.path()).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "imagename10001.jpg",
                "imagename99999.jpg",
                "imagename100000.jpg",
                "imagename100001.jpg",
            ]
        );
    }

    #[test]
    fn test_list_frames_missing_dir() {
        assert!(list_frames(Path::new("/nonexistent/frames")).is_err());
    }
}
