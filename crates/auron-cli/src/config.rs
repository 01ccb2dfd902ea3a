use std::path::PathBuf;

/// Runtime environment settings, loaded from `AURON_*` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory containing the SCRFD ONNX model.
    pub model_dir: PathBuf,
    /// ffmpeg binary name or path.
    pub ffmpeg: String,
    /// ffprobe binary name or path.
    pub ffprobe: String,
    /// ONNX Runtime intra-op threads for the detector.
    pub detector_threads: usize,
}

impl Config {
    /// Load configuration from the process environment with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            model_dir: var("AURON_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(auron_core::default_model_dir),
            ffmpeg: var("AURON_FFMPEG").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe: var("AURON_FFPROBE").unwrap_or_else(|| "ffprobe".to_string()),
            detector_threads: var("AURON_DETECTOR_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(2),
        }
    }

    /// Path to the SCRFD detection model.
    pub fn scrfd_model_path(&self) -> PathBuf {
        self.model_dir.join(auron_core::SCRFD_MODEL_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.ffmpeg, "ffmpeg");
        assert_eq!(config.ffprobe, "ffprobe");
        assert_eq!(config.detector_threads, 2);
        assert!(config.scrfd_model_path().ends_with("auron/models/det_10g.onnx"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("AURON_MODEL_DIR", "/opt/models"),
            ("AURON_FFMPEG", "/usr/local/bin/ffmpeg"),
            ("AURON_FFPROBE", "/usr/local/bin/ffprobe"),
            ("AURON_DETECTOR_THREADS", "8"),
        ]));
        assert_eq!(config.scrfd_model_path(), PathBuf::from("/opt/models/det_10g.onnx"));
        assert_eq!(config.ffmpeg, "/usr/local/bin/ffmpeg");
        assert_eq!(config.ffprobe, "/usr/local/bin/ffprobe");
        assert_eq!(config.detector_threads, 8);
    }

    #[test]
    fn test_invalid_threads_fall_back() {
        let config = Config::from_lookup(lookup(&[("AURON_DETECTOR_THREADS", "lots")]));
        assert_eq!(config.detector_threads, 2);
        let config = Config::from_lookup(lookup(&[("AURON_DETECTOR_THREADS", "0")]));
        assert_eq!(config.detector_threads, 2);
    }
}
