//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Format normalization (ffmpeg) settings.
    #[serde(default)]
    pub normalizer: NormalizerSettings,

    /// Keypoint detector settings.
    #[serde(default)]
    pub detector: DetectorSettings,

    /// Classifier evidence policy.
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

/// Path configuration for per-run scratch space and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder under which each run creates its own workspace.
    #[serde(default = "default_temp_root")]
    pub temp_root: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_temp_root() -> String {
    ".temp".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            temp_root: default_temp_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write a daily-rolling log file into `paths.logs_folder`.
    #[serde(default)]
    pub write_file: bool,

    /// Include module targets in log lines.
    #[serde(default = "default_true")]
    pub show_target: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            write_file: false,
            show_target: true,
        }
    }
}

/// Format normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerSettings {
    /// ffmpeg executable (name on PATH or absolute path).
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Output frame rate of the canonical video.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,

    /// Intra-frame codec passed to `-vcodec`.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Quality passed to `-q:v` (0 = best).
    #[serde(default)]
    pub quality: u32,

    /// Container extension of the canonical video.
    #[serde(default = "default_container")]
    pub container: String,

    /// Frame rate assumed for the original upload when conversion fails.
    #[serde(default = "default_assumed_fps")]
    pub assumed_fps: f64,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_target_fps() -> u32 {
    30
}

fn default_video_codec() -> String {
    "mjpeg".to_string()
}

fn default_container() -> String {
    "avi".to_string()
}

fn default_assumed_fps() -> f64 {
    30.0
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            target_fps: default_target_fps(),
            video_codec: default_video_codec(),
            quality: 0,
            container: default_container(),
            assumed_fps: default_assumed_fps(),
        }
    }
}

/// Keypoint detector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Allow the real detector. When false the stand-in is always used.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OpenPose demo executable.
    #[serde(default = "default_openpose_path")]
    pub openpose_path: String,

    /// OpenPose `--model_folder`.
    #[serde(default)]
    pub model_folder: Option<String>,

    /// OpenPose `--net_resolution` (e.g. `-1x368`).
    #[serde(default)]
    pub net_resolution: Option<String>,

    /// Number of frames produced by the stand-in backend.
    #[serde(default = "default_standin_frames")]
    pub standin_frames: u32,
}

fn default_openpose_path() -> String {
    "openpose/bin/OpenPoseDemo".to_string()
}

fn default_standin_frames() -> u32 {
    90
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            openpose_path: default_openpose_path(),
            model_folder: None,
            net_resolution: None,
            standin_frames: default_standin_frames(),
        }
    }
}

/// Classifier evidence policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Joints below this confidence are ignored for a frame.
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,

    /// Minimum number of usable frames per criterion.
    #[serde(default = "default_min_evidence_frames")]
    pub min_evidence_frames: u32,

    /// Minimum share of all frames that must be usable per criterion.
    #[serde(default = "default_min_evidence_fraction")]
    pub min_evidence_fraction: f64,
}

fn default_confidence_floor() -> f64 {
    0.3
}

fn default_min_evidence_frames() -> u32 {
    3
}

fn default_min_evidence_fraction() -> f64 {
    0.5
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            confidence_floor: default_confidence_floor(),
            min_evidence_frames: default_min_evidence_frames(),
            min_evidence_fraction: default_min_evidence_fraction(),
        }
    }
}

/// Config sections for atomic updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Logging,
    Normalizer,
    Detector,
    Classifier,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Paths,
        ConfigSection::Logging,
        ConfigSection::Normalizer,
        ConfigSection::Detector,
        ConfigSection::Classifier,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Normalizer => "normalizer",
            ConfigSection::Detector => "detector",
            ConfigSection::Classifier => "classifier",
        }
    }

    /// Comment written above the section in generated files.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Scratch and log directories",
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Normalizer => "Video format normalization (ffmpeg)",
            ConfigSection::Detector => "Keypoint detector backend",
            ConfigSection::Classifier => "Classifier evidence policy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[normalizer]"));
        assert!(toml.contains("ffmpeg_path"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.paths.temp_root, settings.paths.temp_root);
        assert_eq!(parsed.normalizer.target_fps, 30);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[detector]\nenabled = false";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert!(!parsed.detector.enabled);
        assert_eq!(parsed.detector.standin_frames, 90);
        assert_eq!(parsed.classifier.confidence_floor, 0.3);
        assert_eq!(parsed.normalizer.video_codec, "mjpeg");
    }
}
