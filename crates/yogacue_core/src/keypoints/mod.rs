//! Keypoint extraction.
//!
//! Provides per-frame joint coordinates through interchangeable backends:
//! - OpenPose subprocess (real detector)
//! - Deterministic stand-in (for environments without a detector)
//!
//! The backend is chosen once at process start by [`select_backend`] and
//! then shared read-only by every run.
//!
//! # Usage
//!
//! ```ignore
//! use yogacue_core::keypoints::select_backend;
//!
//! let backend = select_backend(&settings.detector);
//! let frames = backend.extract(canonical_video)?;
//! ```

mod openpose;
mod standin;

use std::path::PathBuf;

pub use openpose::{parse_frame_json, parse_keypoint_dir, OpenPoseDetector};
pub use standin::{reference_skeleton, StandInDetector};

use crate::config::DetectorSettings;
use crate::models::{CanonicalVideo, PoseFrameSample};

/// Errors that make a video unusable for keypoint extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The video could not be read.
    #[error("Failed to read video '{path}': {message}")]
    Unreadable { path: PathBuf, message: String },

    /// The backend produced no frames.
    #[error("No frames extracted from '{0}'")]
    NoFrames(PathBuf),

    /// The detector process failed.
    #[error("{tool} failed with exit code {exit_code:?}: {message}")]
    DetectorFailed {
        tool: String,
        exit_code: Option<i32>,
        message: String,
    },

    /// Detector output could not be parsed.
    #[error("Invalid detector output '{path}': {message}")]
    InvalidOutput { path: PathBuf, message: String },
}

impl ExtractionError {
    /// Create an unreadable-video error.
    pub fn unreadable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-output error.
    pub fn invalid_output(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Keypoint detection backend.
///
/// Implementations must be safe for concurrent read-only use: one instance
/// serves every run for the lifetime of the process.
pub trait KeypointBackend: Send + Sync {
    /// Get the backend name (for logging).
    fn name(&self) -> &str;

    /// Extract one sample per frame, in frame order.
    ///
    /// Every sample contains every joint; unresolved joints have
    /// confidence 0. Zero frames is an error.
    fn extract(&self, video: CanonicalVideo) -> Result<Vec<PoseFrameSample>, ExtractionError>;
}

/// Select the keypoint backend for this process.
///
/// Uses OpenPose when enabled and its executable exists, otherwise the
/// deterministic stand-in.
///
/// # Logging
/// Logs backend selection with `[Keypoints]` prefix
pub fn select_backend(settings: &DetectorSettings) -> Box<dyn KeypointBackend> {
    if !settings.enabled {
        tracing::info!("[Keypoints] Real detector disabled in config, using stand-in");
        return Box::new(StandInDetector::from_settings(settings));
    }

    let detector = OpenPoseDetector::from_settings(settings);
    if detector.is_available() {
        tracing::info!(
            "[Keypoints] Using OpenPose backend: {}",
            detector.program().display()
        );
        Box::new(detector)
    } else {
        tracing::warn!(
            "[Keypoints] OpenPose not found at '{}', falling back to stand-in",
            detector.program().display()
        );
        Box::new(StandInDetector::from_settings(settings))
    }
}

/// Get list of available backends.
pub fn available_backends(settings: &DetectorSettings) -> Vec<&'static str> {
    let mut backends = Vec::new();
    if settings.enabled && OpenPoseDetector::from_settings(settings).is_available() {
        backends.push("openpose");
    }
    backends.push("stand-in");
    backends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_openpose() -> DetectorSettings {
        DetectorSettings {
            openpose_path: "/nonexistent/openpose/bin/OpenPoseDemo".to_string(),
            ..DetectorSettings::default()
        }
    }

    #[test]
    fn missing_detector_selects_standin() {
        let backend = select_backend(&missing_openpose());
        assert_eq!(backend.name(), "stand-in");
    }

    #[test]
    fn disabled_detector_selects_standin() {
        let settings = DetectorSettings {
            enabled: false,
            ..DetectorSettings::default()
        };
        assert_eq!(select_backend(&settings).name(), "stand-in");
    }

    #[test]
    fn standin_is_always_listed() {
        let backends = available_backends(&missing_openpose());
        assert_eq!(backends, vec!["stand-in"]);
    }

    #[test]
    fn error_displays_context() {
        let err = ExtractionError::DetectorFailed {
            tool: "OpenPoseDemo".to_string(),
            exit_code: Some(1),
            message: "cuda error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("OpenPoseDemo"));
        assert!(msg.contains("cuda error"));
    }
}
