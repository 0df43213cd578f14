//! Deterministic stand-in keypoint backend.
//!
//! Used when no real detector is installed. Emits a reference Warrior II
//! skeleton for a fixed number of frames, with per-joint jitter derived from
//! a SHA-256 digest of the video bytes. Same bytes, same sequence.

use std::fs;

use sha2::{Digest, Sha256};

use super::{ExtractionError, KeypointBackend};
use crate::config::DetectorSettings;
use crate::models::{CanonicalVideo, Joint, JointCoordinate, PoseFrameSample};

/// Maximum jitter applied to each coordinate, in pixels.
const JITTER_PX: f64 = 4.0;

/// Confidence reported for every stand-in joint.
const STANDIN_CONFIDENCE: f64 = 0.9;

/// Reference Warrior II (front view, 1280x720 frame, left leg leading).
pub fn reference_skeleton(joint: Joint) -> (f64, f64) {
    match joint {
        Joint::Nose => (640.0, 200.0),
        Joint::Neck => (640.0, 250.0),
        Joint::RightShoulder => (590.0, 260.0),
        Joint::RightElbow => (480.0, 262.0),
        Joint::RightWrist => (370.0, 264.0),
        Joint::LeftShoulder => (690.0, 260.0),
        Joint::LeftElbow => (800.0, 262.0),
        Joint::LeftWrist => (910.0, 264.0),
        Joint::MidHip => (640.0, 420.0),
        Joint::RightHip => (610.0, 420.0),
        Joint::RightKnee => (500.0, 490.0),
        Joint::RightAnkle => (390.0, 560.0),
        Joint::LeftHip => (670.0, 420.0),
        Joint::LeftKnee => (800.0, 430.0),
        Joint::LeftAnkle => (800.0, 560.0),
    }
}

/// Stand-in detector.
#[derive(Debug, Clone)]
pub struct StandInDetector {
    frames: u32,
}

impl StandInDetector {
    /// Create a stand-in that emits `frames` frames per video.
    pub fn new(frames: u32) -> Self {
        Self { frames }
    }

    pub fn from_settings(settings: &DetectorSettings) -> Self {
        Self::new(settings.standin_frames)
    }

    fn sample(&self, seed: &[u8], index: u32, timestamp_secs: f64) -> PoseFrameSample {
        let noise = Sha256::new()
            .chain_update(seed)
            .chain_update(index.to_le_bytes())
            .finalize();

        PoseFrameSample::from_fn(index, timestamp_secs, |joint| {
            let (x, y) = reference_skeleton(joint);
            let i = joint.index() * 2;
            JointCoordinate::new(
                x + jitter(noise[i]),
                y + jitter(noise[i + 1]),
                STANDIN_CONFIDENCE,
            )
        })
    }
}

/// Map a byte to `[-JITTER_PX, JITTER_PX]`.
fn jitter(byte: u8) -> f64 {
    (byte as f64 / 255.0 - 0.5) * 2.0 * JITTER_PX
}

impl KeypointBackend for StandInDetector {
    fn name(&self) -> &str {
        "stand-in"
    }

    fn extract(&self, video: CanonicalVideo) -> Result<Vec<PoseFrameSample>, ExtractionError> {
        let bytes =
            fs::read(&video.path).map_err(|e| ExtractionError::unreadable(&video.path, e.to_string()))?;
        if bytes.is_empty() || self.frames == 0 {
            return Err(ExtractionError::NoFrames(video.path));
        }

        let seed = Sha256::digest(&bytes);
        let frames: Vec<PoseFrameSample> = (0..self.frames)
            .map(|i| self.sample(&seed, i, video.frame_time(i)))
            .collect();

        tracing::info!(
            "[StandIn] Generated {} frames for {}",
            frames.len(),
            video.path.display()
        );
        Ok(frames)
    }
}
