//! OpenPose subprocess-based keypoint detector.
//!
//! Runs the OpenPose demo binary over the canonical video with JSON output
//! enabled, then reads one `*_keypoints.json` file per frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{ExtractionError, KeypointBackend};
use crate::config::DetectorSettings;
use crate::logging::MessagePrefix;
use crate::models::{CanonicalVideo, Joint, JointCoordinate, PoseFrameSample};

/// Values per keypoint in `pose_keypoints_2d` (x, y, confidence).
const VALUES_PER_KEYPOINT: usize = 3;

/// Directory (next to the video) that receives per-frame JSON.
const JSON_DIR_NAME: &str = "keypoints";

/// OpenPose demo binary as keypoint backend.
#[derive(Debug, Clone)]
pub struct OpenPoseDetector {
    program: PathBuf,
    model_folder: Option<String>,
    net_resolution: Option<String>,
}

impl OpenPoseDetector {
    /// Create a detector from settings.
    pub fn from_settings(settings: &DetectorSettings) -> Self {
        Self {
            program: PathBuf::from(&settings.openpose_path),
            model_folder: settings.model_folder.clone(),
            net_resolution: settings.net_resolution.clone(),
        }
    }

    /// Path of the OpenPose executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check if the executable exists.
    pub fn is_available(&self) -> bool {
        self.program.is_file()
    }

    fn build_command(&self, video: &Path, json_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--video")
            .arg(video)
            .arg("--write_json")
            .arg(json_dir)
            .arg("--display")
            .arg("0")
            .arg("--render_pose")
            .arg("0")
            .arg("--number_people_max")
            .arg("1");
        if let Some(ref folder) = self.model_folder {
            cmd.arg("--model_folder").arg(folder);
        }
        if let Some(ref resolution) = self.net_resolution {
            cmd.arg("--net_resolution").arg(resolution);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl KeypointBackend for OpenPoseDetector {
    fn name(&self) -> &str {
        "openpose"
    }

    fn extract(&self, video: CanonicalVideo) -> Result<Vec<PoseFrameSample>, ExtractionError> {
        if !video.path.is_file() {
            return Err(ExtractionError::unreadable(&video.path, "File does not exist"));
        }

        let json_dir = video
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(JSON_DIR_NAME);
        fs::create_dir_all(&json_dir)
            .map_err(|e| ExtractionError::unreadable(&json_dir, e.to_string()))?;

        let mut cmd = self.build_command(&video.path, &json_dir);
        tracing::debug!("[OpenPose] {}", MessagePrefix::Command.format(&format!("{:?}", cmd)));

        let tool = self.program.display().to_string();
        let output = cmd.output().map_err(|e| ExtractionError::DetectorFailed {
            tool: tool.clone(),
            exit_code: None,
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::DetectorFailed {
                tool,
                exit_code: output.status.code(),
                message: stderr.lines().last().unwrap_or("unknown error").to_string(),
            });
        }

        let frames = parse_keypoint_dir(&json_dir, video.fps)?;
        if frames.is_empty() {
            return Err(ExtractionError::NoFrames(video.path));
        }

        tracing::info!("[OpenPose] Extracted {} frames", frames.len());
        Ok(frames)
    }
}

/// One frame of OpenPose JSON output.
#[derive(Debug, Deserialize)]
struct FrameJson {
    #[serde(default)]
    people: Vec<PersonJson>,
}

#[derive(Debug, Deserialize)]
struct PersonJson {
    #[serde(default)]
    pose_keypoints_2d: Vec<f64>,
}

impl PersonJson {
    fn keypoint(&self, joint: Joint) -> JointCoordinate {
        let base = joint.index() * VALUES_PER_KEYPOINT;
        match self.pose_keypoints_2d.get(base..base + VALUES_PER_KEYPOINT) {
            Some([x, y, c]) => JointCoordinate::new(*x, *y, *c),
            _ => JointCoordinate::unresolved(),
        }
    }

    fn total_confidence(&self) -> f64 {
        Joint::ALL.iter().map(|j| self.keypoint(*j).confidence).sum()
    }
}

/// Parse one OpenPose JSON document into a frame sample.
///
/// The person with the highest summed confidence is kept. A frame without
/// people yields a sample with every joint unresolved.
pub fn parse_frame_json(
    content: &str,
    index: u32,
    timestamp_secs: f64,
) -> Result<PoseFrameSample, serde_json::Error> {
    let frame: FrameJson = serde_json::from_str(content)?;

    let best = frame.people.iter().max_by(|a, b| {
        a.total_confidence()
            .partial_cmp(&b.total_confidence())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(match best {
        Some(person) => PoseFrameSample::from_fn(index, timestamp_secs, |j| person.keypoint(j)),
        None => PoseFrameSample::empty(index, timestamp_secs),
    })
}

/// Read every `*_keypoints.json` file in `dir`, ordered by file name.
///
/// OpenPose zero-pads the frame number, so name order is frame order.
pub fn parse_keypoint_dir(dir: &Path, fps: f64) -> Result<Vec<PoseFrameSample>, ExtractionError> {
    let entries =
        fs::read_dir(dir).map_err(|e| ExtractionError::unreadable(dir, e.to_string()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with("_keypoints.json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut frames = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let index = i as u32;
        let timestamp = if fps > 0.0 { index as f64 / fps } else { 0.0 };
        let content = fs::read_to_string(path)
            .map_err(|e| ExtractionError::unreadable(path, e.to_string()))?;
        let sample = parse_frame_json(&content, index, timestamp)
            .map_err(|e| ExtractionError::invalid_output(path, e.to_string()))?;
        frames.push(sample);
    }

    Ok(frames)
}
