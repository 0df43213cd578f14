//! Skeletal joints and per-frame samples.

use serde::{Deserialize, Serialize};

/// Body joint tracked by the extractor.
///
/// The order follows the first 15 keypoints of the BODY_25 layout, so the
/// discriminant doubles as the BODY_25 index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    Neck,
    RightShoulder,
    RightElbow,
    RightWrist,
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    MidHip,
    RightHip,
    RightKnee,
    RightAnkle,
    LeftHip,
    LeftKnee,
    LeftAnkle,
}

impl Joint {
    /// Number of joints in the closed joint set.
    pub const COUNT: usize = 15;

    /// All joints in canonical order.
    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Nose,
        Joint::Neck,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightWrist,
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftWrist,
        Joint::MidHip,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightAnkle,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftAnkle,
    ];

    /// Position of this joint in [`Joint::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name (e.g. `left_knee`).
    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::Neck => "neck",
            Joint::RightShoulder => "right_shoulder",
            Joint::RightElbow => "right_elbow",
            Joint::RightWrist => "right_wrist",
            Joint::LeftShoulder => "left_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::MidHip => "mid_hip",
            Joint::RightHip => "right_hip",
            Joint::RightKnee => "right_knee",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHip => "left_hip",
            Joint::LeftKnee => "left_knee",
            Joint::LeftAnkle => "left_ankle",
        }
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 2D position in image space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Position and detector confidence of one joint in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointCoordinate {
    pub position: Point,
    /// Detector confidence, always within `[0, 1]`.
    pub confidence: f64,
}

impl JointCoordinate {
    /// Create a coordinate, clamping confidence into `[0, 1]`.
    ///
    /// Non-finite confidence is treated as 0.
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            position: Point::new(x, y),
            confidence,
        }
    }

    /// A joint the detector could not resolve.
    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// All joint coordinates for one video frame.
///
/// Every joint of [`Joint::ALL`] is always present; unresolved joints carry
/// confidence 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrameSample {
    /// Frame ordinal (0-based).
    pub index: u32,
    /// Presentation time in seconds (index / fps).
    pub timestamp_secs: f64,
    joints: [JointCoordinate; Joint::COUNT],
}

impl PoseFrameSample {
    /// Create a sample with every joint unresolved.
    pub fn empty(index: u32, timestamp_secs: f64) -> Self {
        Self {
            index,
            timestamp_secs,
            joints: [JointCoordinate::unresolved(); Joint::COUNT],
        }
    }

    /// Create a sample by asking `coordinate` for every joint.
    pub fn from_fn(
        index: u32,
        timestamp_secs: f64,
        mut coordinate: impl FnMut(Joint) -> JointCoordinate,
    ) -> Self {
        let mut sample = Self::empty(index, timestamp_secs);
        for joint in Joint::ALL {
            sample.joints[joint.index()] = coordinate(joint);
        }
        sample
    }

    /// Set one joint (builder pattern).
    pub fn with_joint(mut self, joint: Joint, coordinate: JointCoordinate) -> Self {
        self.joints[joint.index()] = coordinate;
        self
    }

    /// Get a joint coordinate.
    pub fn joint(&self, joint: Joint) -> &JointCoordinate {
        &self.joints[joint.index()]
    }

    /// Iterate joints in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &JointCoordinate)> {
        Joint::ALL.iter().copied().zip(self.joints.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_index_matches_all_order() {
        for (i, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
        }
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(JointCoordinate::new(0.0, 0.0, 1.7).confidence, 1.0);
        assert_eq!(JointCoordinate::new(0.0, 0.0, -0.2).confidence, 0.0);
        assert_eq!(JointCoordinate::new(0.0, 0.0, f64::NAN).confidence, 0.0);
    }

    #[test]
    fn empty_sample_has_every_joint_unresolved() {
        let sample = PoseFrameSample::empty(3, 0.1);
        assert_eq!(sample.iter().count(), Joint::COUNT);
        assert!(sample.iter().all(|(_, c)| c.confidence == 0.0));
    }

    #[test]
    fn with_joint_sets_only_that_joint() {
        let sample = PoseFrameSample::empty(0, 0.0)
            .with_joint(Joint::LeftKnee, JointCoordinate::new(10.0, 20.0, 0.9));
        assert_eq!(sample.joint(Joint::LeftKnee).position, Point::new(10.0, 20.0));
        assert_eq!(sample.joint(Joint::RightKnee).confidence, 0.0);
    }

    #[test]
    fn joint_serializes_snake_case() {
        let json = serde_json::to_string(&Joint::LeftShoulder).unwrap();
        assert_eq!(json, "\"left_shoulder\"");
    }
}
