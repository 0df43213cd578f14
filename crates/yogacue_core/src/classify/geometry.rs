//! Geometry over one frame's joints.
//!
//! Angles are in degrees. Coordinates are image space (y grows downward),
//! so "vertical" and "horizontal" refer to the image axes.

use crate::models::{Joint, Point, PoseFrameSample};

/// Lengths below this are treated as degenerate.
const MIN_SEGMENT_PX: f64 = 1e-6;

/// Angle at `vertex` between the rays to `a` and `c`, in `[0, 180]`.
///
/// Returns `None` when either ray has zero length.
pub fn angle_at(a: Point, vertex: Point, c: Point) -> Option<f64> {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (c.x - vertex.x, c.y - vertex.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < MIN_SEGMENT_PX || mag2 < MIN_SEGMENT_PX {
        return None;
    }

    let cos_angle = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Tilt of segment `a`-`b` away from horizontal, in `[0, 90]`.
pub fn tilt_from_horizontal(a: Point, b: Point) -> Option<f64> {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    if dx < MIN_SEGMENT_PX && dy < MIN_SEGMENT_PX {
        return None;
    }
    Some(dy.atan2(dx).to_degrees())
}

/// Tilt of segment `a`-`b` away from vertical, in `[0, 90]`.
pub fn tilt_from_vertical(a: Point, b: Point) -> Option<f64> {
    tilt_from_horizontal(a, b).map(|t| 90.0 - t)
}

/// Body side, from the subject's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn shoulder(self) -> Joint {
        match self {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }

    pub fn elbow(self) -> Joint {
        match self {
            Side::Left => Joint::LeftElbow,
            Side::Right => Joint::RightElbow,
        }
    }

    pub fn wrist(self) -> Joint {
        match self {
            Side::Left => Joint::LeftWrist,
            Side::Right => Joint::RightWrist,
        }
    }

    pub fn hip(self) -> Joint {
        match self {
            Side::Left => Joint::LeftHip,
            Side::Right => Joint::RightHip,
        }
    }

    pub fn knee(self) -> Joint {
        match self {
            Side::Left => Joint::LeftKnee,
            Side::Right => Joint::RightKnee,
        }
    }

    pub fn ankle(self) -> Joint {
        match self {
            Side::Left => Joint::LeftAnkle,
            Side::Right => Joint::RightAnkle,
        }
    }

    /// Joints summed when deciding which side faces the camera.
    fn chain(self) -> [Joint; 4] {
        [self.shoulder(), self.hip(), self.knee(), self.ankle()]
    }
}

/// Lead side across a sequence: the majority of per-frame lead sides.
///
/// Only frames where both knees clear the floor vote. Ties go to the left
/// side; `None` when no frame votes.
pub fn dominant_lead_side(frames: &[PoseFrameSample], floor: f64) -> Option<Side> {
    let (left, right) = frames
        .iter()
        .filter_map(|sample| FrameView::new(sample, floor).knee_lead())
        .fold((0usize, 0usize), |(left, right), side| match side {
            Side::Left => (left + 1, right),
            Side::Right => (left, right + 1),
        });
    match (left, right) {
        (0, 0) => None,
        (l, r) if r > l => Some(Side::Right),
        _ => Some(Side::Left),
    }
}

/// One frame seen through the confidence floor.
///
/// Joints below the floor read as missing, so every measurement built on
/// them yields `None` for this frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    sample: &'a PoseFrameSample,
    floor: f64,
    lead_hint: Option<Side>,
}

impl<'a> FrameView<'a> {
    pub fn new(sample: &'a PoseFrameSample, floor: f64) -> Self {
        Self {
            sample,
            floor,
            lead_hint: None,
        }
    }

    /// Lead side to assume when this frame cannot decide on its own.
    pub fn with_lead_hint(mut self, hint: Option<Side>) -> Self {
        self.lead_hint = hint;
        self
    }

    /// Position of a joint, if its confidence reaches the floor.
    pub fn point(&self, joint: Joint) -> Option<Point> {
        let coord = self.sample.joint(joint);
        (coord.confidence >= self.floor && coord.confidence > 0.0).then_some(coord.position)
    }

    /// Angle at `vertex` formed with `a` and `c`.
    pub fn angle(&self, a: Joint, vertex: Joint, c: Joint) -> Option<f64> {
        angle_at(self.point(a)?, self.point(vertex)?, self.point(c)?)
    }

    pub fn tilt_from_horizontal(&self, a: Joint, b: Joint) -> Option<f64> {
        tilt_from_horizontal(self.point(a)?, self.point(b)?)
    }

    pub fn tilt_from_vertical(&self, a: Joint, b: Joint) -> Option<f64> {
        tilt_from_vertical(self.point(a)?, self.point(b)?)
    }

    pub fn distance(&self, a: Joint, b: Joint) -> Option<f64> {
        Some(self.point(a)?.distance(&self.point(b)?))
    }

    /// Neck to mid-hip length, the body scale for ratio measurements.
    pub fn torso_length(&self) -> Option<f64> {
        self.distance(Joint::Neck, Joint::MidHip)
            .filter(|len| *len >= MIN_SEGMENT_PX)
    }

    /// `numerator / denominator`, `None` for a degenerate denominator.
    pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
        (denominator >= MIN_SEGMENT_PX).then(|| numerator / denominator)
    }

    /// The leading leg: the side whose knee is bent further.
    ///
    /// Ties go to the left side. When a knee is below the floor, falls back
    /// to the sequence hint (see [`dominant_lead_side`]).
    pub fn lead_side(&self) -> Option<Side> {
        self.knee_lead().or(self.lead_hint)
    }

    fn knee_lead(&self) -> Option<Side> {
        let left = self.angle(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)?;
        let right = self.angle(Joint::RightHip, Joint::RightKnee, Joint::RightAnkle)?;
        Some(if right < left { Side::Right } else { Side::Left })
    }

    /// The side facing the camera in a profile shot.
    ///
    /// Picks the side with the higher summed confidence over shoulder, hip,
    /// knee and ankle. Ties go to the left side.
    pub fn visible_side(&self) -> Side {
        let score = |side: Side| -> f64 {
            side.chain()
                .iter()
                .map(|j| self.sample.joint(*j).confidence)
                .sum()
        };
        if score(Side::Right) > score(Side::Left) {
            Side::Right
        } else {
            Side::Left
        }
    }
}
