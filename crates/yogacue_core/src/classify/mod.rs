//! Pose classification.
//!
//! Turns a frame sequence into a [`LabelVector`] for one pose:
//! 1. Look up the pose's ordered criteria in the registry
//! 2. Measure each criterion per frame, skipping joints below the
//!    confidence floor
//! 3. Aggregate the usable frames (median or trimmed mean)
//! 4. Compare against the criterion's tolerance band
//!
//! Classification is a pure function of the frames, the pose and the
//! [`ClassifierPolicy`].

mod aggregate;
mod criterion;
mod geometry;
mod labels;
mod poses;
mod registry;

pub use aggregate::Aggregate;
pub use criterion::{Band, Criterion, MeasureFn, Unit};
pub use geometry::{
    angle_at, dominant_lead_side, tilt_from_horizontal, tilt_from_vertical, FrameView, Side,
};
pub use labels::{LabelDecodeError, LabelVector, LabeledCriterion, Measurement};
pub use registry::{
    criteria_for, lookup, registered_poses, PoseCriteria, UnknownPoseError, CRITERIA_VERSION,
};

use crate::config::ClassifierSettings;
use crate::models::PoseFrameSample;

/// Evidence rules applied to every criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierPolicy {
    /// Joints below this confidence are ignored for a frame.
    pub confidence_floor: f64,
    /// Minimum usable frames per criterion.
    pub min_evidence_frames: usize,
    /// Minimum usable share of all frames per criterion.
    pub min_evidence_fraction: f64,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            confidence_floor: 0.3,
            min_evidence_frames: 3,
            min_evidence_fraction: 0.5,
        }
    }
}

impl From<&ClassifierSettings> for ClassifierPolicy {
    fn from(settings: &ClassifierSettings) -> Self {
        Self {
            confidence_floor: settings.confidence_floor.clamp(0.0, 1.0),
            min_evidence_frames: settings.min_evidence_frames as usize,
            min_evidence_fraction: settings.min_evidence_fraction.clamp(0.0, 1.0),
        }
    }
}

impl ClassifierPolicy {
    /// Usable frames a criterion needs out of `total_frames`.
    ///
    /// Never below one, so an empty sequence is always indeterminate.
    pub fn required_frames(&self, total_frames: usize) -> usize {
        let by_fraction = (total_frames as f64 * self.min_evidence_fraction).ceil() as usize;
        self.min_evidence_frames.max(by_fraction).max(1)
    }
}

/// Classify frames against a pose using the default policy.
///
/// `pose_id` accepts a slug, alias or route id.
pub fn classify(
    frames: &[PoseFrameSample],
    pose_id: &str,
) -> Result<LabelVector, UnknownPoseError> {
    classify_with(frames, pose_id, &ClassifierPolicy::default())
}

/// Classify frames against a pose with an explicit policy.
pub fn classify_with(
    frames: &[PoseFrameSample],
    pose_id: &str,
    policy: &ClassifierPolicy,
) -> Result<LabelVector, UnknownPoseError> {
    let criteria = lookup(pose_id)?;
    Ok(classify_pose(frames, criteria, policy))
}

/// Classify frames against already-resolved criteria.
///
/// # Logging
/// Logs the achieved count with `[Classify]` prefix
pub fn classify_pose(
    frames: &[PoseFrameSample],
    criteria: &PoseCriteria,
    policy: &ClassifierPolicy,
) -> LabelVector {
    let entries: Vec<LabeledCriterion> = criteria
        .criteria
        .iter()
        .map(|criterion| criterion.evaluate(frames, policy))
        .collect();

    let vector = LabelVector {
        pose: criteria.pose,
        criteria_version: criteria.version,
        entries,
    };

    for entry in &vector.entries {
        match entry.measurement.value() {
            Some(value) => tracing::debug!(
                "[Classify] {} = {:.2} {:?} ({})",
                entry.criterion_id,
                value,
                entry.unit,
                if entry.achieved { "pass" } else { "fail" }
            ),
            None => tracing::debug!("[Classify] {} = indeterminate (fail)", entry.criterion_id),
        }
    }

    let indeterminate = vector
        .entries
        .iter()
        .filter(|e| e.measurement.is_indeterminate())
        .count();
    tracing::info!(
        "[Classify] {}: {}/{} criteria achieved over {} frames ({} indeterminate)",
        criteria.pose,
        vector.passed_count(),
        vector.len(),
        frames.len(),
        indeterminate
    );

    vector
}
