//! Criterion definition and evaluation.

use serde::{Deserialize, Serialize};

use super::aggregate::Aggregate;
use super::geometry::{dominant_lead_side, FrameView};
use super::labels::{LabeledCriterion, Measurement};
use super::ClassifierPolicy;
use crate::models::PoseFrameSample;

/// Per-frame measurement. `None` means the frame has no usable evidence.
pub type MeasureFn = fn(&FrameView<'_>) -> Option<f64>;

/// Unit of a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Degrees,
    /// Length relative to a body-scale segment in the same frame.
    Ratio,
}

/// Inclusive tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Band with only an upper bound (`[0, max]`).
    pub const fn at_most(max: f64) -> Self {
        Self { min: 0.0, max }
    }

    /// Angle band closed at a straight line (`[min, 180]`).
    pub const fn straight_from(min: f64) -> Self {
        Self { min, max: 180.0 }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A named geometric rule for one pose.
#[derive(Clone, Copy)]
pub struct Criterion {
    /// Stable identifier, unique within its pose.
    pub id: &'static str,
    /// What the rule checks.
    pub description: &'static str,
    pub measure: MeasureFn,
    pub unit: Unit,
    pub band: Band,
    pub aggregate: Aggregate,
    /// Feedback when the criterion is achieved.
    pub pass_feedback: &'static str,
    /// Feedback when it is not (including insufficient evidence).
    pub fail_feedback: &'static str,
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("id", &self.id)
            .field("unit", &self.unit)
            .field("band", &self.band)
            .field("aggregate", &self.aggregate)
            .finish_non_exhaustive()
    }
}

impl Criterion {
    /// Evaluate over a frame sequence.
    ///
    /// Frames where the measurement is unavailable or non-finite are
    /// skipped. Without enough usable frames the label is "not achieved"
    /// and the value is indeterminate.
    pub fn evaluate(&self, frames: &[PoseFrameSample], policy: &ClassifierPolicy) -> LabeledCriterion {
        let lead = dominant_lead_side(frames, policy.confidence_floor);
        let values: Vec<f64> = frames
            .iter()
            .map(|sample| FrameView::new(sample, policy.confidence_floor).with_lead_hint(lead))
            .filter_map(|view| (self.measure)(&view))
            .filter(|v| v.is_finite())
            .collect();

        let required = policy.required_frames(frames.len());
        let aggregated = if values.len() >= required {
            self.aggregate.apply(&values)
        } else {
            None
        };

        match aggregated {
            Some(value) => {
                let achieved = self.band.contains(value);
                tracing::trace!(
                    "[Classify] '{}' ({}): {} {:.3} over {} frames, band [{}, {}] -> {}",
                    self.id,
                    self.description,
                    self.aggregate.describe(),
                    value,
                    values.len(),
                    self.band.min,
                    self.band.max,
                    achieved
                );
                LabeledCriterion {
                    criterion_id: self.id.to_string(),
                    achieved,
                    unit: self.unit,
                    measurement: Measurement::Value(value),
                }
            }
            None => {
                tracing::debug!(
                    "[Classify] Insufficient evidence for '{}' ({}): {}/{} usable frames",
                    self.id,
                    self.description,
                    values.len(),
                    required
                );
                LabeledCriterion {
                    criterion_id: self.id.to_string(),
                    achieved: false,
                    unit: self.unit,
                    measurement: Measurement::Indeterminate {
                        usable_frames: values.len(),
                        required_frames: required,
                    },
                }
            }
        }
    }

    /// Feedback text for an outcome.
    pub fn feedback(&self, achieved: bool) -> &'static str {
        if achieved {
            self.pass_feedback
        } else {
            self.fail_feedback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Joint, JointCoordinate};

    fn neck_x(view: &FrameView<'_>) -> Option<f64> {
        view.point(Joint::Neck).map(|p| p.x)
    }

    fn criterion() -> Criterion {
        Criterion {
            id: "neck_x",
            description: "neck x in range",
            measure: neck_x,
            unit: Unit::Ratio,
            band: Band::new(10.0, 20.0),
            aggregate: Aggregate::Median,
            pass_feedback: "good",
            fail_feedback: "bad",
        }
    }

    fn frames(xs: &[(f64, f64)]) -> Vec<PoseFrameSample> {
        xs.iter()
            .enumerate()
            .map(|(i, (x, conf))| {
                PoseFrameSample::empty(i as u32, 0.0)
                    .with_joint(Joint::Neck, JointCoordinate::new(*x, 0.0, *conf))
            })
            .collect()
    }

    #[test]
    fn passes_inside_band() {
        let result = criterion().evaluate(
            &frames(&[(12.0, 0.9), (15.0, 0.9), (99.0, 0.9)]),
            &ClassifierPolicy::default(),
        );
        assert!(result.achieved);
        assert_eq!(result.measurement, Measurement::Value(15.0));
        assert_eq!(result.unit, Unit::Ratio);
    }

    #[test]
    fn fails_outside_band() {
        let result = criterion().evaluate(
            &frames(&[(30.0, 0.9), (31.0, 0.9), (32.0, 0.9)]),
            &ClassifierPolicy::default(),
        );
        assert!(!result.achieved);
        assert_eq!(result.measurement, Measurement::Value(31.0));
    }

    #[test]
    fn low_confidence_frames_do_not_count() {
        // Two usable frames out of four: below the 3-frame minimum
        let result = criterion().evaluate(
            &frames(&[(15.0, 0.9), (15.0, 0.9), (15.0, 0.1), (15.0, 0.1)]),
            &ClassifierPolicy::default(),
        );
        assert!(!result.achieved);
        assert_eq!(
            result.measurement,
            Measurement::Indeterminate {
                usable_frames: 2,
                required_frames: 3
            }
        );
        assert_eq!(result.unit, Unit::Ratio);
    }

    #[test]
    fn band_is_inclusive() {
        let band = Band::straight_from(160.0);
        assert!(band.contains(160.0));
        assert!(band.contains(180.0));
        assert!(!band.contains(159.9));
        assert!(Band::at_most(0.25).contains(0.0));
    }

    #[test]
    fn feedback_follows_outcome() {
        assert_eq!(criterion().feedback(true), "good");
        assert_eq!(criterion().feedback(false), "bad");
    }
}
