//! Criteria tables, one module per pose.
//!
//! Table order is the position order of the label vector. Appending or
//! reordering entries changes the wire contract and requires bumping
//! [`CRITERIA_VERSION`](super::registry::CRITERIA_VERSION).

mod chair;
mod plank;
mod warrior2;
mod warrior2_back;

use super::criterion::Criterion;
use super::geometry::{FrameView, Side};
use crate::models::{Joint, PoseId};

/// Ordered criteria for a pose.
pub fn criteria(pose: PoseId) -> &'static [Criterion] {
    match pose {
        PoseId::Warrior2 => &warrior2::CRITERIA,
        PoseId::Chair => &chair::CRITERIA,
        PoseId::Plank => &plank::CRITERIA,
        PoseId::Warrior2Back => &warrior2_back::CRITERIA,
    }
}

// Shared measurements

/// Knee angle of the leading (more bent) leg.
fn lead_knee_angle(view: &FrameView<'_>) -> Option<f64> {
    let side = view.lead_side()?;
    knee_angle(view, side)
}

/// Knee angle of the trailing leg.
fn back_knee_angle(view: &FrameView<'_>) -> Option<f64> {
    let side = view.lead_side()?.opposite();
    knee_angle(view, side)
}

fn knee_angle(view: &FrameView<'_>, side: Side) -> Option<f64> {
    view.angle(side.hip(), side.knee(), side.ankle())
}

fn elbow_angle(view: &FrameView<'_>, side: Side) -> Option<f64> {
    view.angle(side.shoulder(), side.elbow(), side.wrist())
}

fn shoulders_tilt(view: &FrameView<'_>) -> Option<f64> {
    view.tilt_from_horizontal(Joint::LeftShoulder, Joint::RightShoulder)
}

fn wrists_tilt(view: &FrameView<'_>) -> Option<f64> {
    view.tilt_from_horizontal(Joint::LeftWrist, Joint::RightWrist)
}

fn spine_tilt(view: &FrameView<'_>) -> Option<f64> {
    view.tilt_from_vertical(Joint::Neck, Joint::MidHip)
}

/// Horizontal offset between two joints, in torso lengths.
fn horizontal_offset(view: &FrameView<'_>, a: Joint, b: Joint) -> Option<f64> {
    let dx = (view.point(a)?.x - view.point(b)?.x).abs();
    FrameView::ratio(dx, view.torso_length()?)
}

/// Vertical offset between two joints, in torso lengths.
fn vertical_offset(view: &FrameView<'_>, a: Joint, b: Joint) -> Option<f64> {
    let dy = (view.point(a)?.y - view.point(b)?.y).abs();
    FrameView::ratio(dy, view.torso_length()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn criterion_counts() {
        assert_eq!(criteria(PoseId::Warrior2).len(), 10);
        assert_eq!(criteria(PoseId::Chair).len(), 6);
        assert_eq!(criteria(PoseId::Plank).len(), 5);
        assert_eq!(criteria(PoseId::Warrior2Back).len(), 6);
    }

    #[test]
    fn ids_unique_within_pose() {
        for pose in PoseId::ALL {
            let ids: HashSet<&str> = criteria(pose).iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), criteria(pose).len(), "duplicate id in {}", pose);
        }
    }

    #[test]
    fn bands_are_well_formed() {
        for pose in PoseId::ALL {
            for c in criteria(pose) {
                assert!(c.band.min <= c.band.max, "{}: {}", pose, c.id);
                assert!(!c.pass_feedback.is_empty() && !c.fail_feedback.is_empty());
            }
        }
    }
}
