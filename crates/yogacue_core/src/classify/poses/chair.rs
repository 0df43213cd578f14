//! Chair pose (Utkatasana), side view.
//!
//! Every measurement uses the side facing the camera in that frame.

use super::{elbow_angle, horizontal_offset, knee_angle};
use crate::classify::aggregate::Aggregate;
use crate::classify::criterion::{Band, Criterion, Unit};
use crate::classify::geometry::FrameView;

pub(super) static CRITERIA: [Criterion; 6] = [
    Criterion {
        id: "knees_bent",
        description: "Knees bent as if sitting back into a chair",
        measure: visible_knee_angle,
        unit: Unit::Degrees,
        band: Band::new(90.0, 140.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your knees are nicely bent.",
        fail_feedback: "Bend your knees more, as if sitting back into a chair.",
    },
    Criterion {
        id: "hips_hinged",
        description: "Hips hinged back",
        measure: hip_angle,
        unit: Unit::Degrees,
        band: Band::new(70.0, 130.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your hips are sitting back well.",
        fail_feedback: "Send your hips further back while keeping your chest lifted.",
    },
    Criterion {
        id: "knees_behind_toes",
        description: "Knees do not travel far past the ankles",
        measure: knee_forward_offset,
        unit: Unit::Ratio,
        band: Band::at_most(0.5),
        aggregate: Aggregate::Median,
        pass_feedback: "Your knees stay behind your toes.",
        fail_feedback: "Shift your weight into your heels so your knees stay behind your toes.",
    },
    Criterion {
        id: "torso_lean",
        description: "Torso leaning slightly forward",
        measure: torso_lean,
        unit: Unit::Degrees,
        band: Band::new(10.0, 45.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your torso has a gentle forward lean.",
        fail_feedback: "Lean your torso slightly forward, keeping a long spine.",
    },
    Criterion {
        id: "arms_raised",
        description: "Arms raised overhead in line with the torso",
        measure: arm_raise,
        unit: Unit::Degrees,
        band: Band::straight_from(150.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your arms are reaching up alongside your ears.",
        fail_feedback: "Lift your arms overhead so they frame your ears.",
    },
    Criterion {
        id: "arms_straight",
        description: "Elbows straight",
        measure: visible_elbow_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your arms are straight and active.",
        fail_feedback: "Straighten your elbows and reach through your fingertips.",
    },
];

fn visible_knee_angle(view: &FrameView<'_>) -> Option<f64> {
    knee_angle(view, view.visible_side())
}

fn hip_angle(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    view.angle(side.shoulder(), side.hip(), side.knee())
}

fn knee_forward_offset(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    horizontal_offset(view, side.knee(), side.ankle())
}

fn torso_lean(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    view.tilt_from_vertical(side.shoulder(), side.hip())
}

fn arm_raise(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    view.angle(side.hip(), side.shoulder(), side.elbow())
}

fn visible_elbow_angle(view: &FrameView<'_>) -> Option<f64> {
    elbow_angle(view, view.visible_side())
}
