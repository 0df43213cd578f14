//! Plank pose (Phalakasana), side view.

use super::{elbow_angle, horizontal_offset, knee_angle};
use crate::classify::aggregate::Aggregate;
use crate::classify::criterion::{Band, Criterion, Unit};
use crate::classify::geometry::FrameView;

pub(super) static CRITERIA: [Criterion; 5] = [
    Criterion {
        id: "body_line",
        description: "Shoulders, hips and ankles in one line",
        measure: body_line,
        unit: Unit::Degrees,
        band: Band::straight_from(165.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your body forms a straight line from head to heels.",
        fail_feedback: "Keep your hips in line with your shoulders and heels; avoid sagging or piking.",
    },
    Criterion {
        id: "legs_straight",
        description: "Knees straight",
        measure: visible_knee_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(165.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your legs are straight and engaged.",
        fail_feedback: "Straighten your legs and press back through your heels.",
    },
    Criterion {
        id: "arms_straight",
        description: "Elbows straight",
        measure: visible_elbow_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your arms are straight and supporting you well.",
        fail_feedback: "Straighten your arms without locking the elbows.",
    },
    Criterion {
        id: "wrists_under_shoulders",
        description: "Wrists stacked below the shoulders",
        measure: wrist_offset,
        unit: Unit::Ratio,
        band: Band::at_most(0.25),
        aggregate: Aggregate::Median,
        pass_feedback: "Your wrists are right under your shoulders.",
        fail_feedback: "Place your wrists directly under your shoulders.",
    },
    Criterion {
        id: "body_horizontal",
        description: "Body close to parallel with the floor",
        measure: body_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(20.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your body is close to parallel with the floor.",
        fail_feedback: "Lower your body until it is nearly parallel with the floor.",
    },
];

fn body_line(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    view.angle(side.shoulder(), side.hip(), side.ankle())
}

fn visible_knee_angle(view: &FrameView<'_>) -> Option<f64> {
    knee_angle(view, view.visible_side())
}

fn visible_elbow_angle(view: &FrameView<'_>) -> Option<f64> {
    elbow_angle(view, view.visible_side())
}

fn wrist_offset(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    horizontal_offset(view, side.wrist(), side.shoulder())
}

fn body_tilt(view: &FrameView<'_>) -> Option<f64> {
    let side = view.visible_side();
    view.tilt_from_horizontal(side.shoulder(), side.ankle())
}
