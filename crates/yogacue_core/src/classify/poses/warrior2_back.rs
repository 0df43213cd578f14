//! Warrior II, back view.

use super::{back_knee_angle, lead_knee_angle, shoulders_tilt, spine_tilt, wrists_tilt};
use crate::classify::aggregate::Aggregate;
use crate::classify::criterion::{Band, Criterion, Unit};
use crate::classify::geometry::FrameView;
use crate::models::Joint;

pub(super) static CRITERIA: [Criterion; 6] = [
    Criterion {
        id: "shoulders_level",
        description: "Shoulder blades level",
        measure: shoulders_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(8.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your shoulders are level across your back.",
        fail_feedback: "Draw your shoulder blades down and keep them level.",
    },
    Criterion {
        id: "hips_level",
        description: "Hips level",
        measure: hips_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(8.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your hips are level.",
        fail_feedback: "Square your hips so one side does not drop lower.",
    },
    Criterion {
        id: "spine_vertical",
        description: "Spine vertical",
        measure: spine_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(8.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your spine is tall and vertical.",
        fail_feedback: "Stack your spine straight up over your pelvis.",
    },
    Criterion {
        id: "arms_level",
        description: "Arms extended at one height",
        measure: wrists_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(10.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your arms form a level line.",
        fail_feedback: "Level your arms so they form one straight line.",
    },
    Criterion {
        id: "front_knee_bent",
        description: "Front knee bent close to a right angle",
        measure: lead_knee_angle,
        unit: Unit::Degrees,
        band: Band::new(80.0, 110.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your front knee is bent to about 90 degrees.",
        fail_feedback: "Bend your front knee deeper toward 90 degrees.",
    },
    Criterion {
        id: "back_leg_straight",
        description: "Back leg straight",
        measure: back_knee_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your back leg is straight.",
        fail_feedback: "Straighten your back leg.",
    },
];

fn hips_tilt(view: &FrameView<'_>) -> Option<f64> {
    view.tilt_from_horizontal(Joint::LeftHip, Joint::RightHip)
}
