//! Warrior II, front view.

use super::{
    back_knee_angle, elbow_angle, horizontal_offset, lead_knee_angle, shoulders_tilt, spine_tilt,
    wrists_tilt,
};
use crate::classify::aggregate::Aggregate;
use crate::classify::criterion::{Band, Criterion, Unit};
use crate::classify::geometry::FrameView;
use crate::models::Joint;

pub(super) static CRITERIA: [Criterion; 10] = [
    Criterion {
        id: "front_knee_bent",
        description: "Front knee bent close to a right angle",
        measure: lead_knee_angle,
        unit: Unit::Degrees,
        band: Band::new(80.0, 110.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your front knee is bent to about 90 degrees. Nice depth.",
        fail_feedback: "Bend your front knee until your thigh is nearly parallel to the floor.",
    },
    Criterion {
        id: "front_knee_over_ankle",
        description: "Front knee stacked above the front ankle",
        measure: lead_knee_over_ankle,
        unit: Unit::Ratio,
        band: Band::at_most(0.3),
        aggregate: Aggregate::Median,
        pass_feedback: "Your front knee is stacked over your ankle.",
        fail_feedback: "Keep your front knee directly above your ankle, not past your toes.",
    },
    Criterion {
        id: "back_leg_straight",
        description: "Back leg straight",
        measure: back_knee_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your back leg is strong and straight.",
        fail_feedback: "Straighten your back leg and press through the outer edge of the back foot.",
    },
    Criterion {
        id: "wide_stance",
        description: "Feet wide apart relative to torso length",
        measure: stance_width,
        unit: Unit::Ratio,
        band: Band::new(1.8, 4.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your stance is nice and wide.",
        fail_feedback: "Widen your stance to about one leg length between the feet.",
    },
    Criterion {
        id: "torso_upright",
        description: "Torso vertical above the hips",
        measure: spine_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(10.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your torso is upright and centered over your hips.",
        fail_feedback: "Keep your torso upright; avoid leaning toward the front leg.",
    },
    Criterion {
        id: "front_arm_straight",
        description: "Front arm extended",
        measure: front_elbow_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your front arm is fully extended.",
        fail_feedback: "Reach your front arm long and straighten the elbow.",
    },
    Criterion {
        id: "back_arm_straight",
        description: "Back arm extended",
        measure: back_elbow_angle,
        unit: Unit::Degrees,
        band: Band::straight_from(160.0),
        aggregate: Aggregate::Median,
        pass_feedback: "Your back arm is fully extended.",
        fail_feedback: "Reach your back arm long and straighten the elbow.",
    },
    Criterion {
        id: "arms_level",
        description: "Wrists level with each other",
        measure: wrists_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(10.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your arms form a level line.",
        fail_feedback: "Level your arms so they form one straight line.",
    },
    Criterion {
        id: "arms_shoulder_height",
        description: "Wrists at shoulder height",
        measure: wrist_drop,
        unit: Unit::Ratio,
        band: Band::at_most(0.15),
        aggregate: Aggregate::Median,
        pass_feedback: "Your arms are held at shoulder height.",
        fail_feedback: "Raise or lower your arms to shoulder height.",
    },
    Criterion {
        id: "shoulders_level",
        description: "Shoulders level and relaxed",
        measure: shoulders_tilt,
        unit: Unit::Degrees,
        band: Band::at_most(8.0),
        aggregate: Aggregate::TrimmedMean(0.1),
        pass_feedback: "Your shoulders are level and relaxed.",
        fail_feedback: "Relax your shoulders down and keep them level.",
    },
];

fn lead_knee_over_ankle(view: &FrameView<'_>) -> Option<f64> {
    let side = view.lead_side()?;
    horizontal_offset(view, side.knee(), side.ankle())
}

fn stance_width(view: &FrameView<'_>) -> Option<f64> {
    let width = view.distance(Joint::LeftAnkle, Joint::RightAnkle)?;
    FrameView::ratio(width, view.torso_length()?)
}

fn front_elbow_angle(view: &FrameView<'_>) -> Option<f64> {
    elbow_angle(view, view.lead_side()?)
}

fn back_elbow_angle(view: &FrameView<'_>) -> Option<f64> {
    elbow_angle(view, view.lead_side()?.opposite())
}

/// Mean vertical wrist-to-shoulder offset of both arms, in torso lengths.
fn wrist_drop(view: &FrameView<'_>) -> Option<f64> {
    let left = super::vertical_offset(view, Joint::LeftWrist, Joint::LeftShoulder)?;
    let right = super::vertical_offset(view, Joint::RightWrist, Joint::RightShoulder)?;
    Some((left + right) / 2.0)
}
