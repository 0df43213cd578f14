//! Label vectors and their comma-joined wire form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::criterion::Unit;
use super::registry::{self, UnknownPoseError};
use crate::models::PoseId;

/// Aggregated measurement behind a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    /// Aggregated value, in the criterion's unit.
    Value(f64),
    /// Not enough usable frames to measure.
    Indeterminate {
        usable_frames: usize,
        required_frames: usize,
    },
}

impl Measurement {
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            Measurement::Indeterminate { .. } => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Measurement::Indeterminate { .. })
    }
}

/// One criterion outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledCriterion {
    pub criterion_id: String,
    pub achieved: bool,
    /// Unit of `measurement` when it holds a value.
    pub unit: Unit,
    pub measurement: Measurement,
}

/// Ordered criterion outcomes for one pose.
///
/// Entry order is the pose's registration order; position carries meaning
/// in the encoded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelVector {
    pub pose: PoseId,
    /// Registry version the positions refer to.
    pub criteria_version: u32,
    pub entries: Vec<LabeledCriterion>,
}

/// Errors from decoding a comma-joined label string.
#[derive(Debug, Error, PartialEq)]
pub enum LabelDecodeError {
    #[error("Invalid label '{token}' at position {position} (expected 0 or 1)")]
    InvalidToken { position: usize, token: String },

    #[error("Label count mismatch for {pose}: expected {expected}, got {actual}")]
    LengthMismatch {
        pose: PoseId,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    UnknownPose(#[from] UnknownPoseError),
}

impl LabelVector {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in order.
    pub fn labels(&self) -> Vec<bool> {
        self.entries.iter().map(|e| e.achieved).collect()
    }

    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.achieved).count()
    }

    /// Comma-joined `0`/`1` form, e.g. `1,0,0,1`.
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|e| if e.achieved { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Rebuild a vector from its encoded form.
    ///
    /// Positions are matched against the pose's registered criteria. Tokens
    /// may carry surrounding whitespace and may be written as `0.0`/`1.0`.
    /// Measurements of a decoded vector are indeterminate.
    pub fn decode(pose: PoseId, text: &str) -> Result<Self, LabelDecodeError> {
        let criteria = registry::criteria_for(pose)?;

        let trimmed = text.trim();
        let labels: Vec<bool> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split(',')
                .enumerate()
                .map(|(position, token)| parse_label(position, token))
                .collect::<Result<_, _>>()?
        };

        if labels.len() != criteria.criteria.len() {
            return Err(LabelDecodeError::LengthMismatch {
                pose,
                expected: criteria.criteria.len(),
                actual: labels.len(),
            });
        }

        let entries = criteria
            .criteria
            .iter()
            .zip(labels)
            .map(|(criterion, achieved)| LabeledCriterion {
                criterion_id: criterion.id.to_string(),
                achieved,
                unit: criterion.unit,
                measurement: Measurement::Indeterminate {
                    usable_frames: 0,
                    required_frames: 0,
                },
            })
            .collect();

        Ok(Self {
            pose,
            criteria_version: criteria.version,
            entries,
        })
    }
}

fn parse_label(position: usize, token: &str) -> Result<bool, LabelDecodeError> {
    let invalid = || LabelDecodeError::InvalidToken {
        position,
        token: token.to_string(),
    };
    match token.trim().parse::<f64>() {
        Ok(v) if v == 0.0 => Ok(false),
        Ok(v) if v == 1.0 => Ok(true),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_joins_in_order() {
        let vector = LabelVector::decode(PoseId::Plank, "1,0,1,1,0").unwrap();
        assert_eq!(vector.encode(), "1,0,1,1,0");
        assert_eq!(vector.passed_count(), 3);
        assert_eq!(vector.labels(), vec![true, false, true, true, false]);
    }

    #[test]
    fn decode_maps_criterion_ids() {
        let vector = LabelVector::decode(PoseId::Warrior2, "1,0,0,1,0,1,0,0,0,0").unwrap();
        let expected: Vec<&str> = registry::criteria_for(PoseId::Warrior2)
            .unwrap()
            .criteria
            .iter()
            .map(|c| c.id)
            .collect();
        let actual: Vec<&str> = vector.entries.iter().map(|e| e.criterion_id.as_str()).collect();
        assert_eq!(actual, expected);
        assert!(vector.entries.iter().all(|e| e.measurement.is_indeterminate()));
        assert_eq!(vector.entries[0].unit, Unit::Degrees);
        assert_eq!(vector.entries[3].unit, Unit::Ratio);
    }

    #[test]
    fn decode_accepts_float_tokens_and_spaces() {
        let vector = LabelVector::decode(PoseId::Plank, " 1.0, 0 ,1,1.0,0.0 ").unwrap();
        assert_eq!(vector.encode(), "1,0,1,1,0");
    }

    #[test]
    fn decode_rejects_bad_token() {
        let err = LabelVector::decode(PoseId::Plank, "1,0,2,1,0").unwrap_err();
        assert_eq!(
            err,
            LabelDecodeError::InvalidToken {
                position: 2,
                token: "2".to_string()
            }
        );
        assert!(LabelVector::decode(PoseId::Plank, "1,,1,1,0").is_err());
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let err = LabelVector::decode(PoseId::Plank, "1,0").unwrap_err();
        assert!(matches!(
            err,
            LabelDecodeError::LengthMismatch {
                expected: 5,
                actual: 2,
                ..
            }
        ));
        assert!(matches!(
            LabelVector::decode(PoseId::Plank, ""),
            Err(LabelDecodeError::LengthMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn serializes_to_json() {
        let vector = LabelVector::decode(PoseId::Chair, "1,1,0,0,1,1").unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        assert!(json.contains("\"pose\":\"chair\""));
        let back: LabelVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
    }
}
