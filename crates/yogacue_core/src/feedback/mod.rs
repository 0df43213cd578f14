//! Feedback synthesis.
//!
//! Turns a [`LabelVector`] into a success rate, an overall verdict and one
//! statement per criterion, in label order. Total: any vector, including an
//! empty one or one decoded from text, produces a report.

use serde::{Deserialize, Serialize};

use crate::classify::{criteria_for, LabelDecodeError, LabelVector, CRITERIA_VERSION};
use crate::models::PoseId;

/// Success rate a run must exceed to count as successful.
pub const SUCCESS_THRESHOLD: f64 = 0.6;

/// Feedback for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStatement {
    pub criterion_id: String,
    pub achieved: bool,
    pub text: String,
}

/// Feedback for one analyzed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub pose: PoseId,
    /// Passed / total, 0 when there are no criteria.
    pub success_rate: f64,
    pub is_successful: bool,
    pub statements: Vec<FeedbackStatement>,
    pub summary: String,
}

impl FeedbackReport {
    /// Success rate as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.success_rate * 100.0).round() as u32
    }
}

/// Build the report for a label vector.
pub fn synthesize(labels: &LabelVector) -> FeedbackReport {
    if labels.criteria_version != CRITERIA_VERSION {
        tracing::warn!(
            "[Feedback] Labels use criteria v{}, current is v{}; statements may not match",
            labels.criteria_version,
            CRITERIA_VERSION
        );
    }

    let total = labels.len();
    let passed = labels.passed_count();
    let success_rate = if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64
    };
    let is_successful = success_rate > SUCCESS_THRESHOLD;

    let registered = criteria_for(labels.pose).ok();
    let statements = labels
        .entries
        .iter()
        .map(|entry| {
            let text = registered
                .and_then(|r| r.get(&entry.criterion_id))
                .map(|c| c.feedback(entry.achieved).to_string())
                .unwrap_or_else(|| generic_statement(&entry.criterion_id, entry.achieved));
            FeedbackStatement {
                criterion_id: entry.criterion_id.clone(),
                achieved: entry.achieved,
                text,
            }
        })
        .collect();

    let summary = summarize(labels.pose, passed, total, is_successful);
    tracing::debug!("[Feedback] {}", summary);

    FeedbackReport {
        pose: labels.pose,
        success_rate,
        is_successful,
        statements,
        summary,
    }
}

/// Decode a comma-joined label string and build its report.
pub fn synthesize_labels(pose: PoseId, text: &str) -> Result<FeedbackReport, LabelDecodeError> {
    let labels = LabelVector::decode(pose, text)?;
    Ok(synthesize(&labels))
}

fn generic_statement(criterion_id: &str, achieved: bool) -> String {
    let name = criterion_id.replace('_', " ");
    if achieved {
        format!("Good: {}.", name)
    } else {
        format!("Needs work: {}.", name)
    }
}

fn summarize(pose: PoseId, passed: usize, total: usize, is_successful: bool) -> String {
    if total == 0 {
        return format!("No criteria were evaluated for {}.", pose.display_name());
    }
    if is_successful {
        format!(
            "Great job! You met {} of {} checks for {}.",
            passed,
            total,
            pose.display_name()
        )
    } else {
        format!(
            "Keep practicing: {} of {} checks met for {}.",
            passed,
            total,
            pose.display_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LabeledCriterion, Measurement, Unit};

    #[test]
    fn all_pass() {
        let report = synthesize_labels(PoseId::Plank, "1,1,1,1,1").unwrap();
        assert_eq!(report.success_rate, 1.0);
        assert!(report.is_successful);
        assert_eq!(report.percent(), 100);
        assert!(report.statements.iter().all(|s| s.achieved));
    }

    #[test]
    fn all_fail() {
        let report = synthesize_labels(PoseId::Chair, "0,0,0,0,0,0").unwrap();
        assert_eq!(report.success_rate, 0.0);
        assert!(!report.is_successful);
        assert_eq!(report.statements.len(), 6);
    }

    #[test]
    fn sample_warrior_labels() {
        let report = synthesize_labels(PoseId::Warrior2, "1,0,0,1,0,1,0,0,0,0").unwrap();
        assert!((report.success_rate - 0.3).abs() < 1e-12);
        assert!(!report.is_successful);
        assert_eq!(report.statements.len(), 10);
        assert_eq!(report.statements[0].criterion_id, "front_knee_bent");
        assert!(report.statements[0].achieved);
        assert!(report.statements[1].text.contains("ankle"));
    }

    #[test]
    fn threshold_is_strict() {
        // 3 of 5 = 0.6 exactly
        let report = synthesize_labels(PoseId::Plank, "1,1,1,0,0").unwrap();
        assert_eq!(report.success_rate, 0.6);
        assert!(!report.is_successful);

        let report = synthesize_labels(PoseId::Plank, "1,1,1,1,0").unwrap();
        assert!(report.is_successful);
    }

    #[test]
    fn empty_vector() {
        let labels = LabelVector {
            pose: PoseId::Warrior2,
            criteria_version: CRITERIA_VERSION,
            entries: Vec::new(),
        };
        let report = synthesize(&labels);
        assert_eq!(report.success_rate, 0.0);
        assert!(!report.is_successful);
        assert!(report.statements.is_empty());
    }

    #[test]
    fn unknown_criterion_gets_generic_text() {
        let labels = LabelVector {
            pose: PoseId::Plank,
            criteria_version: CRITERIA_VERSION,
            entries: vec![LabeledCriterion {
                criterion_id: "core_engaged".to_string(),
                achieved: false,
                unit: Unit::Ratio,
                measurement: Measurement::Value(0.0),
            }],
        };
        let report = synthesize(&labels);
        assert_eq!(report.statements[0].text, "Needs work: core engaged.");
    }

    #[test]
    fn bad_label_text_is_an_error() {
        assert!(synthesize_labels(PoseId::Plank, "1,0").is_err());
        assert!(synthesize_labels(PoseId::Plank, "yes,no,1,1,0").is_err());
    }
}
