//! Cross-frame aggregation of per-frame measurements.
//!
//! Both policies sort their input with `f64::total_cmp`, so the result only
//! depends on the multiset of values, never on frame order.

use serde::{Deserialize, Serialize};

/// How a criterion collapses per-frame values into one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Middle value; mean of the two middle values for even counts.
    Median,
    /// Mean after dropping `trim` of the values from each end
    /// (`floor(n * trim)` values per end, `trim` clamped to `[0, 0.45]`).
    TrimmedMean(f64),
}

impl Aggregate {
    /// Upper bound for the trimmed share on each end.
    const MAX_TRIM: f64 = 0.45;

    /// Aggregate `values`. Returns `None` for an empty slice.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        match *self {
            Aggregate::Median => {
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    Some((sorted[mid - 1] + sorted[mid]) / 2.0)
                } else {
                    Some(sorted[mid])
                }
            }
            Aggregate::TrimmedMean(trim) => {
                let trim = trim.clamp(0.0, Self::MAX_TRIM);
                let cut = (sorted.len() as f64 * trim).floor() as usize;
                let kept = &sorted[cut..sorted.len() - cut];
                Some(kept.iter().sum::<f64>() / kept.len() as f64)
            }
        }
    }

    /// Short description for reports.
    pub fn describe(&self) -> String {
        match self {
            Aggregate::Median => "median".to_string(),
            Aggregate::TrimmedMean(trim) => format!("{:.0}% trimmed mean", trim * 100.0),
        }
    }
}
