//! Pose → criteria registry.
//!
//! Built once on first use and read-only afterwards.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::criterion::Criterion;
use super::poses;
use crate::models::PoseId;

/// Version of the criterion order contract.
///
/// Label positions in encoded vectors refer to this version of the tables.
pub const CRITERIA_VERSION: u32 = 1;

/// No criteria are registered for the requested pose.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown pose '{identifier}'")]
pub struct UnknownPoseError {
    pub identifier: String,
}

impl UnknownPoseError {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// Registered criteria for one pose.
#[derive(Debug, Clone, Copy)]
pub struct PoseCriteria {
    pub pose: PoseId,
    pub version: u32,
    pub criteria: &'static [Criterion],
}

impl PoseCriteria {
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Find a criterion by id.
    pub fn get(&self, id: &str) -> Option<&'static Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }
}

static REGISTRY: Lazy<BTreeMap<PoseId, PoseCriteria>> = Lazy::new(|| {
    let registry: BTreeMap<PoseId, PoseCriteria> = PoseId::ALL
        .into_iter()
        .map(|pose| {
            (
                pose,
                PoseCriteria {
                    pose,
                    version: CRITERIA_VERSION,
                    criteria: poses::criteria(pose),
                },
            )
        })
        .filter(|(_, entry)| !entry.is_empty())
        .collect();
    tracing::debug!(
        "[Classify] Criteria registry v{} built for {} poses",
        CRITERIA_VERSION,
        registry.len()
    );
    registry
});

/// Criteria registered for a pose.
pub fn criteria_for(pose: PoseId) -> Result<&'static PoseCriteria, UnknownPoseError> {
    REGISTRY
        .get(&pose)
        .ok_or_else(|| UnknownPoseError::new(pose.slug()))
}

/// Resolve a caller-supplied pose identifier (slug, alias or route id).
pub fn lookup(identifier: &str) -> Result<&'static PoseCriteria, UnknownPoseError> {
    PoseId::parse(identifier)
        .ok_or_else(|| UnknownPoseError::new(identifier))
        .and_then(criteria_for)
        .map_err(|_| UnknownPoseError::new(identifier))
}

/// Every registered pose, in route-id order.
pub fn registered_poses() -> Vec<PoseId> {
    REGISTRY.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pose_registered() {
        assert_eq!(registered_poses(), PoseId::ALL.to_vec());
        for pose in PoseId::ALL {
            let entry = criteria_for(pose).unwrap();
            assert_eq!(entry.pose, pose);
            assert_eq!(entry.version, CRITERIA_VERSION);
        }
    }

    #[test]
    fn lookup_by_slug_alias_and_route() {
        assert_eq!(lookup("warrior2").unwrap().pose, PoseId::Warrior2);
        assert_eq!(lookup("warrior").unwrap().len(), 10);
        assert_eq!(lookup("3").unwrap().pose, PoseId::Plank);
        assert_eq!(lookup("Warrior-Back").unwrap().pose, PoseId::Warrior2Back);
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = lookup("downward_dog").unwrap_err();
        assert_eq!(err.identifier, "downward_dog");
        assert!(lookup("").is_err());
        assert!(lookup("9").is_err());
    }

    #[test]
    fn get_criterion_by_id() {
        let entry = criteria_for(PoseId::Plank).unwrap();
        assert!(entry.get("body_line").is_some());
        assert!(entry.get("front_knee_bent").is_none());
    }
}
