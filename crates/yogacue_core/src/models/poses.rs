//! Supported yoga poses.

use serde::{Deserialize, Serialize};

/// Closed set of poses the analyzer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseId {
    /// Warrior II, filmed from the front.
    Warrior2,
    /// Chair pose (Utkatasana), filmed from the side.
    Chair,
    /// Plank pose (Phalakasana), filmed from the side.
    Plank,
    /// Warrior II, filmed from behind.
    Warrior2Back,
}

impl PoseId {
    /// All poses in route-id order.
    pub const ALL: [PoseId; 4] = [
        PoseId::Warrior2,
        PoseId::Chair,
        PoseId::Plank,
        PoseId::Warrior2Back,
    ];

    /// Stable identifier used across the request boundary.
    pub fn slug(self) -> &'static str {
        match self {
            PoseId::Warrior2 => "warrior2",
            PoseId::Chair => "chair",
            PoseId::Plank => "plank",
            PoseId::Warrior2Back => "warrior2_back",
        }
    }

    /// Human-readable pose name.
    pub fn display_name(self) -> &'static str {
        match self {
            PoseId::Warrior2 => "Warrior II",
            PoseId::Chair => "Chair Pose (Utkatasana)",
            PoseId::Plank => "Phalakasana (Plank Pose)",
            PoseId::Warrior2Back => "Warrior II Back View",
        }
    }

    /// Numeric id used by the pose pages (`/poses/<id>`).
    pub fn route_id(self) -> u32 {
        match self {
            PoseId::Warrior2 => 1,
            PoseId::Chair => 2,
            PoseId::Plank => 3,
            PoseId::Warrior2Back => 4,
        }
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Accepts the slug, the legacy category names (`warrior`,
    /// `warrior_back`) and the numeric route id. Case and surrounding
    /// whitespace are ignored; `-` is treated like `_`.
    pub fn parse(identifier: &str) -> Option<Self> {
        let normalized = identifier.trim().to_ascii_lowercase().replace('-', "_");
        if let Ok(route_id) = normalized.parse::<u32>() {
            return Self::ALL.into_iter().find(|p| p.route_id() == route_id);
        }
        match normalized.as_str() {
            "warrior2" | "warrior_2" | "warrior_ii" | "warrior" => Some(PoseId::Warrior2),
            "chair" | "utkatasana" => Some(PoseId::Chair),
            "plank" | "phalakasana" => Some(PoseId::Plank),
            "warrior2_back" | "warrior_2_back" | "warrior_back" => Some(PoseId::Warrior2Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for PoseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_and_aliases() {
        assert_eq!(PoseId::parse("warrior2"), Some(PoseId::Warrior2));
        assert_eq!(PoseId::parse("Warrior"), Some(PoseId::Warrior2));
        assert_eq!(PoseId::parse("warrior-back"), Some(PoseId::Warrior2Back));
        assert_eq!(PoseId::parse(" chair "), Some(PoseId::Chair));
    }

    #[test]
    fn parses_route_ids() {
        assert_eq!(PoseId::parse("3"), Some(PoseId::Plank));
        assert_eq!(PoseId::parse("9"), None);
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(PoseId::parse("downward_dog"), None);
        assert_eq!(PoseId::parse(""), None);
    }

    #[test]
    fn slug_round_trips() {
        for pose in PoseId::ALL {
            assert_eq!(PoseId::parse(pose.slug()), Some(pose));
        }
    }
}
