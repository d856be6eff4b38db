//! Shared vocabulary types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which projection a pointer event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Top-down planar editing surface (plan pixels)
    Plan,
    /// Perspective 3D scene (meters)
    Scene,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "2D plan"),
            Self::Scene => write!(f, "3D scene"),
        }
    }
}

/// How a view validates an item while it is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPolicy {
    /// Snap to the grid, clamp into the room and collision-check on every
    /// move; a colliding move keeps the last accepted position.
    SnapAndCheckLive,
    /// Only clamp the item centre into the room while moving; round,
    /// clamp and collision-check once on release.
    ClampAndCheckOnRelease,
}

impl DragPolicy {
    /// The policy each view uses unless configured otherwise.
    pub fn default_for(view: ViewKind) -> Self {
        match view {
            ViewKind::Plan => Self::SnapAndCheckLive,
            ViewKind::Scene => Self::ClampAndCheckOnRelease,
        }
    }
}

impl fmt::Display for DragPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapAndCheckLive => write!(f, "snap_and_check_live"),
            Self::ClampAndCheckOnRelease => write!(f, "clamp_and_check_on_release"),
        }
    }
}

impl FromStr for DragPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snap_and_check_live" | "snap" | "live" => Ok(Self::SnapAndCheckLive),
            "clamp_and_check_on_release" | "clamp" | "release" => {
                Ok(Self::ClampAndCheckOnRelease)
            }
            _ => Err(format!("Unknown drag policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies_differ_per_view() {
        assert_eq!(
            DragPolicy::default_for(ViewKind::Plan),
            DragPolicy::SnapAndCheckLive
        );
        assert_eq!(
            DragPolicy::default_for(ViewKind::Scene),
            DragPolicy::ClampAndCheckOnRelease
        );
    }

    #[test]
    fn test_policy_parse_round_trip() {
        for policy in [
            DragPolicy::SnapAndCheckLive,
            DragPolicy::ClampAndCheckOnRelease,
        ] {
            assert_eq!(policy.to_string().parse::<DragPolicy>(), Ok(policy));
        }
        assert!("diagonal".parse::<DragPolicy>().is_err());
    }
}
