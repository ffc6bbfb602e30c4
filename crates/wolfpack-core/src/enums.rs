//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior state of a single agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Standing still, unaware.
    #[default]
    Idle,
    /// Walking a cyclic waypoint route around the spawn point.
    Patrol,
    /// Heading to a remembered position after a sound or lost sighting.
    Investigate,
    /// Direct pursuit of a visible target.
    Hunt,
    /// Moving to a flank position assigned by the pack.
    Flank,
    /// Fanning out around the last-seen position.
    Search,
}

impl BehaviorState {
    /// Hunt and Flank take part in pack role assignment.
    pub fn is_engaged(self) -> bool {
        matches!(self, BehaviorState::Hunt | BehaviorState::Flank)
    }
}

/// Which side of the target's heading a flanker takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlankSide {
    /// Positive angular offset (counter-clockwise from heading).
    Left,
    /// Negative angular offset.
    Right,
}

impl FlankSide {
    pub fn sign(self) -> f64 {
        match self {
            FlankSide::Left => 1.0,
            FlankSide::Right => -1.0,
        }
    }
}

/// Coordination label within an active hunt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackRole {
    /// Not part of a coordinated hunt.
    #[default]
    Unassigned,
    /// Primary pursuer.
    Hunter,
    /// Takes a position to one side of the target.
    Flanker(FlankSide),
    /// Extra pursuer beyond the flanker quota. Behaves like a hunter.
    Tracker,
}

impl PackRole {
    pub fn flank_side(self) -> Option<FlankSide> {
        match self {
            PackRole::Flanker(side) => Some(side),
            _ => None,
        }
    }
}

/// Agent variant, fixed at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentVariant {
    #[default]
    Standard,
    /// Pack leader with boosted health, speed and damage.
    Alpha,
}

impl AgentVariant {
    pub fn from_alpha(is_alpha: bool) -> Self {
        if is_alpha {
            AgentVariant::Alpha
        } else {
            AgentVariant::Standard
        }
    }

    pub fn is_alpha(self) -> bool {
        self == AgentVariant::Alpha
    }
}
