//! Events emitted by the simulation for combat and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::geometry::Vec2;
use crate::types::AgentId;

/// Something observable happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PackEvent {
    /// An agent changed behavior state.
    StateChanged {
        agent: AgentId,
        from: BehaviorState,
        to: BehaviorState,
    },
    /// An agent struck the target. The owner of the target applies the damage.
    Attack {
        agent: AgentId,
        damage: f64,
        target_position: Vec2,
    },
    /// An agent called nearby pack members toward a target position.
    PackAlerted {
        source: AgentId,
        target_position: Vec2,
        alerted: Vec<AgentId>,
    },
    /// Roles were (re)distributed among engaged agents.
    RolesAssigned { roles: Vec<(AgentId, PackRole)> },
    /// An agent's health reached zero.
    AgentDied { agent: AgentId },
    /// An agent was removed from the pack.
    AgentRemoved { agent: AgentId },
}
