//! Read-only views of pack state for renderers and combat systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::geometry::Vec2;
use crate::types::{AgentId, SimTime};

/// Everything an external system may observe about one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians, in (-π, π].
    pub facing: f64,
    pub health: f64,
    pub max_health: f64,
    pub radius: f64,
    /// 0 = unaware, 1 = suspicious, 2 = engaged.
    pub alert_level: f64,
    pub state: BehaviorState,
    pub role: PackRole,
    pub is_alpha: bool,
    pub active: bool,
    pub last_seen_position: Option<Vec2>,
}

/// Complete pack state after a tick, agents ordered by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackSnapshot {
    pub time: SimTime,
    pub agents: Vec<AgentView>,
}
