//! Fundamental simulation types and per-tick inputs.

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, PackRole};
use crate::geometry::Vec2;

/// Stable agent identifier. Assigned once by the pack and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the environment reports about the prey this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Coarse pre-filter from game systems. When false the target cannot be seen.
    pub visible: bool,
}

impl TargetSnapshot {
    pub fn new(position: Vec2, velocity: Vec2, visible: bool) -> Self {
        Self {
            position,
            velocity,
            visible,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Circular sight blocker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self { position, radius }
    }
}

/// Read-only view of another pack member, taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerSummary {
    pub id: AgentId,
    pub position: Vec2,
    pub state: BehaviorState,
    pub role: PackRole,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of pack-wide updates performed.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp a caller-supplied time step: negative or non-finite becomes zero.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
