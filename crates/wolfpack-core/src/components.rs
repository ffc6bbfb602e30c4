//! ECS components for hecs entities.
//!
//! Components are plain data structs.
//! Behavior logic lives in the AI crate, not here.

use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_angle, Vec2};

/// Position, velocity and facing of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in radians, kept in (-π, π].
    pub facing: f64,
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: 0.0,
        }
    }

    pub fn set_facing(&mut self, angle: f64) {
        self.facing = normalize_angle(angle);
    }
}

/// Health bookkeeping. Target health is never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f64,
    pub max_health: f64,
    /// Cleared on death; inactive agents are skipped and then despawned.
    pub active: bool,
}

impl Vitals {
    pub fn full(max_health: f64) -> Self {
        Self {
            health: max_health,
            max_health,
            active: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.active && self.health > 0.0
    }

    /// Apply damage, clamping at zero. Negative amounts are ignored.
    /// Returns true if this hit killed the agent.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if !self.is_alive() {
            return false;
        }
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Where the agent was created; patrol routes are generated around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint(pub Vec2);

/// Collision radius reported to renderers and the physics layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Radius(pub f64);
