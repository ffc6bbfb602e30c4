//! Variant-specific profiles.
//!
//! Consolidates per-variant parameters so behavior code never branches on
//! the variant directly.

use wolfpack_core::config::Tuning;
use wolfpack_core::constants::*;
use wolfpack_core::enums::AgentVariant;

/// Combat and movement profile for an agent variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentProfile {
    /// Health at spawn.
    pub max_health: f64,
    /// Multiplier applied to every movement speed.
    pub speed_factor: f64,
    /// Damage signalled per attack.
    pub damage: f64,
    /// Collision radius, stored on the agent at spawn.
    pub radius: f64,
}

/// Get the profile for a variant under the given tuning.
pub fn get_profile(variant: AgentVariant, tuning: &Tuning) -> AgentProfile {
    match variant {
        AgentVariant::Standard => AgentProfile {
            max_health: tuning.base_health,
            speed_factor: 1.0,
            damage: tuning.attack_damage,
            radius: tuning.agent_radius,
        },
        AgentVariant::Alpha => AgentProfile {
            max_health: tuning.base_health * ALPHA_HEALTH_FACTOR,
            speed_factor: ALPHA_SPEED_FACTOR,
            damage: tuning.attack_damage * ALPHA_DAMAGE_FACTOR,
            radius: tuning.agent_radius * ALPHA_RADIUS_FACTOR,
        },
    }
}
