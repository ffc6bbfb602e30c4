//! Entity spawn factories for pack agents.

use hecs::{Entity, World};

use wolfpack_core::components::{Kinematics, Radius, SpawnPoint, Vitals};
use wolfpack_core::config::Tuning;
use wolfpack_core::enums::AgentVariant;
use wolfpack_core::geometry::Vec2;
use wolfpack_core::types::AgentId;

use wolfpack_ai::fsm::Brain;
use wolfpack_ai::profiles::get_profile;

/// Spawn an idle agent at `position` with full health for its variant.
pub fn spawn_agent(
    world: &mut World,
    id: AgentId,
    position: Vec2,
    variant: AgentVariant,
    tuning: &Tuning,
) -> Entity {
    let profile = get_profile(variant, tuning);
    world.spawn((
        id,
        Kinematics::at(position),
        Vitals::full(profile.max_health),
        variant,
        SpawnPoint(position),
        Radius(profile.radius),
        Brain::new(),
    ))
}
