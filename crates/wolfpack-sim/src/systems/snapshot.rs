//! Snapshot system: builds read-only views of the pack.
//!
//! This system never modifies the world.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use wolfpack_core::components::{Kinematics, Radius, Vitals};
use wolfpack_core::enums::AgentVariant;
use wolfpack_core::state::{AgentView, PackSnapshot};
use wolfpack_core::types::{AgentId, SimTime};

use wolfpack_ai::fsm::Brain;

/// Build a complete `PackSnapshot`, agents ordered by id.
pub fn build_snapshot(
    world: &World,
    index: &BTreeMap<AgentId, Entity>,
    time: SimTime,
) -> PackSnapshot {
    PackSnapshot {
        time,
        agents: index
            .iter()
            .filter_map(|(&id, &entity)| build_agent_view(world, id, entity))
            .collect(),
    }
}

/// View of a single agent, or `None` if the entity no longer exists.
pub fn build_agent_view(world: &World, id: AgentId, entity: Entity) -> Option<AgentView> {
    let mut query = world
        .query_one::<(&Kinematics, &Vitals, &Radius, &AgentVariant, &Brain)>(entity)
        .ok()?;
    let (body, vitals, radius, variant, brain) = query.get()?;

    Some(AgentView {
        id,
        position: body.position,
        velocity: body.velocity,
        facing: body.facing,
        health: vitals.health,
        max_health: vitals.max_health,
        radius: radius.0,
        alert_level: brain.alert_level(),
        state: brain.state(),
        role: brain.role(),
        is_alpha: variant.is_alpha(),
        active: vitals.is_alive(),
        last_seen_position: brain.memory().last_seen_position(),
    })
}
