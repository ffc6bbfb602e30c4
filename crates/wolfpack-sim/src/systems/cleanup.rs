//! Cleanup system: removes agents that died during the tick.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::info;

use wolfpack_core::components::Vitals;
use wolfpack_core::events::PackEvent;
use wolfpack_core::types::AgentId;

/// Despawn dead agents and drop them from the id index.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    index: &mut BTreeMap<AgentId, Entity>,
    despawn_buffer: &mut Vec<AgentId>,
    events: &mut Vec<PackEvent>,
) {
    despawn_buffer.clear();

    for (&id, &entity) in index.iter() {
        let alive = world
            .get::<&Vitals>(entity)
            .map(|vitals| vitals.is_alive())
            .unwrap_or(false);
        if !alive {
            despawn_buffer.push(id);
        }
    }

    for id in despawn_buffer.drain(..) {
        if let Some(entity) = index.remove(&id) {
            let _ = world.despawn(entity);
            info!(agent = %id, "agent died");
            events.push(PackEvent::AgentDied { agent: id });
        }
    }
}
