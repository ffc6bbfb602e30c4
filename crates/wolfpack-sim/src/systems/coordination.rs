//! Pack coordination: alert propagation and role assignment.
//!
//! Both operations iterate agents in id order and are idempotent for the
//! same inputs within a tick.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::debug;

use wolfpack_core::components::{Kinematics, Vitals};
use wolfpack_core::config::Tuning;
use wolfpack_core::events::PackEvent;
use wolfpack_core::geometry::{distance, Vec2};
use wolfpack_core::types::AgentId;

use wolfpack_ai::fsm::Brain;
use wolfpack_ai::roles::plan_roles;

/// Call pack members within communication range of `source` toward
/// `target_pos`.
///
/// Members closer than half the range join the hunt directly, the rest
/// investigate. Engaged members are left alone and a dead source alerts
/// nobody. Returns the ids that took the alert up.
pub fn alert_pack_members(
    world: &mut World,
    index: &BTreeMap<AgentId, Entity>,
    source: AgentId,
    target_pos: Vec2,
    tuning: &Tuning,
    events: &mut Vec<PackEvent>,
) -> Vec<AgentId> {
    let Some(&source_entity) = index.get(&source) else {
        return Vec::new();
    };
    let origin = match world.query_one_mut::<(&Kinematics, &Vitals)>(source_entity) {
        Ok((body, vitals)) if vitals.is_alive() => body.position,
        _ => return Vec::new(),
    };

    let close_range = tuning.communication_range / 2.0;
    let mut alerted = Vec::new();

    for (&id, &entity) in index {
        if id == source {
            continue;
        }
        let Ok((body, vitals, brain)) =
            world.query_one_mut::<(&Kinematics, &Vitals, &mut Brain)>(entity)
        else {
            continue;
        };
        if !vitals.is_alive() {
            continue;
        }

        let dist = distance(origin, body.position);
        if dist >= tuning.communication_range {
            continue;
        }

        let from = brain.state();
        if brain.receive_alert(target_pos, dist < close_range, tuning) {
            alerted.push(id);
            let to = brain.state();
            if from != to {
                events.push(PackEvent::StateChanged { agent: id, from, to });
            }
        }
    }

    if !alerted.is_empty() {
        debug!(
            source = %source,
            count = alerted.len(),
            x = target_pos.x,
            y = target_pos.y,
            "pack alerted"
        );
        events.push(PackEvent::PackAlerted {
            source,
            target_position: target_pos,
            alerted: alerted.clone(),
        });
    }

    alerted
}

/// Distribute roles among live agents in Hunt or Flank, in id order.
///
/// The engaged set is derived fresh on every call. Returns true if any
/// agent's role changed.
pub fn assign_roles(
    world: &mut World,
    index: &BTreeMap<AgentId, Entity>,
    events: &mut Vec<PackEvent>,
) -> bool {
    let engaged: Vec<AgentId> = index
        .iter()
        .filter(|&(_, &entity)| is_engaged(world, entity))
        .map(|(&id, _)| id)
        .collect();
    if engaged.is_empty() {
        return false;
    }

    let plan = plan_roles(&engaged);
    let mut changed = false;

    for &(id, role) in &plan {
        let Some(&entity) = index.get(&id) else {
            continue;
        };
        let Ok(brain) = world.query_one_mut::<&mut Brain>(entity) else {
            continue;
        };
        changed |= brain.role() != role;
        if let Some((from, to)) = brain.apply_role(role) {
            events.push(PackEvent::StateChanged { agent: id, from, to });
        }
    }

    if changed {
        debug!(engaged = plan.len(), "roles assigned");
        events.push(PackEvent::RolesAssigned { roles: plan });
    }
    changed
}

fn is_engaged(world: &World, entity: Entity) -> bool {
    let Ok(mut query) = world.query_one::<(&Vitals, &Brain)>(entity) else {
        return false;
    };
    query
        .get()
        .is_some_and(|(vitals, brain)| vitals.is_alive() && brain.state().is_engaged())
}
