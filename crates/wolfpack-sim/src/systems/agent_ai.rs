//! Agent AI system: steps one agent through the behavior state machine.
//!
//! Peer state is captured before the agent is borrowed mutably, so every
//! agent reads a consistent view of the others.

use hecs::{Entity, World};
use rand::Rng;

use wolfpack_core::components::{Kinematics, SpawnPoint, Vitals};
use wolfpack_core::config::Tuning;
use wolfpack_core::enums::AgentVariant;
use wolfpack_core::types::{AgentId, Obstacle, PeerSummary, TargetSnapshot};

use wolfpack_ai::fsm::{step, AgentTraits, Brain, TickInput, TickOutcome};
use wolfpack_ai::profiles::get_profile;

/// Environment shared by every agent stepped in the same tick.
pub struct TickFrame<'a> {
    pub dt: f64,
    pub target: &'a TargetSnapshot,
    pub obstacles: &'a [Obstacle],
}

/// Step the agent stored at `entity`.
///
/// Returns `None` if the entity is missing or the agent is dead.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    frame: &TickFrame<'_>,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<TickOutcome> {
    let peers = collect_peers(world, entity);

    let (body, brain, vitals, variant, spawn) = world
        .query_one_mut::<(&mut Kinematics, &mut Brain, &Vitals, &AgentVariant, &SpawnPoint)>(
            entity,
        )
        .ok()?;
    if !vitals.is_alive() {
        return None;
    }

    let traits = AgentTraits {
        profile: get_profile(*variant, tuning),
        spawn: spawn.0,
    };
    let input = TickInput {
        dt: frame.dt,
        target: frame.target,
        obstacles: frame.obstacles,
        peers: &peers,
    };
    Some(step(body, brain, &traits, &input, tuning, rng))
}

/// Live agents other than `me`, ordered by id.
fn collect_peers(world: &World, me: Entity) -> Vec<PeerSummary> {
    let mut peers: Vec<PeerSummary> = world
        .query::<(&AgentId, &Kinematics, &Vitals, &Brain)>()
        .iter()
        .filter(|(entity, (_, _, vitals, _))| *entity != me && vitals.is_alive())
        .map(|(_, (id, body, _, brain))| PeerSummary {
            id: *id,
            position: body.position,
            state: brain.state(),
            role: brain.role(),
        })
        .collect();

    peers.sort_by_key(|peer| peer.id);
    peers
}
