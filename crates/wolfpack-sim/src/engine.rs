//! Pack engine: the coordinator of the simulation.
//!
//! `Pack` owns the hecs ECS world of agents, hands out stable ids, steps
//! every agent in id order, applies cross-agent effects (alerts and role
//! assignment), and produces `PackSnapshot`s. Completely headless, enabling
//! deterministic testing.
//!
//! Every accessor and mutator tolerates unknown or removed ids: reads return
//! neutral defaults and writes are no-ops.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use wolfpack_core::components::Vitals;
use wolfpack_core::config::{SimConfig, Tuning};
use wolfpack_core::enums::{AgentVariant, BehaviorState, PackRole};
use wolfpack_core::events::PackEvent;
use wolfpack_core::geometry::Vec2;
use wolfpack_core::state::{AgentView, PackSnapshot};
use wolfpack_core::types::{sanitize_dt, AgentId, Obstacle, SimTime, TargetSnapshot};

use wolfpack_ai::fsm::{Brain, TickOutcome};
use wolfpack_ai::memory::CoverSpot;
use wolfpack_ai::patrol::PatrolRoute;

use crate::systems;
use crate::systems::agent_ai::TickFrame;
use crate::world_setup;

/// A pack of agents hunting a single target.
pub struct Pack {
    world: World,
    /// Live agents by id. Iteration order is the pack's processing order.
    index: BTreeMap<AgentId, Entity>,
    next_id: u32,
    rng: ChaCha8Rng,
    tuning: Tuning,
    time: SimTime,
    events: Vec<PackEvent>,
    despawn_buffer: Vec<AgentId>,
}

impl Pack {
    /// Create an empty pack. `config.tuning` is taken as given; use
    /// `SimConfig::from_toml_str` or `Tuning::validate` to check it first.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            index: BTreeMap::new(),
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            time: SimTime::default(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Add an idle agent at `position`. Ids are never reused.
    pub fn create_agent(&mut self, position: Vec2, is_alpha: bool) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;

        let variant = AgentVariant::from_alpha(is_alpha);
        let entity =
            world_setup::spawn_agent(&mut self.world, id, position, variant, &self.tuning);
        self.index.insert(id, entity);

        info!(agent = %id, alpha = is_alpha, x = position.x, y = position.y, "agent created");
        id
    }

    /// Advance every live agent by `dt` seconds, in id order.
    ///
    /// Alerts raised by an agent reach its peers before they are stepped.
    /// Roles are reconciled after all agents have moved, then dead agents
    /// are removed. The reconcile pass is idempotent: an unchanged engaged
    /// set keeps every role and emits nothing, so running it every tick
    /// cannot oscillate.
    pub fn update(&mut self, dt: f64, target: &TargetSnapshot, obstacles: &[Obstacle]) {
        let dt = sanitize_dt(dt);
        let ids: Vec<AgentId> = self.index.keys().copied().collect();
        for id in ids {
            self.step_agent(id, dt, target, obstacles);
        }

        self.coordinate();
        systems::cleanup::run(
            &mut self.world,
            &mut self.index,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        self.time.advance(dt);
    }

    /// Advance a single agent. Alerts and coordination requests it raises
    /// are applied immediately. No-op for unknown or dead agents.
    pub fn update_agent(
        &mut self,
        id: AgentId,
        dt: f64,
        target: &TargetSnapshot,
        obstacles: &[Obstacle],
    ) {
        self.step_agent(id, sanitize_dt(dt), target, obstacles);
    }

    /// Damage an agent. Returns true if this hit killed it; the body is
    /// removed by the next `update`.
    pub fn take_damage(&mut self, id: AgentId, amount: f64) -> bool {
        let Some(&entity) = self.index.get(&id) else {
            return false;
        };
        let Ok(mut vitals) = self.world.get::<&mut Vitals>(entity) else {
            return false;
        };
        let died = vitals.take_damage(amount);
        if died {
            info!(agent = %id, "agent killed");
        }
        died
    }

    /// Remove an agent from the pack. Remaining roles are reassigned from
    /// the surviving engaged agents. Returns false for unknown ids.
    pub fn remove_agent(&mut self, id: AgentId) -> bool {
        let Some(entity) = self.index.remove(&id) else {
            return false;
        };
        let _ = self.world.despawn(entity);
        info!(agent = %id, remaining = self.index.len(), "agent removed");
        self.events.push(PackEvent::AgentRemoved { agent: id });
        self.coordinate();
        true
    }

    /// Broadcast a sighting from `source` to pack members in range.
    /// Returns the ids that took the alert up.
    pub fn alert_pack_members(&mut self, source: AgentId, target_pos: Vec2) -> Vec<AgentId> {
        systems::coordination::alert_pack_members(
            &mut self.world,
            &self.index,
            source,
            target_pos,
            &self.tuning,
            &mut self.events,
        )
    }

    /// Assign hunter, flanker and tracker roles among engaged agents.
    pub fn coordinate(&mut self) {
        systems::coordination::assign_roles(&mut self.world, &self.index, &mut self.events);
    }

    /// Pin a patrol route on an agent. An idle agent starts walking it at
    /// once. Returns false for unknown or dead agents and empty routes.
    pub fn assign_patrol_route(&mut self, id: AgentId, waypoints: Vec<Vec2>) -> bool {
        let Some(&entity) = self.index.get(&id) else {
            return false;
        };
        let Some(route) = PatrolRoute::pinned(waypoints) else {
            return false;
        };
        let Ok((vitals, brain)) = self.world.query_one_mut::<(&Vitals, &mut Brain)>(entity) else {
            return false;
        };
        if !vitals.is_alive() {
            return false;
        }

        let from = brain.state();
        brain.assign_patrol_route(route);
        let to = brain.state();
        if from != to {
            debug!(agent = %id, ?from, ?to, "state changed");
            self.events.push(PackEvent::StateChanged { agent: id, from, to });
        }
        true
    }

    // ---- Accessors ----

    pub fn agent(&self, id: AgentId) -> Option<AgentView> {
        let &entity = self.index.get(&id)?;
        systems::snapshot::build_agent_view(&self.world, id, entity)
    }

    pub fn position(&self, id: AgentId) -> Vec2 {
        self.agent(id).map(|a| a.position).unwrap_or_default()
    }

    pub fn velocity(&self, id: AgentId) -> Vec2 {
        self.agent(id).map(|a| a.velocity).unwrap_or_default()
    }

    pub fn facing(&self, id: AgentId) -> f64 {
        self.agent(id).map(|a| a.facing).unwrap_or_default()
    }

    pub fn health(&self, id: AgentId) -> f64 {
        self.agent(id).map(|a| a.health).unwrap_or_default()
    }

    pub fn max_health(&self, id: AgentId) -> f64 {
        self.agent(id).map(|a| a.max_health).unwrap_or_default()
    }

    pub fn radius(&self, id: AgentId) -> f64 {
        self.agent(id).map(|a| a.radius).unwrap_or_default()
    }

    pub fn alert_level(&self, id: AgentId) -> f64 {
        self.agent(id).map(|a| a.alert_level).unwrap_or_default()
    }

    pub fn state(&self, id: AgentId) -> BehaviorState {
        self.agent(id).map(|a| a.state).unwrap_or_default()
    }

    pub fn role(&self, id: AgentId) -> PackRole {
        self.agent(id).map(|a| a.role).unwrap_or_default()
    }

    pub fn is_alpha(&self, id: AgentId) -> bool {
        self.agent(id).is_some_and(|a| a.is_alpha)
    }

    pub fn is_active(&self, id: AgentId) -> bool {
        self.agent(id).is_some_and(|a| a.active)
    }

    pub fn last_seen_position(&self, id: AgentId) -> Option<Vec2> {
        self.agent(id).and_then(|a| a.last_seen_position)
    }

    /// Hiding spots found during the agent's current search, best first.
    pub fn cover_spots(&self, id: AgentId) -> Vec<CoverSpot> {
        self.index
            .get(&id)
            .and_then(|&entity| self.world.get::<&Brain>(entity).ok())
            .map(|brain| brain.memory().cover_spots().to_vec())
            .unwrap_or_default()
    }

    /// Ids of live agents, ascending.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.index
            .keys()
            .copied()
            .filter(|&id| self.is_active(id))
            .collect()
    }

    /// Number of live agents.
    pub fn pack_size(&self) -> usize {
        self.agent_ids().len()
    }

    pub fn snapshot(&self) -> PackSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.index, self.time)
    }

    /// Take all events buffered since the last call.
    pub fn drain_events(&mut self) -> Vec<PackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn step_agent(&mut self, id: AgentId, dt: f64, target: &TargetSnapshot, obstacles: &[Obstacle]) {
        let Some(&entity) = self.index.get(&id) else {
            return;
        };
        let frame = TickFrame {
            dt,
            target,
            obstacles,
        };
        let Some(outcome) =
            systems::agent_ai::run(&mut self.world, entity, &frame, &self.tuning, &mut self.rng)
        else {
            return;
        };
        self.apply_outcome(id, outcome, target);
    }

    fn apply_outcome(&mut self, id: AgentId, outcome: TickOutcome, target: &TargetSnapshot) {
        if let Some((from, to)) = outcome.transition {
            debug!(agent = %id, ?from, ?to, "state changed");
            self.events.push(PackEvent::StateChanged { agent: id, from, to });
        }

        if let Some(damage) = outcome.attack {
            trace!(agent = %id, damage, "attack");
            self.events.push(PackEvent::Attack {
                agent: id,
                damage,
                target_position: target.position,
            });
        }

        if let Some(target_pos) = outcome.alert {
            self.alert_pack_members(id, target_pos);
        }

        if outcome.coordination_requested {
            self.coordinate();
        }
    }
}
