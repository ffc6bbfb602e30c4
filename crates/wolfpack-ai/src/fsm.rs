//! Agent behavior finite state machine.
//!
//! One `step` per agent per tick: tick timers, sample perception, record
//! memory, run the handler for the current state, prune memory. Operates on
//! plain data; the pack engine owns storage and applies cross-agent effects
//! (alerts, role assignment) reported through `TickOutcome`.

use rand::Rng;

use wolfpack_core::components::Kinematics;
use wolfpack_core::config::Tuning;
use wolfpack_core::constants::{ALERT_ENGAGED, ALERT_SUSPICIOUS, ALERT_UNAWARE};
use wolfpack_core::enums::{BehaviorState, PackRole};
use wolfpack_core::geometry::{distance, Vec2};
use wolfpack_core::types::{sanitize_dt, Obstacle, PeerSummary, TargetSnapshot};

use crate::memory::{Memory, SoundEvent};
use crate::movement::{
    calculate_flanking_position, calculate_intercept_point, face_towards, move_towards,
};
use crate::patrol::PatrolRoute;
use crate::perception::{can_see, has_sound_cue};
use crate::profiles::AgentProfile;
use crate::search::{scan_cover_spots, search_point};

/// Per-agent behavior state. Every timer lives here, never shared.
#[derive(Debug, Clone, Default)]
pub struct Brain {
    state: BehaviorState,
    role: PackRole,
    alert_level: f64,
    memory: Memory,
    patrol: PatrolRoute,
    /// Agent-local simulation time; sum of every clamped dt seen.
    clock: f64,
    investigate_timer: f64,
    communication_cooldown: f64,
    attack_cooldown: f64,
    search_sector: u32,
    search_elapsed: f64,
    search_center: Vec2,
    /// Heading latched on the first Flank tick, used while the target stands still.
    flank_heading: Option<f64>,
}

/// Fixed facts about the agent being stepped.
#[derive(Debug, Clone, Copy)]
pub struct AgentTraits {
    pub profile: AgentProfile,
    pub spawn: Vec2,
}

/// World inputs for one step.
pub struct TickInput<'a> {
    pub dt: f64,
    pub target: &'a TargetSnapshot,
    pub obstacles: &'a [Obstacle],
    /// Other live pack members. Never contains the agent being stepped.
    pub peers: &'a [PeerSummary],
}

/// Effects of a step that reach beyond the agent itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// State at the start and end of the step, if they differ.
    pub transition: Option<(BehaviorState, BehaviorState)>,
    /// Pack members should be alerted toward this position.
    pub alert: Option<Vec2>,
    /// The agent asks the pack to (re)assign roles.
    pub coordination_requested: bool,
    /// Damage signalled to the target this step.
    pub attack: Option<f64>,
}

struct Frame<'a> {
    dt: f64,
    now: f64,
    sees: bool,
    heard: Option<SoundEvent>,
    input: &'a TickInput<'a>,
    traits: &'a AgentTraits,
    tuning: &'a Tuning,
}

impl Frame<'_> {
    fn target(&self) -> &TargetSnapshot {
        self.input.target
    }

    fn speed(&self, base: f64) -> f64 {
        base * self.traits.profile.speed_factor
    }
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn role(&self) -> PackRole {
        self.role
    }

    /// 0 = unaware, 1 = suspicious, 2 = engaged.
    pub fn alert_level(&self) -> f64 {
        self.alert_level
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn patrol(&self) -> &PatrolRoute {
        &self.patrol
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn investigate_timer(&self) -> f64 {
        self.investigate_timer
    }

    pub fn attack_cooldown(&self) -> f64 {
        self.attack_cooldown
    }

    pub fn communication_cooldown(&self) -> f64 {
        self.communication_cooldown
    }

    pub fn search_sector(&self) -> u32 {
        self.search_sector
    }

    pub fn search_elapsed(&self) -> f64 {
        self.search_elapsed
    }

    fn raise_alert(&mut self, level: f64) {
        self.alert_level = self.alert_level.max(level).clamp(ALERT_UNAWARE, ALERT_ENGAGED);
    }

    fn reset_search(&mut self) {
        self.search_sector = 0;
        self.search_elapsed = 0.0;
    }

    /// Direct sighting: pursue and remember where the target is.
    pub fn enter_hunt(&mut self, target_pos: Vec2) {
        self.state = BehaviorState::Hunt;
        self.memory.record_sighting(target_pos, self.clock);
        self.raise_alert(ALERT_ENGAGED);
        self.reset_search();
    }

    /// Triggered investigation (sound or pack alert). Refreshes the sighting.
    pub fn enter_investigate(&mut self, position: Vec2, tuning: &Tuning) {
        self.memory.record_sighting(position, self.clock);
        self.resume_investigate(tuning);
    }

    /// Investigate the existing sighting without refreshing its timestamp.
    fn resume_investigate(&mut self, tuning: &Tuning) {
        self.state = BehaviorState::Investigate;
        self.role = PackRole::Unassigned;
        self.investigate_timer = tuning.investigate_timeout_secs;
        self.raise_alert(ALERT_SUSPICIOUS);
    }

    /// Fan out around the last sighting, or `fallback_center` if there is none.
    pub fn enter_search(&mut self, fallback_center: Vec2) {
        self.state = BehaviorState::Search;
        self.role = PackRole::Unassigned;
        self.search_center = self.memory.last_seen_position().unwrap_or(fallback_center);
        self.memory.clear_cover_spots();
        self.reset_search();
        self.raise_alert(ALERT_SUSPICIOUS);
    }

    /// Lose interest. The only transition that lowers the alert level.
    pub fn enter_idle(&mut self) {
        self.state = BehaviorState::Idle;
        self.role = PackRole::Unassigned;
        self.alert_level = ALERT_UNAWARE;
        self.investigate_timer = 0.0;
        self.reset_search();
    }

    /// Start patrolling, regenerating the route unless it was pinned.
    pub fn enter_patrol<R: Rng + ?Sized>(&mut self, spawn: Vec2, tuning: &Tuning, rng: &mut R) {
        if self.patrol.is_pinned() && !self.patrol.is_empty() {
            self.patrol.restart();
        } else {
            self.patrol = PatrolRoute::generate(spawn, tuning, rng);
        }
        self.state = BehaviorState::Patrol;
        self.role = PackRole::Unassigned;
    }

    /// Replace the patrol route. An idle agent starts walking it immediately.
    pub fn assign_patrol_route(&mut self, route: PatrolRoute) {
        self.patrol = route;
        if self.state == BehaviorState::Idle {
            self.state = BehaviorState::Patrol;
            self.role = PackRole::Unassigned;
        }
    }

    /// Pack member called for help toward `target_pos`.
    ///
    /// Engaged agents ignore alerts. `close` agents join the hunt directly,
    /// the rest investigate. Returns whether the alert was taken up.
    pub fn receive_alert(&mut self, target_pos: Vec2, close: bool, tuning: &Tuning) -> bool {
        if self.state.is_engaged() {
            return false;
        }
        if close {
            self.role = PackRole::Unassigned;
            self.enter_hunt(target_pos);
        } else {
            self.enter_investigate(target_pos, tuning);
        }
        true
    }

    /// Take a role from the pack coordinator.
    ///
    /// Ignored unless engaged. A hunter newly made flanker moves to Flank;
    /// re-applying the same role changes nothing.
    pub fn apply_role(&mut self, role: PackRole) -> Option<(BehaviorState, BehaviorState)> {
        if !self.state.is_engaged() {
            return None;
        }
        let previous = self.role;
        self.role = role;
        if self.state == BehaviorState::Hunt && role.flank_side().is_some() && previous != role {
            self.state = BehaviorState::Flank;
            self.flank_heading = None;
            return Some((BehaviorState::Hunt, BehaviorState::Flank));
        }
        None
    }

    fn tick_timers(&mut self, dt: f64) {
        self.clock += dt;
        self.communication_cooldown = (self.communication_cooldown - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
    }
}

/// Advance one agent by one tick.
pub fn step<R: Rng + ?Sized>(
    body: &mut Kinematics,
    brain: &mut Brain,
    traits: &AgentTraits,
    input: &TickInput<'_>,
    tuning: &Tuning,
    rng: &mut R,
) -> TickOutcome {
    let dt = sanitize_dt(input.dt);
    let start_state = brain.state;

    brain.tick_timers(dt);
    let now = brain.clock;

    let sees = can_see(body, input.target, input.obstacles, tuning);
    let heard = has_sound_cue(body, input.target, now, tuning);
    if let Some(sound) = heard {
        brain.memory.record_sound(sound);
    }

    let frame = Frame {
        dt,
        now,
        sees,
        heard,
        input,
        traits,
        tuning,
    };
    let mut outcome = TickOutcome::default();

    match brain.state {
        BehaviorState::Idle => handle_idle(body, brain, &frame, rng, &mut outcome),
        BehaviorState::Patrol => handle_patrol(body, brain, &frame, rng, &mut outcome),
        BehaviorState::Investigate => handle_investigate(body, brain, &frame, &mut outcome),
        BehaviorState::Hunt => handle_hunt(body, brain, &frame, &mut outcome),
        BehaviorState::Flank => handle_flank(body, brain, &frame),
        BehaviorState::Search => handle_search(body, brain, &frame, &mut outcome),
    }

    if brain.state == BehaviorState::Idle {
        body.velocity = Vec2::ZERO;
    }

    brain
        .memory
        .prune(now, tuning.memory_duration_secs, tuning.max_sound_memory);

    if brain.state != start_state {
        outcome.transition = Some((start_state, brain.state));
    }
    outcome
}

/// Shared reaction to sight or sound. Returns true if a transition happened.
fn react_to_senses(brain: &mut Brain, frame: &Frame<'_>, outcome: &mut TickOutcome) -> bool {
    if frame.sees {
        let target_pos = frame.target().position;
        brain.enter_hunt(target_pos);
        outcome.alert = Some(target_pos);
        return true;
    }
    if let Some(sound) = frame.heard {
        brain.enter_investigate(sound.position, frame.tuning);
        return true;
    }
    false
}

fn handle_idle<R: Rng + ?Sized>(
    body: &mut Kinematics,
    brain: &mut Brain,
    frame: &Frame<'_>,
    rng: &mut R,
    outcome: &mut TickOutcome,
) {
    body.velocity = Vec2::ZERO;
    if react_to_senses(brain, frame, outcome) {
        return;
    }
    if rng.gen::<f64>() < frame.tuning.idle_patrol_chance {
        brain.enter_patrol(frame.traits.spawn, frame.tuning, rng);
    }
}

fn handle_patrol<R: Rng + ?Sized>(
    body: &mut Kinematics,
    brain: &mut Brain,
    frame: &Frame<'_>,
    rng: &mut R,
    outcome: &mut TickOutcome,
) {
    if react_to_senses(brain, frame, outcome) {
        return;
    }

    if brain.patrol.is_empty() {
        brain.patrol = PatrolRoute::generate(frame.traits.spawn, frame.tuning, rng);
    }
    let Some(waypoint) = brain.patrol.current() else {
        return;
    };

    if distance(body.position, waypoint) < frame.tuning.waypoint_arrival_radius {
        brain.patrol.advance();
    } else {
        move_towards(body, waypoint, frame.speed(frame.tuning.walk_speed), frame.dt);
    }
}

fn handle_investigate(
    body: &mut Kinematics,
    brain: &mut Brain,
    frame: &Frame<'_>,
    outcome: &mut TickOutcome,
) {
    let tuning = frame.tuning;

    if frame.sees {
        react_to_senses(brain, frame, outcome);
        return;
    }
    // A persisting sound keeps the investigation alive at the newest position.
    if let Some(sound) = frame.heard {
        brain.enter_investigate(sound.position, tuning);
    }

    if !brain.memory.is_fresh(frame.now, tuning.memory_duration_secs) {
        brain.enter_search(body.position);
        return;
    }

    let goal = brain.memory.last_seen_position().unwrap_or(body.position);
    if distance(body.position, goal) < tuning.point_arrival_radius {
        brain.enter_search(body.position);
        return;
    }

    move_towards(body, goal, frame.speed(tuning.investigate_speed), frame.dt);
    let sweep = (frame.now * tuning.look_around_frequency).sin() * tuning.look_around_amplitude;
    body.set_facing(body.facing + sweep);

    brain.investigate_timer -= frame.dt;
    if brain.investigate_timer <= 0.0 {
        brain.enter_search(body.position);
    }
}

fn handle_hunt(
    body: &mut Kinematics,
    brain: &mut Brain,
    frame: &Frame<'_>,
    outcome: &mut TickOutcome,
) {
    let tuning = frame.tuning;

    if !frame.sees {
        if brain.memory.is_fresh(frame.now, tuning.memory_duration_secs) {
            brain.resume_investigate(tuning);
        } else {
            brain.enter_search(body.position);
        }
        return;
    }

    let target = frame.target();
    brain.memory.record_sighting(target.position, frame.now);
    brain.raise_alert(ALERT_ENGAGED);

    if brain.communication_cooldown <= 0.0 {
        let engaged_nearby = frame.input.peers.iter().any(|peer| {
            peer.state.is_engaged()
                && distance(peer.position, body.position) < tuning.communication_range
        });
        if engaged_nearby {
            outcome.coordination_requested = true;
            brain.communication_cooldown = tuning.communication_cooldown_secs;
        }
    }

    if distance(body.position, target.position) <= tuning.attack_range {
        body.velocity = Vec2::ZERO;
        face_towards(body, target.position);
        if brain.attack_cooldown <= 0.0 {
            outcome.attack = Some(frame.traits.profile.damage);
            brain.attack_cooldown = tuning.attack_cooldown_secs;
        }
    } else {
        let aim = calculate_intercept_point(target.position, target.velocity, tuning);
        move_towards(body, aim, frame.speed(tuning.run_speed), frame.dt);
    }

    outcome.alert = Some(target.position);
}

fn handle_flank(body: &mut Kinematics, brain: &mut Brain, frame: &Frame<'_>) {
    let tuning = frame.tuning;

    let Some(side) = brain.role.flank_side() else {
        brain.state = BehaviorState::Hunt;
        brain.flank_heading = None;
        return;
    };

    let target = frame.target();
    if frame.sees {
        brain.memory.record_sighting(target.position, frame.now);
    }

    let fallback = *brain.flank_heading.get_or_insert(body.facing);
    let goal = calculate_flanking_position(target.position, target.velocity, side, fallback, tuning);
    if distance(body.position, goal) < tuning.point_arrival_radius {
        brain.state = BehaviorState::Hunt;
        brain.flank_heading = None;
        face_towards(body, target.position);
        return;
    }

    move_towards(body, goal, frame.speed(tuning.run_speed), frame.dt);
}

fn handle_search(
    body: &mut Kinematics,
    brain: &mut Brain,
    frame: &Frame<'_>,
    outcome: &mut TickOutcome,
) {
    let tuning = frame.tuning;

    if react_to_senses(brain, frame, outcome) {
        return;
    }

    brain.search_elapsed += frame.dt;
    if brain.search_elapsed > tuning.search_give_up_secs() {
        brain.enter_idle();
        return;
    }

    let point = search_point(brain.search_center, brain.search_sector, tuning);
    if distance(body.position, point) < tuning.waypoint_arrival_radius {
        let spots = scan_cover_spots(brain.search_center, frame.input.obstacles, tuning);
        brain.memory.set_cover_spots(spots);
        brain.search_sector += 1;
        if brain.search_sector >= tuning.search_sectors {
            brain.enter_idle();
        }
        return;
    }

    move_towards(body, point, frame.speed(tuning.investigate_speed), frame.dt);
}
