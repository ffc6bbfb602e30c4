//! Simulation constants and default tuning parameters.
//!
//! Distances are world units, times are seconds, angles are radians.
//! These seed `Tuning::default()`; the running simulation reads `Tuning`.

use std::f64::consts::PI;

// --- Perception ---

/// Maximum distance at which an agent can see the target.
pub const SIGHT_RANGE: f64 = 400.0;

/// Maximum distance at which an agent can hear the target. Must exceed sight range.
pub const HEARING_RANGE: f64 = 600.0;

/// Full width of the vision cone (120°).
pub const VISION_CONE_ANGLE: f64 = 2.0 * PI / 3.0;

/// Target speed above which movement makes audible noise.
pub const MOVEMENT_NOISE_THRESHOLD: f64 = 150.0;

/// Target speed above which noise is recorded at the louder intensity tier.
pub const LOUD_NOISE_THRESHOLD: f64 = 200.0;

/// Intensity of a sound produced above the noise threshold.
pub const SOUND_INTENSITY_QUIET: f64 = 1.0;

/// Intensity of a sound produced above the loud threshold.
pub const SOUND_INTENSITY_LOUD: f64 = 2.0;

// --- Memory ---

/// How long a sighting or sound stays relevant (seconds).
pub const MEMORY_DURATION_SECS: f64 = 5.0;

/// Maximum number of sound events retained per agent.
pub const MAX_SOUND_MEMORY: usize = 5;

// --- Movement ---

/// Patrol speed.
pub const WALK_SPEED: f64 = 100.0;

/// Cautious approach speed used by Investigate and Search.
pub const INVESTIGATE_SPEED: f64 = 150.0;

/// Pursuit speed used by Hunt and Flank.
pub const RUN_SPEED: f64 = 250.0;

/// Seconds of linear extrapolation for the intercept point.
pub const INTERCEPT_LOOKAHEAD_SECS: f64 = 1.5;

/// Target speeds below this are treated as stationary.
pub const STATIONARY_SPEED_EPSILON: f64 = 0.01;

/// Distance from the target a flanker tries to hold.
pub const FLANK_DISTANCE: f64 = 200.0;

/// Angular offset from the target's heading for flank positions (60°).
pub const FLANK_ANGLE: f64 = PI / 3.0;

// --- Arrival thresholds ---

/// Distance at which a patrol or search waypoint counts as reached.
pub const WAYPOINT_ARRIVAL_RADIUS: f64 = 30.0;

/// Distance at which an investigate point or flank position counts as reached.
pub const POINT_ARRIVAL_RADIUS: f64 = 50.0;

// --- Combat ---

/// Maximum distance to the target for an attack.
pub const ATTACK_RANGE: f64 = 50.0;

/// Seconds between attacks.
pub const ATTACK_COOLDOWN_SECS: f64 = 1.0;

/// Damage signalled per attack by a standard agent.
pub const ATTACK_DAMAGE: f64 = 10.0;

/// Health of a standard agent.
pub const BASE_HEALTH: f64 = 100.0;

/// Collision radius of a standard agent.
pub const AGENT_RADIUS: f64 = 20.0;

// --- Pack coordination ---

/// Maximum distance for alerts and coordination requests.
pub const COMMUNICATION_RANGE: f64 = 500.0;

/// Seconds between coordination requests from the same agent.
pub const COMMUNICATION_COOLDOWN_SECS: f64 = 2.0;

/// Number of flankers assigned per hunt.
pub const MAX_FLANKERS: usize = 2;

// --- Behavior timing ---

/// Seconds an agent investigates before giving up and searching.
pub const INVESTIGATE_TIMEOUT_SECS: f64 = 3.0;

/// Per-tick probability that an idle agent starts patrolling.
pub const IDLE_PATROL_CHANCE: f64 = 0.01;

/// Look-around yaw amplitude while investigating (radians).
pub const LOOK_AROUND_AMPLITUDE: f64 = 0.5;

/// Look-around oscillation frequency (radians per second of agent clock).
pub const LOOK_AROUND_FREQUENCY: f64 = 3.0;

// --- Patrol route generation ---

/// Minimum number of waypoints in a generated patrol route.
pub const PATROL_MIN_POINTS: usize = 4;

/// Number of extra waypoints a route may randomly gain.
pub const PATROL_EXTRA_POINTS: usize = 2;

/// Minimum patrol radius around the spawn point.
pub const PATROL_MIN_RADIUS: f64 = 200.0;

/// Random extra radius added to the patrol radius.
pub const PATROL_RADIUS_JITTER: f64 = 100.0;

/// Maximum random angular jitter per waypoint (radians).
pub const PATROL_ANGLE_JITTER: f64 = 0.5;

// --- Search pattern ---

/// Number of sectors in the search fan.
pub const SEARCH_SECTORS: u32 = 8;

/// Radius of the first search point around the last-seen position.
pub const SEARCH_BASE_RADIUS: f64 = 100.0;

/// Radius added per search sector.
pub const SEARCH_RADIUS_STEP: f64 = 50.0;

/// Search gives up after this multiple of the memory duration.
pub const SEARCH_GIVE_UP_FACTOR: f64 = 2.0;

/// Obstacles within this distance of the last-seen position are cover candidates.
pub const COVER_SCAN_RADIUS: f64 = 200.0;

/// Gap between an obstacle's edge and the recorded cover spot.
pub const COVER_STANDOFF: f64 = 30.0;

// --- Alpha variant multipliers ---

pub const ALPHA_HEALTH_FACTOR: f64 = 1.5;
pub const ALPHA_DAMAGE_FACTOR: f64 = 1.2;
pub const ALPHA_RADIUS_FACTOR: f64 = 1.2;
pub const ALPHA_SPEED_FACTOR: f64 = 1.1;

// --- Alert levels ---

pub const ALERT_UNAWARE: f64 = 0.0;
pub const ALERT_SUSPICIOUS: f64 = 1.0;
pub const ALERT_ENGAGED: f64 = 2.0;

/// Default RNG seed for a new pack.
pub const DEFAULT_SEED: u64 = 42;
