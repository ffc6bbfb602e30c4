//! Tunable simulation parameters.
//!
//! `Tuning` carries every behavior constant the AI reads at runtime so that
//! variants of the same behavior differ by data, not code. All durations are
//! in seconds. Missing TOML fields fall back to the defaults in `constants`.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Rejected configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("hearing range ({hearing}) must exceed sight range ({sight})")]
    HearingWithinSight { hearing: f64, sight: f64 },

    #[error("vision cone angle must be in (0, 2π], got {0}")]
    VisionCone(f64),

    #[error("{field} must be in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f64 },

    #[error("patrol routes need at least one waypoint")]
    EmptyPatrol,

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Behavior and perception parameters shared by every agent in a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub sight_range: f64,
    pub hearing_range: f64,
    /// Full cone width (radians); half of it is compared against facing deviation.
    pub vision_cone_angle: f64,
    pub movement_noise_threshold: f64,
    pub loud_noise_threshold: f64,

    pub memory_duration_secs: f64,
    pub max_sound_memory: usize,

    pub walk_speed: f64,
    pub investigate_speed: f64,
    pub run_speed: f64,
    pub intercept_lookahead_secs: f64,
    pub flank_distance: f64,
    pub flank_angle: f64,

    pub waypoint_arrival_radius: f64,
    pub point_arrival_radius: f64,

    pub attack_range: f64,
    pub attack_cooldown_secs: f64,
    pub attack_damage: f64,
    pub base_health: f64,
    pub agent_radius: f64,

    pub communication_range: f64,
    pub communication_cooldown_secs: f64,

    pub investigate_timeout_secs: f64,
    pub idle_patrol_chance: f64,
    pub look_around_amplitude: f64,
    pub look_around_frequency: f64,

    pub patrol_min_points: usize,
    pub patrol_extra_points: usize,
    pub patrol_min_radius: f64,
    pub patrol_radius_jitter: f64,
    pub patrol_angle_jitter: f64,

    pub search_sectors: u32,
    pub search_base_radius: f64,
    pub search_radius_step: f64,
    pub search_give_up_factor: f64,
    pub cover_scan_radius: f64,
    pub cover_standoff: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sight_range: SIGHT_RANGE,
            hearing_range: HEARING_RANGE,
            vision_cone_angle: VISION_CONE_ANGLE,
            movement_noise_threshold: MOVEMENT_NOISE_THRESHOLD,
            loud_noise_threshold: LOUD_NOISE_THRESHOLD,
            memory_duration_secs: MEMORY_DURATION_SECS,
            max_sound_memory: MAX_SOUND_MEMORY,
            walk_speed: WALK_SPEED,
            investigate_speed: INVESTIGATE_SPEED,
            run_speed: RUN_SPEED,
            intercept_lookahead_secs: INTERCEPT_LOOKAHEAD_SECS,
            flank_distance: FLANK_DISTANCE,
            flank_angle: FLANK_ANGLE,
            waypoint_arrival_radius: WAYPOINT_ARRIVAL_RADIUS,
            point_arrival_radius: POINT_ARRIVAL_RADIUS,
            attack_range: ATTACK_RANGE,
            attack_cooldown_secs: ATTACK_COOLDOWN_SECS,
            attack_damage: ATTACK_DAMAGE,
            base_health: BASE_HEALTH,
            agent_radius: AGENT_RADIUS,
            communication_range: COMMUNICATION_RANGE,
            communication_cooldown_secs: COMMUNICATION_COOLDOWN_SECS,
            investigate_timeout_secs: INVESTIGATE_TIMEOUT_SECS,
            idle_patrol_chance: IDLE_PATROL_CHANCE,
            look_around_amplitude: LOOK_AROUND_AMPLITUDE,
            look_around_frequency: LOOK_AROUND_FREQUENCY,
            patrol_min_points: PATROL_MIN_POINTS,
            patrol_extra_points: PATROL_EXTRA_POINTS,
            patrol_min_radius: PATROL_MIN_RADIUS,
            patrol_radius_jitter: PATROL_RADIUS_JITTER,
            patrol_angle_jitter: PATROL_ANGLE_JITTER,
            search_sectors: SEARCH_SECTORS,
            search_base_radius: SEARCH_BASE_RADIUS,
            search_radius_step: SEARCH_RADIUS_STEP,
            search_give_up_factor: SEARCH_GIVE_UP_FACTOR,
            cover_scan_radius: COVER_SCAN_RADIUS,
            cover_standoff: COVER_STANDOFF,
        }
    }
}

impl Tuning {
    /// Half of the vision cone, the maximum allowed facing deviation.
    pub fn half_cone(&self) -> f64 {
        self.vision_cone_angle / 2.0
    }

    /// Time after which an unfinished search is abandoned.
    pub fn search_give_up_secs(&self) -> f64 {
        self.memory_duration_secs * self.search_give_up_factor
    }

    /// Check invariants the behavior code relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sight_range", self.sight_range),
            ("hearing_range", self.hearing_range),
            ("memory_duration_secs", self.memory_duration_secs),
            ("walk_speed", self.walk_speed),
            ("investigate_speed", self.investigate_speed),
            ("run_speed", self.run_speed),
            ("waypoint_arrival_radius", self.waypoint_arrival_radius),
            ("point_arrival_radius", self.point_arrival_radius),
            ("attack_range", self.attack_range),
            ("base_health", self.base_health),
            ("communication_range", self.communication_range),
            ("investigate_timeout_secs", self.investigate_timeout_secs),
            ("search_give_up_factor", self.search_give_up_factor),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.hearing_range <= self.sight_range {
            return Err(ConfigError::HearingWithinSight {
                hearing: self.hearing_range,
                sight: self.sight_range,
            });
        }

        if !(self.vision_cone_angle > 0.0 && self.vision_cone_angle <= TAU) {
            return Err(ConfigError::VisionCone(self.vision_cone_angle));
        }

        if !(0.0..=1.0).contains(&self.idle_patrol_chance) {
            return Err(ConfigError::NotAProbability {
                field: "idle_patrol_chance",
                value: self.idle_patrol_chance,
            });
        }

        if self.patrol_min_points == 0 {
            return Err(ConfigError::EmptyPatrol);
        }

        Ok(())
    }
}

/// Configuration for starting a new pack simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a TOML document and validate the resulting tuning.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.tuning.validate()?;
        Ok(config)
    }
}
