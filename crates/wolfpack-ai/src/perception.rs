//! Sight and hearing.
//!
//! Pure functions of the current world state. The caller records results
//! into memory.

use wolfpack_core::components::Kinematics;
use wolfpack_core::config::Tuning;
use wolfpack_core::constants::{SOUND_INTENSITY_LOUD, SOUND_INTENSITY_QUIET};
use wolfpack_core::geometry::{
    angle_between, distance, heading, segment_intersects_circle, Vec2, DIRECTION_EPSILON,
};
use wolfpack_core::types::{Obstacle, TargetSnapshot};

use crate::memory::SoundEvent;

/// Check whether `target_pos` is inside the agent's vision cone, within sight
/// range, and not occluded by any obstacle.
pub fn has_line_of_sight(
    agent: &Kinematics,
    target_pos: Vec2,
    obstacles: &[Obstacle],
    tuning: &Tuning,
) -> bool {
    let dist = distance(agent.position, target_pos);
    if dist > tuning.sight_range {
        return false;
    }

    // Standing on the target: bearing is undefined, nothing can be in between.
    if dist < DIRECTION_EPSILON {
        return true;
    }

    let bearing = heading(target_pos - agent.position);
    let deviation = angle_between(agent.facing, bearing).abs();
    if deviation > tuning.half_cone() {
        return false;
    }

    !obstacles.iter().any(|obstacle| {
        segment_intersects_circle(
            agent.position,
            target_pos,
            obstacle.position,
            obstacle.radius,
        )
    })
}

/// Sight check including the environment's visibility pre-filter.
pub fn can_see(
    agent: &Kinematics,
    target: &TargetSnapshot,
    obstacles: &[Obstacle],
    tuning: &Tuning,
) -> bool {
    target.visible && has_line_of_sight(agent, target.position, obstacles, tuning)
}

/// Check whether the target is moving loudly enough, close enough, to be heard.
///
/// Returns the sound to record, stamped with `now`.
pub fn has_sound_cue(
    agent: &Kinematics,
    target: &TargetSnapshot,
    now: f64,
    tuning: &Tuning,
) -> Option<SoundEvent> {
    if distance(agent.position, target.position) >= tuning.hearing_range {
        return None;
    }

    let speed = target.speed();
    if speed <= tuning.movement_noise_threshold {
        return None;
    }

    let intensity = if speed > tuning.loud_noise_threshold {
        SOUND_INTENSITY_LOUD
    } else {
        SOUND_INTENSITY_QUIET
    };

    Some(SoundEvent {
        position: target.position,
        intensity,
        timestamp: now,
    })
}
