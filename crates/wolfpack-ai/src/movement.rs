//! Steering and aim-point calculation.
//!
//! Straight-line movement only. Pursuit re-solves the aim point every tick,
//! so first-order prediction is enough.

use wolfpack_core::components::Kinematics;
use wolfpack_core::config::Tuning;
use wolfpack_core::constants::STATIONARY_SPEED_EPSILON;
use wolfpack_core::enums::FlankSide;
use wolfpack_core::geometry::{from_heading, heading, normalize_or_zero, Vec2};

/// Step toward `target` at `speed` for `dt` seconds.
///
/// Already at the target: position and velocity are left untouched.
pub fn move_towards(agent: &mut Kinematics, target: Vec2, speed: f64, dt: f64) {
    let direction = normalize_or_zero(target - agent.position);
    if direction == Vec2::ZERO {
        return;
    }
    agent.velocity = direction * speed;
    agent.position += agent.velocity * dt;
    agent.set_facing(heading(direction));
}

/// Turn to face `point` without moving. No-op when standing on it.
pub fn face_towards(agent: &mut Kinematics, point: Vec2) {
    let direction = normalize_or_zero(point - agent.position);
    if direction != Vec2::ZERO {
        agent.set_facing(heading(direction));
    }
}

/// Predict where the target will be after the lookahead.
///
/// A stationary (or nearly so) target is returned unchanged.
pub fn calculate_intercept_point(target_pos: Vec2, target_vel: Vec2, tuning: &Tuning) -> Vec2 {
    if target_vel.length() < STATIONARY_SPEED_EPSILON {
        return target_pos;
    }
    target_pos + target_vel * tuning.intercept_lookahead_secs
}

/// Position a flanker should take relative to the target's direction of travel.
///
/// `fallback_heading` is used when the target is stationary.
pub fn calculate_flanking_position(
    target_pos: Vec2,
    target_vel: Vec2,
    side: FlankSide,
    fallback_heading: f64,
    tuning: &Tuning,
) -> Vec2 {
    let travel = if target_vel.length() < STATIONARY_SPEED_EPSILON {
        fallback_heading
    } else {
        heading(target_vel)
    };
    let angle = travel + side.sign() * tuning.flank_angle;
    target_pos + from_heading(angle) * tuning.flank_distance
}
