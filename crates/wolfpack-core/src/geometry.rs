//! 2D geometry primitives.
//!
//! All simulation math runs in f64 on `glam::DVec2`. Angles are radians,
//! measured counter-clockwise from +x, and normalized into (-π, π].

use std::f64::consts::{PI, TAU};

/// 2D vector in world units.
pub type Vec2 = glam::DVec2;

/// Below this magnitude a vector is treated as having no direction.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (b - a).length()
}

/// Unit vector in the direction of `v`, or zero if `v` has no direction.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if !len.is_finite() || len < DIRECTION_EPSILON {
        return Vec2::ZERO;
    }
    v / len
}

/// Heading of a direction vector in (-π, π]. Zero vector yields 0.
pub fn heading(v: Vec2) -> f64 {
    if v.length_squared() < DIRECTION_EPSILON * DIRECTION_EPSILON {
        return 0.0;
    }
    normalize_angle(v.y.atan2(v.x))
}

/// Unit vector pointing along `angle`.
pub fn from_heading(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap an angle into (-π, π]. Non-finite input collapses to 0.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Smallest signed difference `to - from`, normalized into (-π, π].
pub fn angle_between(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Whether the segment `start..end` touches the circle at `center` with `radius`.
///
/// Solves |start + t·d - center|² = r² for t and accepts if either root lies
/// in [0, 1]. A zero-length segment is treated as a point.
pub fn segment_intersects_circle(start: Vec2, end: Vec2, center: Vec2, radius: f64) -> bool {
    let d = end - start;
    let f = start - center;

    let a = d.dot(d);
    let c = f.dot(f) - radius * radius;

    if a < DIRECTION_EPSILON {
        return c <= 0.0;
    }

    let b = 2.0 * f.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return false;
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    (0.0..=1.0).contains(&t1) || (0.0..=1.0).contains(&t2)
}
