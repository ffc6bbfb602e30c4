//! Cyclic patrol routes around an agent's spawn point.

use std::f64::consts::TAU;

use rand::Rng;

use wolfpack_core::config::Tuning;
use wolfpack_core::geometry::{from_heading, Vec2};

#[derive(Debug, Clone, Default)]
pub struct PatrolRoute {
    waypoints: Vec<Vec2>,
    index: usize,
    /// Assigned from outside; not replaced when patrol restarts.
    pinned: bool,
}

impl PatrolRoute {
    /// Random ring of waypoints around `center`.
    pub fn generate<R: Rng + ?Sized>(center: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let count = tuning.patrol_min_points.max(1) + rng.gen_range(0..=tuning.patrol_extra_points);
        let radius = tuning.patrol_min_radius + rng.gen::<f64>() * tuning.patrol_radius_jitter;

        let waypoints = (0..count)
            .map(|i| {
                let angle =
                    TAU * i as f64 / count as f64 + rng.gen::<f64>() * tuning.patrol_angle_jitter;
                center + from_heading(angle) * radius
            })
            .collect();

        Self {
            waypoints,
            index: 0,
            pinned: false,
        }
    }

    /// Fixed route supplied by level design. `None` if `waypoints` is empty.
    pub fn pinned(waypoints: Vec<Vec2>) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Self {
            waypoints,
            index: 0,
            pinned: true,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    /// Move to the next waypoint, wrapping to the first.
    pub fn advance(&mut self) {
        if self.waypoints.is_empty() {
            self.index = 0;
        } else {
            self.index = (self.index + 1) % self.waypoints.len();
        }
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }
}
