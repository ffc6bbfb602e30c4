//! Search fan and cover-spot scanning around a last-known position.

use std::f64::consts::TAU;

use wolfpack_core::config::Tuning;
use wolfpack_core::geometry::{distance, from_heading, heading, Vec2};
use wolfpack_core::types::Obstacle;

use crate::memory::CoverSpot;

/// Waypoint for a search sector. The radius grows with each sector so the
/// fan spirals outward.
pub fn search_point(center: Vec2, sector: u32, tuning: &Tuning) -> Vec2 {
    let sectors = tuning.search_sectors.max(1);
    let angle = TAU * sector as f64 / sectors as f64;
    let radius = tuning.search_base_radius + sector as f64 * tuning.search_radius_step;
    center + from_heading(angle) * radius
}

/// Likely hiding spots: the far side of every obstacle near `last_seen`,
/// highest priority first.
pub fn scan_cover_spots(last_seen: Vec2, obstacles: &[Obstacle], tuning: &Tuning) -> Vec<CoverSpot> {
    let mut spots: Vec<CoverSpot> = obstacles
        .iter()
        .filter_map(|obstacle| {
            let dist = distance(last_seen, obstacle.position);
            if dist >= tuning.cover_scan_radius {
                return None;
            }
            let away = heading(obstacle.position - last_seen);
            let position =
                obstacle.position + from_heading(away) * (obstacle.radius + tuning.cover_standoff);
            Some(CoverSpot {
                position,
                priority: 1.0 / dist.max(1.0),
            })
        })
        .collect();

    spots.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    spots
}
