//! Agent memory: last sighting, recent sounds, and cover spots.
//!
//! Timestamps are in the owning agent's clock. Sightings are overwritten,
//! never decayed in place; staleness is computed on read.

use wolfpack_core::geometry::Vec2;

/// A noise the agent heard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundEvent {
    pub position: Vec2,
    /// 1 = noise threshold exceeded, 2 = loud threshold exceeded.
    pub intensity: f64,
    pub timestamp: f64,
}

/// Where and when the target was last known to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub position: Vec2,
    pub time: f64,
}

/// A place behind an obstacle where the target might hide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverSpot {
    pub position: Vec2,
    /// Higher is more likely; inverse distance from the last-seen position.
    pub priority: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Memory {
    last_seen: Option<Sighting>,
    /// Oldest first.
    sounds: Vec<SoundEvent>,
    cover_spots: Vec<CoverSpot>,
}

impl Memory {
    pub fn record_sighting(&mut self, position: Vec2, now: f64) {
        self.last_seen = Some(Sighting {
            position,
            time: now,
        });
    }

    pub fn last_seen(&self) -> Option<Sighting> {
        self.last_seen
    }

    pub fn last_seen_position(&self) -> Option<Vec2> {
        self.last_seen.map(|s| s.position)
    }

    /// Seconds since the last sighting, never negative.
    pub fn staleness(&self, now: f64) -> Option<f64> {
        self.last_seen.map(|s| (now - s.time).max(0.0))
    }

    /// Whether the last sighting is younger than `duration`.
    pub fn is_fresh(&self, now: f64, duration: f64) -> bool {
        self.staleness(now).is_some_and(|age| age < duration)
    }

    pub fn record_sound(&mut self, sound: SoundEvent) {
        self.sounds.push(sound);
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub fn latest_sound(&self) -> Option<&SoundEvent> {
        self.sounds.last()
    }

    /// Drop sounds older than `duration`, then keep only the newest `cap`.
    pub fn prune(&mut self, now: f64, duration: f64, cap: usize) {
        self.sounds.retain(|s| now - s.timestamp <= duration);
        if self.sounds.len() > cap {
            let overflow = self.sounds.len() - cap;
            self.sounds.drain(..overflow);
        }
    }

    pub fn set_cover_spots(&mut self, spots: Vec<CoverSpot>) {
        self.cover_spots = spots;
    }

    pub fn cover_spots(&self) -> &[CoverSpot] {
        &self.cover_spots
    }

    pub fn clear_cover_spots(&mut self) {
        self.cover_spots.clear();
    }
}
