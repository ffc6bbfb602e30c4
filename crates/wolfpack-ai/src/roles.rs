//! Pack role planning.
//!
//! Roles are derived from the ordered list of currently engaged agents, so the
//! same input always yields the same plan.

use wolfpack_core::constants::MAX_FLANKERS;
use wolfpack_core::enums::{FlankSide, PackRole};
use wolfpack_core::types::AgentId;

const FLANK_SIDES: [FlankSide; MAX_FLANKERS] = [FlankSide::Left, FlankSide::Right];

/// Assign roles to engaged agents in the given order: the first hunts, the
/// next two flank from opposite sides, the rest track.
pub fn plan_roles(engaged: &[AgentId]) -> Vec<(AgentId, PackRole)> {
    engaged
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let role = match i {
                0 => PackRole::Hunter,
                n if n <= MAX_FLANKERS => PackRole::Flanker(FLANK_SIDES[n - 1]),
                _ => PackRole::Tracker,
            };
            (id, role)
        })
        .collect()
}
