//! Pack AI for the wolf pack simulation.
//!
//! Implements perception, memory, movement and interception, the per-agent
//! behavior state machine, and pack role planning.

pub mod fsm;
pub mod memory;
pub mod movement;
pub mod patrol;
pub mod perception;
pub mod profiles;
pub mod roles;
pub mod search;

pub use wolfpack_core as core;
