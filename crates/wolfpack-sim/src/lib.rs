//! Pack simulation engine.
//!
//! Owns the hecs ECS world of agents, steps every agent through the behavior
//! state machine, propagates alerts, assigns pack roles and produces
//! `PackSnapshot`s for renderers.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use wolfpack_ai as ai;
pub use wolfpack_core as core;
pub use engine::Pack;

#[cfg(test)]
mod tests;
