//! ECS systems that operate on the pack world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; agents live in components and the id index is
//! owned by the engine.

pub mod agent_ai;
pub mod cleanup;
pub mod coordination;
pub mod snapshot;
