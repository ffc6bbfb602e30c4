//! Core types and definitions for the wolf pack simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, configuration, events, views, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
