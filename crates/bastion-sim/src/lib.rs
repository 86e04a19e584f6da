//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, resolves
//! special weapons and drives the opponent, and reports each tick's events.

pub mod context;
pub mod deferred;
pub mod effects;
pub mod engine;
pub mod factory;
pub mod opponent;
pub mod specials;
pub mod systems;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine, TickReport};
