//! ECS systems that operate on the simulation context each tick.
//!
//! Systems are free functions that take `&mut SimContext` plus whatever state
//! they own. They collect updates during a query and apply them afterwards.

pub mod ballistics;
pub mod cleanup;
pub mod combat;
pub mod damage;
pub mod drones;
pub mod movement;
pub mod status;
