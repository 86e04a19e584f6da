//! Opponent AI for BASTION.
//!
//! World-free decision logic: the drone behavior state machine, the
//! production decision tree and the special-weapon policy. Everything here
//! works on plain input structs so the engine decides what to feed it.

pub mod cluster;
pub mod fsm;
pub mod policy;
pub mod production;
pub mod profiles;
pub mod specials;

pub use bastion_core as core;

#[cfg(test)]
mod tests;
