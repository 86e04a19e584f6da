//! Core types and definitions for the BASTION battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, enums, events, constants, tuning profiles and the unit catalog.
//! It has no dependency on any rendering or runtime framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod profiles;
pub mod types;

#[cfg(test)]
mod tests;
