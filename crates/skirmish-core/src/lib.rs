//! Core types and definitions for the SKIRMISH tactical simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the unit catalog, orders, state snapshots, events, and constants.
//! It holds no simulation logic and has no dependency on any runtime host.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
