//! Skirmish host.
//!
//! Runs the battle scheduler on a background thread, keeps the latest snapshot
//! and an append-only event log for polling, and forwards controller requests
//! to the loop over a channel.

pub mod control;
pub mod event_log;
pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
pub use skirmish_sim as sim;
