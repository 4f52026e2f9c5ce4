//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs the five-phase pipeline per tick,
//! and drives it from wall-clock frames through a fixed-step scheduler.

pub mod engine;
pub mod rng;
pub mod scenario;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{Engine, SimConfig};
pub use rng::DeterministicRng;
pub use scheduler::{Scheduler, SchedulerConfig, TickListener};
pub use skirmish_core as core;
