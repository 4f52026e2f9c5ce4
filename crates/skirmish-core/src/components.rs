//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Stable external identity of a unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

/// Hit points. Signed: may go below zero on the killing blow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
}

/// Ammunition and reload state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Magazine {
    /// Rounds left. Never replenished.
    pub ammo: u32,
    /// Simulation time of the last shot (ms). Starts at 0.
    pub last_fire_ms: u64,
}

/// Standing orders from the controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    /// Move destination. Kept after arrival until Stop or a new Move.
    pub move_to: Option<Position>,
    /// Designated attack target (reported, not used for target selection).
    pub target_unit: Option<String>,
}

/// Morale state. `routed` is sticky.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Morale {
    pub routed: bool,
}

/// Spotting set: ids of the units that currently detect this unit. They belong
/// to the opposing side, i.e. they are friendly to anyone firing on it.
/// Rebuilt every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spotting {
    pub spotted_by: BTreeSet<String>,
}
