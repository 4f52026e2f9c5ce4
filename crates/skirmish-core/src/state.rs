//! World snapshot: an owned, read-only copy of the visible state after a tick.
//!
//! Snapshots never alias engine storage; mutating one has no effect on the simulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Side, UnitKind};
use crate::types::Position;

/// Complete battle state handed to collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub sim_clock_ms: u64,
    /// Units keyed by id (sorted, so serialization is stable).
    pub units: BTreeMap<String, UnitView>,
}

/// One unit as seen by a display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    pub id: String,
    pub side: Side,
    pub unit_type_id: UnitKind,
    pub pos: Position,
    pub hp: f64,
    pub ammo: u32,
    pub routed: bool,
    pub intent_target_pos: Option<Position>,
    pub target_unit_id: Option<String>,
    /// Enemy units currently detecting this one.
    pub spotted_by: Vec<String>,
}

impl WorldSnapshot {
    pub fn unit(&self, id: &str) -> Option<&UnitView> {
        self.units.get(id)
    }

    /// Units of one side, in id order.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &UnitView> {
        self.units.values().filter(move |u| u.side == side)
    }
}
