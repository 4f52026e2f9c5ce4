//! Events emitted by the simulation for display and logging.
//!
//! Events are append-only records. They are never fed back into the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::{OrderKind, WeaponClass};
use crate::types::Position;

/// One event, stamped with the simulation time of the tick that produced it.
///
/// Serializes as `{ "simTimeMs": .., "kind": .., "data": { .. } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimEvent {
    pub sim_time_ms: u64,
    #[serde(flatten)]
    pub payload: EventPayload,
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum EventPayload {
    /// An order was applied to a unit.
    #[serde(rename_all = "camelCase")]
    OrderAccepted {
        unit_id: String,
        order: OrderKind,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        to: Option<Position>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<String>,
    },
    /// A unit discharged its weapon.
    #[serde(rename_all = "camelCase")]
    ShotFired {
        shooter: String,
        target: String,
        distance_m: f64,
        weapon: WeaponClass,
    },
    /// Where the round landed.
    #[serde(rename_all = "camelCase")]
    Impact {
        shooter: String,
        target: String,
        point: Position,
        miss_distance_m: f64,
        weapon: WeaponClass,
        aoe_radius_m: f64,
    },
    /// A unit lost hit points.
    #[serde(rename_all = "camelCase")]
    Damage {
        target: String,
        shooter: String,
        damage: f64,
        hp: f64,
    },
    /// A unit's HP reached zero.
    #[serde(rename_all = "camelCase")]
    Destroyed { unit_id: String, killer: String },
    /// A unit broke and permanently disengaged.
    #[serde(rename_all = "camelCase")]
    Routed { unit_id: String },
}

impl SimEvent {
    pub fn new(sim_time_ms: u64, payload: EventPayload) -> Self {
        Self {
            sim_time_ms,
            payload,
        }
    }

    /// Event kind name as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self.payload {
            EventPayload::OrderAccepted { .. } => "OrderAccepted",
            EventPayload::ShotFired { .. } => "ShotFired",
            EventPayload::Impact { .. } => "Impact",
            EventPayload::Damage { .. } => "Damage",
            EventPayload::Destroyed { .. } => "Destroyed",
            EventPayload::Routed { .. } => "Routed",
        }
    }
}
