//! Orders sent by an external controller to the simulation.
//!
//! Orders are queued and applied at the start of the next tick. An order for a
//! missing or routed unit is dropped without an event.

use serde::{Deserialize, Serialize};

use crate::enums::OrderKind;
use crate::types::Position;

/// A single command for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Order {
    /// Drive toward a point.
    #[serde(rename_all = "camelCase")]
    Move { unit_id: String, target_pos: Position },
    /// Designate an attack target.
    #[serde(rename_all = "camelCase")]
    Attack {
        unit_id: String,
        target_unit_id: String,
    },
    /// Clear movement and attack intents.
    #[serde(rename_all = "camelCase", alias = "defend")]
    Stop { unit_id: String },
}

impl Order {
    pub fn move_to(unit_id: impl Into<String>, x: f64, y: f64) -> Self {
        Order::Move {
            unit_id: unit_id.into(),
            target_pos: Position::new(x, y),
        }
    }

    pub fn attack(unit_id: impl Into<String>, target_unit_id: impl Into<String>) -> Self {
        Order::Attack {
            unit_id: unit_id.into(),
            target_unit_id: target_unit_id.into(),
        }
    }

    pub fn stop(unit_id: impl Into<String>) -> Self {
        Order::Stop {
            unit_id: unit_id.into(),
        }
    }

    /// The unit this order addresses.
    pub fn unit_id(&self) -> &str {
        match self {
            Order::Move { unit_id, .. }
            | Order::Attack { unit_id, .. }
            | Order::Stop { unit_id } => unit_id,
        }
    }

    pub fn kind(&self) -> OrderKind {
        match self {
            Order::Move { .. } => OrderKind::Move,
            Order::Attack { .. } => OrderKind::Attack,
            Order::Stop { .. } => OrderKind::Stop,
        }
    }
}
