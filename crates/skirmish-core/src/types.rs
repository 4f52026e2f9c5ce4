//! Fundamental geometric and roster types.

use serde::{Deserialize, Serialize};

use crate::enums::{Side, UnitKind};

/// 2D position on the battlefield (meters, Cartesian). x = East, y = North.
///
/// Serializes as `[x, y]`.
pub type Position = glam::DVec2;

/// One entry of a battle's initial roster.
///
/// `hp` and `ammo` default to the unit template's maxima when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSpawn {
    pub id: String,
    pub side: Side,
    pub unit_type_id: UnitKind,
    pub pos: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<u32>,
}

impl UnitSpawn {
    /// A full-strength unit of `kind` at `(x, y)`.
    pub fn new(id: impl Into<String>, side: Side, kind: UnitKind, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            side,
            unit_type_id: kind,
            pos: Position::new(x, y),
            hp: None,
            ammo: None,
        }
    }

    /// Override starting HP.
    pub fn with_hp(mut self, hp: f64) -> Self {
        self.hp = Some(hp);
        self
    }

    /// Override starting ammunition.
    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = Some(ammo);
        self
    }
}
