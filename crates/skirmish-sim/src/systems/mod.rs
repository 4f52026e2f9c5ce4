//! ECS systems that operate on the battle world each tick.
//!
//! Systems are free functions over `&mut World`. They visit units in the
//! engine's roster order (ascending unit id) wherever order matters.

pub mod combat;
pub mod detection;
pub mod morale;
pub mod movement;
pub mod orders;
pub mod snapshot;

use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::enums::{Side, UnitKind};
use skirmish_core::types::Position;

/// Value copy of the per-unit state the detection and combat phases read.
#[derive(Debug, Clone)]
pub struct UnitRecord {
    pub entity: Entity,
    pub id: String,
    pub side: Side,
    pub kind: UnitKind,
    pub pos: Position,
    pub hp: f64,
    pub ammo: u32,
    pub last_fire_ms: u64,
    pub routed: bool,
    pub spotted: bool,
}

impl UnitRecord {
    /// Not destroyed. Only living units are selected as targets.
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Able to move, observe and shoot. Only routing takes a unit out of action.
    pub fn is_active(&self) -> bool {
        !self.routed
    }
}

/// Copy unit state out of the world in roster order.
pub fn collect(world: &mut World, roster: &[Entity]) -> Vec<UnitRecord> {
    let mut records = Vec::with_capacity(roster.len());
    for &entity in roster {
        let Ok((id, side, kind, pos, health, magazine, morale, spotting)) = world
            .query_one_mut::<(
                &UnitId,
                &Side,
                &UnitKind,
                &Position,
                &Health,
                &Magazine,
                &Morale,
                &Spotting,
            )>(entity)
        else {
            continue;
        };
        records.push(UnitRecord {
            entity,
            id: id.0.clone(),
            side: *side,
            kind: *kind,
            pos: *pos,
            hp: health.hp,
            ammo: magazine.ammo,
            last_fire_ms: magazine.last_fire_ms,
            routed: morale.routed,
            spotted: !spotting.spotted_by.is_empty(),
        });
    }
    records
}
