//! Snapshot system: queries the world and builds an owned WorldSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::enums::{Side, UnitKind};
use skirmish_core::state::{UnitView, WorldSnapshot};
use skirmish_core::types::Position;

/// Build a complete snapshot of the current world.
pub fn build_snapshot(world: &World, sim_clock_ms: u64) -> WorldSnapshot {
    let units = world
        .query::<UnitQuery>()
        .iter()
        .map(|(_, item)| {
            let view = unit_view(item);
            (view.id.clone(), view)
        })
        .collect();

    WorldSnapshot {
        sim_clock_ms,
        units,
    }
}

/// Build the view of a single unit.
pub fn build_unit(world: &World, entity: hecs::Entity) -> Option<UnitView> {
    let mut query = world.query_one::<UnitQuery>(entity).ok()?;
    query.get().map(unit_view)
}

type UnitQuery<'a> = (
    &'a UnitId,
    &'a Side,
    &'a UnitKind,
    &'a Position,
    &'a Health,
    &'a Magazine,
    &'a Intent,
    &'a Morale,
    &'a Spotting,
);

fn unit_view(
    (id, side, kind, pos, health, magazine, intent, morale, spotting): UnitQuery<'_>,
) -> UnitView {
    UnitView {
        id: id.0.clone(),
        side: *side,
        unit_type_id: *kind,
        pos: *pos,
        hp: health.hp,
        ammo: magazine.ammo,
        routed: morale.routed,
        intent_target_pos: intent.move_to,
        target_unit_id: intent.target_unit.clone(),
        spotted_by: spotting.spotted_by.iter().cloned().collect(),
    }
}
