//! Entity spawn factories for setting up a battle.
//!
//! Validates the initial roster and creates one entity per unit with the
//! full component bundle. Units are spawned in id order.

use std::collections::HashMap;

use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::error::RosterError;
use skirmish_core::types::UnitSpawn;

/// Entities of a spawned battle, in ascending unit-id order, plus an id lookup.
#[derive(Debug, Default)]
pub struct Roster {
    pub order: Vec<Entity>,
    pub index: HashMap<String, Entity>,
}

/// Check a roster before anything is spawned.
pub fn validate(spawns: &[UnitSpawn]) -> Result<(), RosterError> {
    let mut seen = std::collections::HashSet::new();
    for spawn in spawns {
        if spawn.id.is_empty() {
            return Err(RosterError::EmptyId);
        }
        if !seen.insert(spawn.id.as_str()) {
            return Err(RosterError::DuplicateId(spawn.id.clone()));
        }
        if !spawn.pos.is_finite() {
            return Err(RosterError::NonFinitePosition {
                id: spawn.id.clone(),
            });
        }
        if let Some(hp) = spawn.hp {
            if !hp.is_finite() {
                return Err(RosterError::NonFiniteHp {
                    id: spawn.id.clone(),
                    hp,
                });
            }
        }
    }
    Ok(())
}

/// Spawn every unit of the roster into an empty world.
pub fn spawn_roster(world: &mut World, mut spawns: Vec<UnitSpawn>) -> Result<Roster, RosterError> {
    validate(&spawns)?;
    spawns.sort_by(|a, b| a.id.cmp(&b.id));

    let mut roster = Roster::default();
    for spawn in spawns {
        let id = spawn.id.clone();
        let entity = spawn_unit(world, spawn);
        roster.order.push(entity);
        roster.index.insert(id, entity);
    }
    Ok(roster)
}

/// Spawn a single unit at full strength unless the spawn overrides HP or ammo.
pub fn spawn_unit(world: &mut World, spawn: UnitSpawn) -> Entity {
    let template = spawn.unit_type_id.template();
    world.spawn((
        UnitId(spawn.id),
        spawn.side,
        spawn.unit_type_id,
        spawn.pos,
        Health {
            hp: spawn.hp.unwrap_or(template.max_hp),
        },
        Magazine {
            ammo: spawn.ammo.unwrap_or(template.max_ammo),
            last_fire_ms: 0,
        },
        Intent::default(),
        Morale::default(),
        Spotting::default(),
    ))
}
