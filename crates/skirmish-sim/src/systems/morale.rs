//! Morale: badly damaged units may break and rout.
//!
//! Routing is terminal. A routed unit is skipped by every later phase and
//! its orders are dropped for the rest of the battle.

use hecs::{Entity, World};

use skirmish_core::components::{Health, Morale, UnitId};
use skirmish_core::constants::{ROUT_HP_FRACTION, ROUT_PROBABILITY};
use skirmish_core::enums::UnitKind;
use skirmish_core::events::{EventPayload, SimEvent};

use crate::rng::DeterministicRng;

/// HP fraction used for the morale check, floored at zero.
pub fn hp_fraction(hp: f64, max_hp: f64) -> f64 {
    if max_hp <= 0.0 {
        return 0.0;
    }
    hp.max(0.0) / max_hp
}

/// Roll for every unit below the rout threshold, in roster order.
/// Returns the number of units that routed this tick.
pub fn run(
    world: &mut World,
    roster: &[Entity],
    rng: &mut DeterministicRng,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut routed = 0;
    for &entity in roster {
        let Ok((id, kind, health, morale)) =
            world.query_one_mut::<(&UnitId, &UnitKind, &Health, &mut Morale)>(entity)
        else {
            continue;
        };
        if morale.routed {
            continue;
        }
        if hp_fraction(health.hp, kind.template().max_hp) >= ROUT_HP_FRACTION {
            continue;
        }
        if rng.bernoulli(ROUT_PROBABILITY) {
            morale.routed = true;
            routed += 1;
            events.push(SimEvent::new(
                now_ms,
                EventPayload::Routed {
                    unit_id: id.0.clone(),
                },
            ));
        }
    }
    routed
}
