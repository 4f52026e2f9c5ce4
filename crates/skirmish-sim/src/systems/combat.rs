//! Targeting and combat.
//!
//! Targets are chosen for every shooter against the state at the start of the
//! phase, then shots resolve one by one in roster order. A shot whose target
//! was destroyed earlier in the same phase is not taken.
//!
//! Each shot scatters around the target with a Rayleigh radius derived from the
//! weapon's CEP. Area weapons damage every unit inside the radius (either side,
//! wrecks included) with linear falloff; point weapons hit only their target and
//! only when the round lands within CEP. `Destroyed` is emitted once, when HP
//! first reaches zero.

use hecs::{Entity, World};

use skirmish_core::components::{Health, Magazine};
use skirmish_core::constants::{ARMOR_HEAVY, ARMOR_LIGHT, ARMOR_MEDIUM, ARMOR_NONE};
use skirmish_core::enums::WeaponClass;
use skirmish_core::events::{EventPayload, SimEvent};

use super::detection::sees;
use super::{collect, UnitRecord};
use crate::rng::DeterministicRng;

/// Counts reported back to the engine for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatTally {
    pub shots: u32,
    pub hits: u32,
    pub destroyed: u32,
}

/// Damage multiplier for a weapon class against an armor class.
pub fn armor_modifier(weapon: WeaponClass, armor: u8) -> f64 {
    match weapon {
        WeaponClass::SmallArms if armor >= ARMOR_MEDIUM => 0.1,
        WeaponClass::SmallArms => 1.0,
        WeaponClass::AntiTank if armor >= ARMOR_MEDIUM => 1.5,
        WeaponClass::AntiTank => 1.0,
        WeaponClass::DirectFire if armor >= ARMOR_HEAVY => 0.8,
        WeaponClass::DirectFire if armor >= ARMOR_MEDIUM => 1.2,
        WeaponClass::DirectFire => 1.5,
        WeaponClass::IndirectFire if armor == ARMOR_NONE => 2.0,
        WeaponClass::IndirectFire if armor == ARMOR_LIGHT => 1.2,
        WeaponClass::IndirectFire => 0.6,
    }
}

/// Linear blast falloff: 1 at the epicenter, 0 at and beyond `radius`.
pub fn falloff(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 || !distance.is_finite() || distance >= radius {
        return 0.0;
    }
    1.0 - distance.max(0.0) / radius
}

/// Ammo, reload, range and detection test for one shooter/target pair.
///
/// Indirect fire needs someone on the shooter's side to spot the target; every
/// other weapon needs the shooter itself to detect it.
pub fn can_fire_at(shooter: &UnitRecord, target: &UnitRecord, now_ms: u64) -> bool {
    let t = shooter.kind.template();
    if shooter.ammo == 0 {
        return false;
    }
    let since_fire_s = now_ms.saturating_sub(shooter.last_fire_ms) as f64 / 1000.0;
    if since_fire_s < t.reload_s {
        return false;
    }
    if shooter.pos.distance(target.pos) > t.weapon_range_m {
        return false;
    }
    if t.weapon.needs_direct_detection() {
        sees(shooter, target)
    } else {
        target.spotted
    }
}

/// Nearest eligible enemy for every active shooter, as `(shooter, target)` indices.
///
/// Ties keep the first target found in roster order.
pub fn select_targets(units: &[UnitRecord], now_ms: u64) -> Vec<(usize, usize)> {
    let mut picks = Vec::new();
    for (si, shooter) in units.iter().enumerate() {
        if !shooter.is_active() {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (ti, target) in units.iter().enumerate() {
            if target.side == shooter.side || !target.is_alive() {
                continue;
            }
            if !can_fire_at(shooter, target, now_ms) {
                continue;
            }
            let dist = shooter.pos.distance(target.pos);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((ti, dist));
            }
        }
        if let Some((ti, _)) = best {
            picks.push((si, ti));
        }
    }
    picks
}

/// Select targets and resolve all shots for this tick.
pub fn run(
    world: &mut World,
    roster: &[Entity],
    rng: &mut DeterministicRng,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) -> CombatTally {
    let mut units = collect(world, roster);
    let picks = select_targets(&units, now_ms);
    let mut tally = CombatTally::default();

    for (si, ti) in picks {
        if !units[ti].is_alive() {
            continue;
        }
        fire(&mut units, si, ti, rng, now_ms, events, &mut tally);
    }

    for unit in &units {
        if let Ok((health, magazine)) =
            world.query_one_mut::<(&mut Health, &mut Magazine)>(unit.entity)
        {
            health.hp = unit.hp;
            magazine.ammo = unit.ammo;
            magazine.last_fire_ms = unit.last_fire_ms;
        }
    }
    tally
}

fn fire(
    units: &mut [UnitRecord],
    si: usize,
    ti: usize,
    rng: &mut DeterministicRng,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
    tally: &mut CombatTally,
) {
    let shooter_id = units[si].id.clone();
    let target_id = units[ti].id.clone();
    let aim = units[ti].pos;
    let t = units[si].kind.template();

    events.push(SimEvent::new(
        now_ms,
        EventPayload::ShotFired {
            shooter: shooter_id.clone(),
            target: target_id.clone(),
            distance_m: units[si].pos.distance(aim),
            weapon: t.weapon,
        },
    ));
    units[si].ammo -= 1;
    units[si].last_fire_ms = now_ms;
    tally.shots += 1;

    let scatter = rng.scatter(aim, t.cep_m);
    events.push(SimEvent::new(
        now_ms,
        EventPayload::Impact {
            shooter: shooter_id.clone(),
            target: target_id,
            point: scatter.point,
            miss_distance_m: scatter.miss_distance_m,
            weapon: t.weapon,
            aoe_radius_m: t.aoe_radius_m,
        },
    ));

    if t.aoe_radius_m > 0.0 {
        for victim in units.iter_mut() {
            let scale = falloff(victim.pos.distance(scatter.point), t.aoe_radius_m);
            if scale <= 0.0 {
                continue;
            }
            let armor = victim.kind.template().armor;
            let damage = t.base_damage * scale * armor_modifier(t.weapon, armor);
            apply_damage(victim, &shooter_id, damage, now_ms, events, tally);
        }
    } else if scatter.miss_distance_m <= t.cep_m {
        let victim = &mut units[ti];
        let armor = victim.kind.template().armor;
        let damage = t.base_damage * armor_modifier(t.weapon, armor);
        apply_damage(victim, &shooter_id, damage, now_ms, events, tally);
    }
}

fn apply_damage(
    victim: &mut UnitRecord,
    shooter: &str,
    damage: f64,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
    tally: &mut CombatTally,
) {
    if !damage.is_finite() || damage <= 0.0 {
        return;
    }
    let was_alive = victim.is_alive();
    victim.hp -= damage;
    tally.hits += 1;
    events.push(SimEvent::new(
        now_ms,
        EventPayload::Damage {
            target: victim.id.clone(),
            shooter: shooter.to_string(),
            damage,
            hp: victim.hp,
        },
    ));
    if was_alive && !victim.is_alive() {
        tally.destroyed += 1;
        events.push(SimEvent::new(
            now_ms,
            EventPayload::Destroyed {
                unit_id: victim.id.clone(),
                killer: shooter.to_string(),
            },
        ));
    }
}
