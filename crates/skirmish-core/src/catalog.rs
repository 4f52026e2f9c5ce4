//! Unit catalog: immutable templates keyed by [`UnitKind`].
//!
//! Values are fixed for the lifetime of the process. Nothing in the
//! simulation writes to a template; instances reference them by kind.

use serde::Serialize;

use crate::constants::{ARMOR_HEAVY, ARMOR_LIGHT, ARMOR_NONE};
use crate::enums::{UnitKind, WeaponClass};

/// Characteristics shared by every unit of one type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitTemplate {
    pub name: &'static str,
    pub max_hp: f64,
    /// Road-march speed (m/s).
    pub speed_mps: f64,
    /// Nominal detection range against a visibility-1.0 target (meters).
    pub sensor_range_m: f64,
    pub weapon: WeaponClass,
    pub weapon_range_m: f64,
    pub base_damage: f64,
    pub reload_s: f64,
    /// 0 = none, 1 = light, 2 = medium, 3 = heavy.
    pub armor: u8,
    /// How easy this unit is to spot. Scales the detector's sensor range.
    pub visibility: f64,
    pub max_ammo: u32,
    /// Circular error probable of the unit's weapon (meters).
    pub cep_m: f64,
    /// Area-of-effect radius of the weapon's warhead (meters, 0 = none).
    pub aoe_radius_m: f64,
}

static RECON: UnitTemplate = UnitTemplate {
    name: "Reconnaissance Vehicle",
    max_hp: 50.0,
    speed_mps: 4.0,
    sensor_range_m: 2500.0,
    weapon: WeaponClass::SmallArms,
    weapon_range_m: 400.0,
    base_damage: 5.0,
    reload_s: 2.0,
    armor: ARMOR_LIGHT,
    visibility: 0.5,
    max_ammo: 200,
    cep_m: 10.0,
    aoe_radius_m: 0.0,
};

static INFANTRY: UnitTemplate = UnitTemplate {
    name: "Infantry Squad",
    max_hp: 80.0,
    speed_mps: 1.5,
    sensor_range_m: 600.0,
    weapon: WeaponClass::AntiTank,
    weapon_range_m: 500.0,
    base_damage: 30.0,
    reload_s: 5.0,
    armor: ARMOR_NONE,
    visibility: 0.8,
    max_ammo: 10,
    cep_m: 4.0,
    aoe_radius_m: 5.0,
};

static MBT: UnitTemplate = UnitTemplate {
    name: "Main Battle Tank",
    max_hp: 150.0,
    speed_mps: 2.0,
    sensor_range_m: 1000.0,
    weapon: WeaponClass::DirectFire,
    weapon_range_m: 3000.0,
    base_damage: 50.0,
    reload_s: 6.0,
    armor: ARMOR_HEAVY,
    visibility: 1.5,
    max_ammo: 40,
    cep_m: 5.0,
    aoe_radius_m: 0.0,
};

static ARTILLERY: UnitTemplate = UnitTemplate {
    name: "Self-Propelled Howitzer",
    max_hp: 60.0,
    speed_mps: 1.5,
    sensor_range_m: 500.0,
    weapon: WeaponClass::IndirectFire,
    weapon_range_m: 15_000.0,
    base_damage: 60.0,
    reload_s: 15.0,
    armor: ARMOR_LIGHT,
    visibility: 1.2,
    max_ammo: 30,
    cep_m: 75.0,
    aoe_radius_m: 50.0,
};

/// Look up the template for a unit kind.
pub fn template(kind: UnitKind) -> &'static UnitTemplate {
    match kind {
        UnitKind::Recon => &RECON,
        UnitKind::Infantry => &INFANTRY,
        UnitKind::Mbt => &MBT,
        UnitKind::Artillery => &ARTILLERY,
    }
}

impl UnitKind {
    /// Shorthand for [`template`].
    pub fn template(self) -> &'static UnitTemplate {
        template(self)
    }
}
