//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two opposing sides of an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
}

/// Unit type id: key into the unit catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitKind {
    /// Light scout vehicle with long-range sensors.
    Recon,
    /// Dismounted squad carrying HEAT launchers.
    Infantry,
    /// Main battle tank.
    Mbt,
    /// Self-propelled howitzer.
    Artillery,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Recon,
        UnitKind::Infantry,
        UnitKind::Mbt,
        UnitKind::Artillery,
    ];
}

/// Weapon system class; selects fire-eligibility rules and the armor-modifier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    /// Line-of-sight gun. Shooter must see the target itself.
    DirectFire,
    /// Artillery. Fires at anything some friendly unit currently spots.
    IndirectFire,
    /// Rifles and machine guns.
    SmallArms,
    /// Guided or HEAT anti-armor weapons.
    AntiTank,
}

impl WeaponClass {
    /// Whether the shooter must directly detect its target to fire.
    pub fn needs_direct_detection(self) -> bool {
        !matches!(self, WeaponClass::IndirectFire)
    }
}

/// Order kind, echoed in `OrderAccepted` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Move,
    Attack,
    Stop,
}
