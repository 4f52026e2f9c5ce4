//! Detection (spotting) system.
//!
//! Each tick, rebuilds from scratch the set of enemy units detecting each unit.
//! Detection is a pure range test scaled by the target's visibility:
//!
//! `distance(D, T) <= D.sensor_range * T.visibility`
//!
//! It is asymmetric and uncapped. A conspicuous target (visibility > 1) is seen
//! beyond the detector's nominal range; a concealed one shrinks it. Only
//! opposing-side pairs are evaluated and there is no occlusion. Routed units
//! do not observe.

use std::collections::BTreeSet;

use hecs::{Entity, World};

use skirmish_core::catalog::UnitTemplate;
use skirmish_core::components::Spotting;
use skirmish_core::types::Position;

use super::{collect, UnitRecord};

/// Whether a detector of type `detector` at `detector_pos` sees a `target` at `target_pos`.
pub fn can_detect(
    detector: &UnitTemplate,
    detector_pos: Position,
    target: &UnitTemplate,
    target_pos: Position,
) -> bool {
    detector_pos.distance(target_pos) <= detector.sensor_range_m * target.visibility
}

/// Record-level convenience over [`can_detect`].
pub fn sees(detector: &UnitRecord, target: &UnitRecord) -> bool {
    can_detect(
        detector.kind.template(),
        detector.pos,
        target.kind.template(),
        target.pos,
    )
}

/// Replace every unit's spotting set. Returns the number of (detector, target) pairs.
pub fn run(world: &mut World, roster: &[Entity]) -> usize {
    let units = collect(world, roster);
    let mut sets: Vec<BTreeSet<String>> = vec![BTreeSet::new(); units.len()];
    let mut pairs = 0;

    for detector in units.iter().filter(|u| u.is_active()) {
        for (slot, target) in sets.iter_mut().zip(&units) {
            if target.side == detector.side {
                continue;
            }
            if sees(detector, target) {
                slot.insert(detector.id.clone());
                pairs += 1;
            }
        }
    }

    for (unit, set) in units.iter().zip(sets) {
        if let Ok(mut spotting) = world.get::<&mut Spotting>(unit.entity) {
            spotting.spotted_by = set;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::{UnitKind, WeaponClass};

    fn sensor(range: f64) -> UnitTemplate {
        UnitTemplate {
            name: "test sensor",
            max_hp: 1.0,
            speed_mps: 0.0,
            sensor_range_m: range,
            weapon: WeaponClass::SmallArms,
            weapon_range_m: 0.0,
            base_damage: 0.0,
            reload_s: 1.0,
            armor: 0,
            visibility: 1.0,
            max_ammo: 0,
            cep_m: 1.0,
            aoe_radius_m: 0.0,
        }
    }

    fn with_visibility(visibility: f64) -> UnitTemplate {
        UnitTemplate {
            visibility,
            ..sensor(0.0)
        }
    }

    #[test]
    fn test_concealed_target_shrinks_range() {
        let d = sensor(2000.0);
        let t = with_visibility(0.5);
        let origin = Position::ZERO;
        assert!(can_detect(&d, origin, &t, Position::new(1000.0, 0.0)));
        assert!(!can_detect(&d, origin, &t, Position::new(1000.5, 0.0)));
    }

    #[test]
    fn test_conspicuous_target_extends_range() {
        let d = sensor(2000.0);
        let t = with_visibility(1.5);
        let origin = Position::ZERO;
        assert!(can_detect(&d, origin, &t, Position::new(0.0, 3000.0)));
        assert!(!can_detect(&d, origin, &t, Position::new(0.0, 3000.5)));
    }

    #[test]
    fn test_catalog_asymmetry_recon_vs_mbt() {
        // Recon sees a tank at 3750 m; the tank needs to be within 500 m of the recon.
        let recon = UnitKind::Recon.template();
        let mbt = UnitKind::Mbt.template();
        let a = Position::ZERO;
        let b = Position::new(3000.0, 0.0);
        assert!(can_detect(recon, a, mbt, b));
        assert!(!can_detect(mbt, b, recon, a));
    }
}
