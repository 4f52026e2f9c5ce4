//! Scenario definitions: hardcoded initial rosters.

use skirmish_core::enums::{Side, UnitKind};
use skirmish_core::types::UnitSpawn;

/// Default meeting engagement on a 10 km x 10 km field.
///
/// Each side fields a combined-arms group: one recon vehicle, two infantry
/// squads, two tanks and a howitzer, deployed near its own edge.
pub fn default_roster() -> Vec<UnitSpawn> {
    use Side::{Blue, Red};
    use UnitKind::*;

    vec![
        UnitSpawn::new("B-RECON-1", Blue, Recon, 1000.0, 5000.0),
        UnitSpawn::new("B-INF-1", Blue, Infantry, 1500.0, 3000.0),
        UnitSpawn::new("B-INF-2", Blue, Infantry, 1500.0, 7000.0),
        UnitSpawn::new("B-MBT-1", Blue, Mbt, 2000.0, 4000.0),
        UnitSpawn::new("B-MBT-2", Blue, Mbt, 2000.0, 6000.0),
        UnitSpawn::new("B-ARTY-1", Blue, Artillery, 500.0, 5000.0),
        UnitSpawn::new("R-RECON-1", Red, Recon, 9000.0, 5000.0),
        UnitSpawn::new("R-INF-1", Red, Infantry, 8500.0, 3000.0),
        UnitSpawn::new("R-INF-2", Red, Infantry, 8500.0, 7000.0),
        UnitSpawn::new("R-MBT-1", Red, Mbt, 8000.0, 4000.0),
        UnitSpawn::new("R-MBT-2", Red, Mbt, 8000.0, 6000.0),
        UnitSpawn::new("R-ARTY-1", Red, Artillery, 9500.0, 5000.0),
    ]
}

/// Two tanks facing each other `range_m` apart along the x axis.
pub fn tank_duel(range_m: f64) -> Vec<UnitSpawn> {
    vec![
        UnitSpawn::new("B-MBT-1", Side::Blue, UnitKind::Mbt, 0.0, 0.0),
        UnitSpawn::new("R-MBT-1", Side::Red, UnitKind::Mbt, range_m, 0.0),
    ]
}
