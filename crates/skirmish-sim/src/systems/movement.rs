//! Movement: straight-line advance toward each unit's move intent.
//!
//! Arrival does not clear the intent; only Stop or a new Move does.

use hecs::World;

use skirmish_core::components::{Intent, Morale};
use skirmish_core::constants::ARRIVAL_EPSILON_M;
use skirmish_core::enums::UnitKind;
use skirmish_core::types::Position;

/// Advance every non-routed unit with a move intent by `dt_s` seconds of travel.
pub fn run(world: &mut World, dt_s: f64) {
    for (_entity, (kind, pos, intent, morale)) in
        world.query_mut::<(&UnitKind, &mut Position, &Intent, &Morale)>()
    {
        if morale.routed {
            continue;
        }
        let Some(target) = intent.move_to else {
            continue;
        };
        *pos = advance(*pos, target, kind.template().speed_mps * dt_s);
    }
}

/// Move from `from` toward `to` by at most `max_step` meters.
///
/// Within [`ARRIVAL_EPSILON_M`] of `to`, or toward a non-finite `to`, the
/// position is left unchanged.
pub fn advance(from: Position, to: Position, max_step: f64) -> Position {
    if !to.is_finite() {
        return from;
    }
    let delta = to - from;
    let dist = delta.length();
    if dist < ARRIVAL_EPSILON_M || !max_step.is_finite() || max_step <= 0.0 {
        return from;
    }
    if max_step >= dist {
        return to;
    }
    from + delta / dist * max_step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_partial_step() {
        let p = advance(Position::new(0.0, 0.0), Position::new(100.0, 0.0), 30.0);
        assert_eq!(p, Position::new(30.0, 0.0));
    }

    #[test]
    fn test_advance_toward_non_finite_is_noop() {
        let from = Position::new(10.0, 20.0);
        assert_eq!(advance(from, Position::new(f64::NAN, 0.0), 30.0), from);
        assert_eq!(advance(from, Position::new(f64::INFINITY, 0.0), 30.0), from);
    }

    #[test]
    fn test_advance_never_overshoots() {
        let p = advance(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 1000.0);
        assert_eq!(p, Position::new(3.0, 4.0));
    }

    #[test]
    fn test_advance_within_epsilon_is_noop() {
        let from = Position::new(10.0, 10.0);
        let p = advance(from, Position::new(10.05, 10.0), 5.0);
        assert_eq!(p, from);
    }

    #[test]
    fn test_advance_zero_step_is_noop() {
        let from = Position::new(0.0, 0.0);
        assert_eq!(advance(from, Position::new(50.0, 0.0), 0.0), from);
    }

    #[test]
    fn test_advance_diagonal_keeps_heading() {
        let p = advance(Position::new(0.0, 0.0), Position::new(300.0, 400.0), 50.0);
        assert!((p.x - 30.0).abs() < 1e-9);
        assert!((p.y - 40.0).abs() < 1e-9);
    }
}
