//! Order application: the first phase of every tick.
//!
//! Drains the whole queue. Orders for unknown or routed units, and moves toward
//! a non-finite point, are dropped silently; every applied order emits `OrderAccepted`.

use std::collections::HashMap;

use hecs::{Entity, World};

use skirmish_core::commands::Order;
use skirmish_core::components::{Intent, Morale};
use skirmish_core::events::{EventPayload, SimEvent};

/// Apply `orders` in submission order. Returns how many were accepted.
pub fn run(
    world: &mut World,
    index: &HashMap<String, Entity>,
    orders: Vec<Order>,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut accepted = 0;
    for order in orders {
        let Some(&entity) = index.get(order.unit_id()) else {
            tracing::trace!(unit = order.unit_id(), "dropping order for unknown unit");
            continue;
        };
        let routed = world
            .get::<&Morale>(entity)
            .map(|m| m.routed)
            .unwrap_or(true);
        if routed {
            tracing::trace!(unit = order.unit_id(), "dropping order for routed unit");
            continue;
        }
        if matches!(&order, Order::Move { target_pos, .. } if !target_pos.is_finite()) {
            tracing::trace!(unit = order.unit_id(), "dropping move to non-finite point");
            continue;
        }
        let Ok(mut intent) = world.get::<&mut Intent>(entity) else {
            continue;
        };

        let kind = order.kind();
        let payload = match order {
            Order::Move {
                unit_id,
                target_pos,
            } => {
                intent.move_to = Some(target_pos);
                EventPayload::OrderAccepted {
                    unit_id,
                    order: kind,
                    to: Some(target_pos),
                    target: None,
                }
            }
            Order::Attack {
                unit_id,
                target_unit_id,
            } => {
                intent.target_unit = Some(target_unit_id.clone());
                EventPayload::OrderAccepted {
                    unit_id,
                    order: kind,
                    to: None,
                    target: Some(target_unit_id),
                }
            }
            Order::Stop { unit_id } => {
                intent.move_to = None;
                intent.target_unit = None;
                EventPayload::OrderAccepted {
                    unit_id,
                    order: kind,
                    to: None,
                    target: None,
                }
            }
        };
        events.push(SimEvent::new(now_ms, payload));
        accepted += 1;
    }
    accepted
}
