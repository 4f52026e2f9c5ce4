//! Simulation engine: the core of the battle.
//!
//! `Engine` owns the hecs world, the simulation clock, the seeded RNG and the
//! order queue. `step` runs the five phases in fixed order:
//!
//! 1. order application
//! 2. movement
//! 3. detection
//! 4. targeting and combat
//! 5. morale
//!
//! and then advances the clock by exactly `dt_ms`. Completely headless and
//! single-threaded; the same seed and order stream reproduce the same battle.

use std::collections::{BTreeSet, HashMap};

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use skirmish_core::commands::Order;
use skirmish_core::components::{Health, Morale};
use skirmish_core::constants::DEFAULT_SEED;
use skirmish_core::enums::Side;
use skirmish_core::error::RosterError;
use skirmish_core::events::SimEvent;
use skirmish_core::state::{UnitView, WorldSnapshot};
use skirmish_core::types::UnitSpawn;

use crate::rng::DeterministicRng;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

/// The simulation engine. Owns the world and all battle state.
pub struct Engine {
    world: World,
    /// Entities in ascending unit-id order. Units are never despawned.
    roster: Vec<Entity>,
    index: HashMap<String, Entity>,
    clock_ms: u64,
    tick: u64,
    rng: DeterministicRng,
    order_queue: Vec<Order>,
}

impl Engine {
    /// Create a battle from an initial roster.
    pub fn new(config: SimConfig, spawns: Vec<UnitSpawn>) -> Result<Self, RosterError> {
        let mut world = World::new();
        let roster = world_setup::spawn_roster(&mut world, spawns)?;
        tracing::debug!(seed = config.seed, units = roster.order.len(), "battle created");
        Ok(Self {
            world,
            roster: roster.order,
            index: roster.index,
            clock_ms: 0,
            tick: 0,
            rng: DeterministicRng::new(config.seed),
            order_queue: Vec::new(),
        })
    }

    /// Queue an order for the next tick.
    pub fn submit_order(&mut self, order: Order) {
        self.order_queue.push(order);
    }

    /// Queue several orders, preserving their order.
    pub fn submit_orders(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.order_queue.extend(orders);
    }

    /// Orders waiting for the next tick.
    pub fn pending_orders(&self) -> usize {
        self.order_queue.len()
    }

    /// Advance the battle by `dt_ms` of simulated time and return the tick's events.
    pub fn step(&mut self, dt_ms: u64) -> Vec<SimEvent> {
        let now = self.clock_ms;
        let mut events = Vec::new();

        // 1. Orders. The queue is emptied whether or not each order applies.
        let orders = std::mem::take(&mut self.order_queue);
        let submitted = orders.len();
        let accepted =
            systems::orders::run(&mut self.world, &self.index, orders, now, &mut events);
        // 2. Movement
        systems::movement::run(&mut self.world, dt_ms as f64 / 1000.0);
        // 3. Detection
        let sightings = systems::detection::run(&mut self.world, &self.roster);
        // 4. Targeting and combat
        let combat = systems::combat::run(
            &mut self.world,
            &self.roster,
            &mut self.rng,
            now,
            &mut events,
        );
        // 5. Morale
        let routed = systems::morale::run(
            &mut self.world,
            &self.roster,
            &mut self.rng,
            now,
            &mut events,
        );

        self.clock_ms = self.clock_ms.saturating_add(dt_ms);
        self.tick += 1;

        tracing::debug!(
            tick = self.tick,
            clock_ms = self.clock_ms,
            orders = submitted,
            accepted,
            sightings,
            shots = combat.shots,
            hits = combat.hits,
            destroyed = combat.destroyed,
            routed,
            "tick complete"
        );
        events
    }

    /// Current simulation time (ms).
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Number of steps taken.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Owned copy of the visible state.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.clock_ms)
    }

    /// View of one unit, if it exists.
    pub fn unit(&self, id: &str) -> Option<UnitView> {
        let entity = *self.index.get(id)?;
        systems::snapshot::build_unit(&self.world, entity)
    }

    /// Number of units in the battle (including destroyed and routed).
    pub fn unit_count(&self) -> usize {
        self.roster.len()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Sides that still field at least one living, unrouted unit.
    pub fn active_sides(&self) -> Vec<Side> {
        let sides: BTreeSet<Side> = self
            .world
            .query::<(&Side, &Health, &Morale)>()
            .iter()
            .filter(|(_, (_, health, morale))| health.hp > 0.0 && !morale.routed)
            .map(|(_, (side, _, _))| *side)
            .collect();
        sides.into_iter().collect()
    }

    /// True once at most one side can still fight.
    pub fn is_battle_over(&self) -> bool {
        self.active_sides().len() <= 1
    }
}
