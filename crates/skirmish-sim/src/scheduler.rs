//! Fixed-step scheduler.
//!
//! Converts real elapsed time, supplied by the host once per frame, into a
//! deterministic sequence of fixed-size engine steps. Each real tick interval
//! advances the battle by `tick_interval_ms * time_compression` of simulated
//! time. A slow host catches up with several steps in one frame, up to
//! `max_ticks_per_frame`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use skirmish_core::commands::Order;
use skirmish_core::constants::{
    DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TIME_COMPRESSION,
    MAX_SIM_STEP_MS,
};
use skirmish_core::error::{ConfigError, RosterError};
use skirmish_core::events::SimEvent;
use skirmish_core::state::WorldSnapshot;
use skirmish_core::types::UnitSpawn;

use crate::engine::{Engine, SimConfig};

/// Pacing parameters. Adjustable while the loop runs.
///
/// Deserializes from JSON with omitted fields taking their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Real time between engine steps (ms).
    pub tick_interval_ms: u64,
    /// Simulated time per real time. 0 pauses the battle.
    pub time_compression: f64,
    /// Steps allowed in a single frame before the backlog is dropped.
    pub max_ticks_per_frame: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            time_compression: DEFAULT_TIME_COMPRESSION,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        validate_compression(self.time_compression)?;
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::ZeroMaxTicks);
        }
        let step_ms = self.tick_interval_ms as f64 * self.time_compression;
        if step_ms > MAX_SIM_STEP_MS {
            return Err(ConfigError::StepTooLarge {
                step_ms,
                max_ms: MAX_SIM_STEP_MS,
            });
        }
        Ok(())
    }

    /// Simulated milliseconds per engine step.
    pub fn sim_step_ms(&self) -> u64 {
        (self.tick_interval_ms as f64 * self.time_compression).round() as u64
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn validate_compression(value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeCompression(value))
    }
}

/// Receives the result of every executed step.
pub trait TickListener {
    fn on_tick(&mut self, snapshot: &WorldSnapshot, events: &[SimEvent]);
}

impl<F> TickListener for F
where
    F: FnMut(&WorldSnapshot, &[SimEvent]),
{
    fn on_tick(&mut self, snapshot: &WorldSnapshot, events: &[SimEvent]) {
        self(snapshot, events)
    }
}

/// Drives an [`Engine`] from host frames.
pub struct Scheduler {
    engine: Engine,
    config: SchedulerConfig,
    accumulator: Duration,
    running: bool,
}

impl Scheduler {
    /// Create a stopped scheduler.
    pub fn new(engine: Engine, config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            accumulator: Duration::ZERO,
            running: false,
        })
    }

    /// Begin scheduling. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = Duration::ZERO;
        tracing::info!(
            tick_interval_ms = self.config.tick_interval_ms,
            time_compression = self.config.time_compression,
            "scheduler started"
        );
    }

    /// Stop scheduling further steps. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.accumulator = Duration::ZERO;
        tracing::info!(clock_ms = self.engine.clock_ms(), "scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn set_time_compression(&mut self, time_compression: f64) -> Result<(), ConfigError> {
        let candidate = SchedulerConfig {
            time_compression,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        tracing::info!(time_compression, "time compression changed");
        Ok(())
    }

    pub fn set_tick_interval(&mut self, tick_interval_ms: u64) -> Result<(), ConfigError> {
        let candidate = SchedulerConfig {
            tick_interval_ms,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        tracing::info!(tick_interval_ms, "tick interval changed");
        Ok(())
    }

    /// Feed one host frame of `elapsed` real time.
    ///
    /// Returns the number of engine steps executed. `listener` is called once
    /// per step with that step's snapshot and events. While time compression is
    /// zero, whole intervals are consumed without stepping the engine.
    pub fn frame(&mut self, elapsed: Duration, listener: &mut dyn TickListener) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed;

        let interval = self.config.tick_interval();
        let step_ms = self.config.sim_step_ms();
        let mut drained = 0;
        let mut executed = 0;

        while self.accumulator >= interval {
            if drained == self.config.max_ticks_per_frame {
                tracing::warn!(
                    backlog_ms = self.accumulator.as_millis() as u64,
                    "scheduler fell behind, dropping backlog"
                );
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= interval;
            drained += 1;
            if step_ms == 0 {
                continue;
            }
            let events = self.engine.step(step_ms);
            let snapshot = self.engine.snapshot();
            listener.on_tick(&snapshot, &events);
            executed += 1;
        }
        executed
    }

    /// Run `ticks` frames of exactly one tick interval each.
    pub fn run_ticks(&mut self, ticks: u32, listener: &mut dyn TickListener) -> u32 {
        let interval = self.config.tick_interval();
        let mut executed = 0;
        for _ in 0..ticks {
            executed += self.frame(interval, listener);
        }
        executed
    }

    /// Queue orders for the next step.
    pub fn submit_orders(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.engine.submit_orders(orders);
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Replace the battle wholesale. Pacing and running state are kept.
    pub fn new_battle(
        &mut self,
        config: SimConfig,
        roster: Vec<UnitSpawn>,
    ) -> Result<(), RosterError> {
        self.engine = Engine::new(config, roster)?;
        self.accumulator = Duration::ZERO;
        tracing::info!(seed = config.seed, "new battle");
        Ok(())
    }
}
