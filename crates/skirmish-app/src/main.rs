//! `skirmish` command-line host.
//!
//! Headless mode steps the battle with synthetic frames of exactly one tick
//! interval and prints every event as a JSON line followed by the final
//! snapshot. `--realtime-secs` runs the game loop thread against the wall clock
//! instead. Logs go to stderr; filter them with `RUST_LOG`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use skirmish_app::control;
use skirmish_app::state::AppState;
use skirmish_core::commands::Order;
use skirmish_core::constants::{DEFAULT_SEED, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TIME_COMPRESSION};
use skirmish_core::events::SimEvent;
use skirmish_core::state::WorldSnapshot;
use skirmish_core::types::UnitSpawn;
use skirmish_sim::engine::{Engine, SimConfig};
use skirmish_sim::scenario;
use skirmish_sim::scheduler::{Scheduler, SchedulerConfig, TickListener};

#[derive(Parser, Debug)]
#[command(
    name = "skirmish",
    version,
    about = "Deterministic two-sided tactical battle simulation"
)]
struct Cli {
    /// RNG seed. Same seed and orders replay the same battle.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u32,
    /// Engine steps to run in headless mode.
    #[arg(long, default_value_t = 240)]
    ticks: u32,
    /// Real milliseconds per engine step.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,
    /// Simulated time per real time.
    #[arg(long, default_value_t = DEFAULT_TIME_COMPRESSION)]
    compression: f64,
    /// JSON file with the initial roster. Defaults to the built-in meeting engagement.
    #[arg(long)]
    roster: Option<PathBuf>,
    /// JSON file with orders to submit before the first step.
    #[arg(long)]
    orders: Option<PathBuf>,
    /// Run the game loop thread for this many wall-clock seconds.
    #[arg(long)]
    realtime_secs: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let roster = match &cli.roster {
        Some(path) => read_json::<Vec<UnitSpawn>>(path)?,
        None => scenario::default_roster(),
    };
    let orders = match &cli.orders {
        Some(path) => read_json::<Vec<Order>>(path)?,
        None => Vec::new(),
    };

    let config = SchedulerConfig {
        tick_interval_ms: cli.tick_ms,
        time_compression: cli.compression,
        ..Default::default()
    };
    let engine = Engine::new(SimConfig { seed: cli.seed }, roster.clone())
        .context("invalid roster")?;
    let scheduler = Scheduler::new(engine, config).context("invalid scheduler settings")?;
    tracing::info!(
        seed = cli.seed,
        units = roster.len(),
        sim_step_ms = config.sim_step_ms(),
        "battle ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.realtime_secs {
        Some(secs) => run_realtime(scheduler, roster, orders, secs, &mut out),
        None => run_headless(scheduler, orders, cli.ticks, &mut out),
    }
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Writes each event as one JSON line, remembering the first write failure.
struct JsonLines<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLines<W> {
    fn write_event(&mut self, event: &SimEvent) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> TickListener for JsonLines<W> {
    fn on_tick(&mut self, _snapshot: &WorldSnapshot, events: &[SimEvent]) {
        for event in events {
            self.write_event(event);
        }
    }
}

fn write_snapshot(out: &mut impl Write, snapshot: &WorldSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn run_headless(
    mut scheduler: Scheduler,
    orders: Vec<Order>,
    ticks: u32,
    out: &mut impl Write,
) -> Result<()> {
    scheduler.submit_orders(orders);
    scheduler.start();

    let mut lines = JsonLines {
        out: &mut *out,
        error: None,
    };
    let executed = scheduler.run_ticks(ticks, &mut lines);
    if let Some(err) = lines.error {
        return Err(err).context("writing events");
    }
    scheduler.stop();

    let engine = scheduler.engine();
    tracing::info!(
        steps = executed,
        clock_ms = engine.clock_ms(),
        active_sides = ?engine.active_sides(),
        "headless run finished"
    );
    write_snapshot(out, &scheduler.snapshot())?;
    out.flush()?;
    Ok(())
}

fn run_realtime(
    scheduler: Scheduler,
    roster: Vec<UnitSpawn>,
    orders: Vec<Order>,
    secs: u64,
    out: &mut impl Write,
) -> Result<()> {
    let state = AppState::new();
    control::start_simulation(&state, scheduler, roster)?;
    if !orders.is_empty() {
        control::submit_orders(&state, orders)?;
    }
    std::thread::sleep(Duration::from_secs(secs));
    control::stop_simulation(&state)?;

    let (events, next) = control::get_events(&state, 0, usize::MAX)?;
    let mut lines = JsonLines {
        out: &mut *out,
        error: None,
    };
    for event in &events {
        lines.write_event(event);
    }
    if let Some(err) = lines.error {
        return Err(err).context("writing events");
    }
    tracing::info!(events = next, "realtime run finished");

    if let Some(snapshot) = control::get_snapshot(&state)? {
        write_snapshot(out, &snapshot)?;
    }
    out.flush()?;
    Ok(())
}
