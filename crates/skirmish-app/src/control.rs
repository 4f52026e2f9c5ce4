//! Controller entry points.
//!
//! These bridge external requests (the CLI, or any embedding host) to the game
//! loop thread via its command channel, and serve reads from shared state.

use std::sync::PoisonError;

use thiserror::Error;

use skirmish_core::commands::Order;
use skirmish_core::events::SimEvent;
use skirmish_core::state::WorldSnapshot;
use skirmish_core::types::UnitSpawn;
use skirmish_sim::scheduler::Scheduler;

use crate::game_loop::{self, Published};
use crate::state::{AppState, LoopCommand, LoopStatus};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has exited")]
    LoopGone,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

impl<T> From<PoisonError<T>> for ControlError {
    fn from(_: PoisonError<T>) -> Self {
        ControlError::Poisoned
    }
}

/// Start the game loop with `scheduler`. Fails if a loop is already running.
pub fn start_simulation(
    state: &AppState,
    scheduler: Scheduler,
    roster: Vec<UnitSpawn>,
) -> Result<(), ControlError> {
    let mut running = state.running.lock()?;
    if *running {
        return Err(ControlError::AlreadyRunning);
    }

    state.events.lock()?.clear();
    let published = Published {
        latest_snapshot: state.latest_snapshot.clone(),
        events: state.events.clone(),
        loop_status: state.loop_status.clone(),
    };
    let (cmd_tx, handle) = game_loop::spawn_game_loop(scheduler, roster, published)?;

    *state.command_tx.lock()? = Some(cmd_tx);
    *state.loop_handle.lock()? = Some(handle);
    *running = true;
    tracing::info!("simulation started");
    Ok(())
}

/// Forward a command to the game loop.
pub fn send_command(state: &AppState, command: LoopCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ControlError::LoopGone),
        None => Err(ControlError::NotStarted),
    }
}

/// Queue orders for the next engine step.
pub fn submit_orders(state: &AppState, orders: Vec<Order>) -> Result<(), ControlError> {
    send_command(state, LoopCommand::SubmitOrders(orders))
}

/// Latest published snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<WorldSnapshot>, ControlError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Pacing the loop last reported. `None` before the loop has started.
pub fn get_time_control(state: &AppState) -> Result<Option<LoopStatus>, ControlError> {
    Ok(*state.loop_status.lock()?)
}

/// Page of events from `offset`, and the offset to poll from next.
pub fn get_events(
    state: &AppState,
    offset: usize,
    limit: usize,
) -> Result<(Vec<SimEvent>, usize), ControlError> {
    Ok(state.events.lock()?.since(offset, limit))
}

/// Ask the loop to shut down and wait for the thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let mut running = state.running.lock()?;
    if !*running {
        return Ok(());
    }
    if let Some(tx) = state.command_tx.lock()?.take() {
        // A send error means the loop already exited.
        let _ = tx.send(LoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_handle.lock()?.take() {
        if handle.join().is_err() {
            tracing::error!("game loop thread panicked");
        }
    }
    *running = false;
    tracing::info!("simulation stopped");
    Ok(())
}
