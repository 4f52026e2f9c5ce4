//! Application state shared between controller calls and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use serde::Serialize;

use skirmish_core::commands::Order;
use skirmish_core::state::WorldSnapshot;
use skirmish_sim::scheduler::SchedulerConfig;

use crate::event_log::EventLog;

/// Requests forwarded to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// Orders to queue for the next engine step.
    SubmitOrders(Vec<Order>),
    SetTimeCompression(f64),
    SetTickInterval(u64),
    /// Stop stepping without discarding the battle.
    Pause,
    Resume,
    /// Restart from the loop's initial roster with a new seed.
    NewBattle { seed: u32 },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Pacing the loop is currently running with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopStatus {
    pub config: SchedulerConfig,
    /// False while paused.
    pub running: bool,
}

/// Shared host state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` holds values that do not exist before `start`
/// - `Arc<Mutex<...>>` is shared with the game loop thread
pub struct AppState {
    /// Channel to the game loop. `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot, replaced after every engine step.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    /// Events of the current battle.
    pub events: Arc<Mutex<EventLog>>,
    /// Live pacing, republished after every settings change.
    pub loop_status: Arc<Mutex<Option<LoopStatus>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Whether the game loop thread is alive.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(EventLog::new())),
            loop_status: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.events.lock().unwrap().is_empty());
        assert!(state.loop_status.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }
}
