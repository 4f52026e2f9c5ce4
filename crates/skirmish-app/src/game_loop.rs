//! Game loop thread: feeds wall-clock time into the scheduler and publishes results.
//!
//! The scheduler is moved into the thread. Commands arrive over an `mpsc`
//! channel; snapshots and events are written to shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::events::SimEvent;
use skirmish_core::state::WorldSnapshot;
use skirmish_core::types::UnitSpawn;
use skirmish_sim::engine::SimConfig;
use skirmish_sim::scheduler::{Scheduler, TickListener};

use crate::event_log::EventLog;
use crate::state::{LoopCommand, LoopStatus};

/// Sleep between frames. The scheduler absorbs jitter through its accumulator.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handles the loop writes into.
#[derive(Clone)]
pub struct Published {
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    pub events: Arc<Mutex<EventLog>>,
    pub loop_status: Arc<Mutex<Option<LoopStatus>>>,
}

impl Published {
    fn store_snapshot(&self, snapshot: WorldSnapshot) {
        if let Ok(mut lock) = self.latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
    }

    fn store_status(&self, scheduler: &Scheduler) {
        if let Ok(mut lock) = self.loop_status.lock() {
            *lock = Some(LoopStatus {
                config: scheduler.config(),
                running: scheduler.is_running(),
            });
        }
    }

    fn reset_events(&self) {
        if let Ok(mut log) = self.events.lock() {
            log.clear();
        }
    }
}

impl TickListener for Published {
    fn on_tick(&mut self, snapshot: &WorldSnapshot, events: &[SimEvent]) {
        if !events.is_empty() {
            if let Ok(mut log) = self.events.lock() {
                log.append_many(events.iter().cloned());
            }
        }
        self.store_snapshot(snapshot.clone());
    }
}

/// Spawns the game loop in a new thread and starts the scheduler.
///
/// `roster` is kept for `NewBattle` restarts. Returns the command sender and
/// the thread handle.
pub fn spawn_game_loop(
    scheduler: Scheduler,
    roster: Vec<UnitSpawn>,
    published: Published,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            run_game_loop(scheduler, roster, cmd_rx, published);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut scheduler: Scheduler,
    roster: Vec<UnitSpawn>,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut published: Published,
) {
    published.store_snapshot(scheduler.snapshot());
    scheduler.start();
    published.store_status(&scheduler);
    let mut last_frame = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Shutdown) => {
                    scheduler.stop();
                    published.store_status(&scheduler);
                    return;
                }
                Ok(cmd) => apply(&mut scheduler, &roster, &published, cmd),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!("command channel closed, stopping game loop");
                    scheduler.stop();
                    return;
                }
            }
        }

        // 2. Hand the real time since the last frame to the scheduler
        let now = Instant::now();
        let elapsed = now - last_frame;
        last_frame = now;
        scheduler.frame(elapsed, &mut published);

        // 3. Poll again shortly
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Apply one non-shutdown command to the scheduler, then republish its status.
pub fn apply(
    scheduler: &mut Scheduler,
    roster: &[UnitSpawn],
    published: &Published,
    cmd: LoopCommand,
) {
    match cmd {
        LoopCommand::SubmitOrders(orders) => {
            tracing::debug!(count = orders.len(), "orders queued");
            scheduler.submit_orders(orders);
        }
        LoopCommand::SetTimeCompression(value) => {
            if let Err(err) = scheduler.set_time_compression(value) {
                tracing::warn!(%err, "time compression rejected");
            }
        }
        LoopCommand::SetTickInterval(ms) => {
            if let Err(err) = scheduler.set_tick_interval(ms) {
                tracing::warn!(%err, "tick interval rejected");
            }
        }
        LoopCommand::Pause => scheduler.stop(),
        LoopCommand::Resume => scheduler.start(),
        LoopCommand::NewBattle { seed } => {
            match scheduler.new_battle(SimConfig { seed }, roster.to_vec()) {
                Ok(()) => {
                    published.reset_events();
                    published.store_snapshot(scheduler.snapshot());
                }
                Err(err) => tracing::warn!(%err, "new battle rejected"),
            }
        }
        LoopCommand::Shutdown => scheduler.stop(),
    }
    published.store_status(scheduler);
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::commands::Order;
    use skirmish_sim::engine::Engine;
    use skirmish_sim::scenario;
    use skirmish_sim::scheduler::SchedulerConfig;

    fn published() -> Published {
        Published {
            latest_snapshot: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(EventLog::new())),
            loop_status: Arc::new(Mutex::new(None)),
        }
    }

    fn scheduler() -> Scheduler {
        let engine = Engine::new(SimConfig::default(), scenario::default_roster()).unwrap();
        Scheduler::new(engine, SchedulerConfig::default()).unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::SubmitOrders(vec![Order::stop("B-MBT-1")]))
            .unwrap();
        tx.send(LoopCommand::Pause).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[0], LoopCommand::SubmitOrders(o) if o.len() == 1));
        assert_eq!(commands[1], LoopCommand::Pause);
        assert_eq!(commands[2], LoopCommand::Shutdown);
    }

    #[test]
    fn test_publish_on_tick() {
        let mut sched = scheduler();
        let mut sink = published();
        sched.start();
        sched.submit_orders([Order::move_to("B-RECON-1", 2000.0, 5000.0)]);
        sched.run_ticks(2, &mut sink);

        let snap = sink.latest_snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(snap.sim_clock_ms, 30_000);
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut sched = scheduler();
        let sink = published();
        let mut listener = sink.clone();
        sched.start();

        apply(&mut sched, &[], &sink, LoopCommand::Pause);
        assert_eq!(sched.run_ticks(5, &mut listener), 0);
        assert_eq!(sched.engine().clock_ms(), 0);

        apply(&mut sched, &[], &sink, LoopCommand::Resume);
        assert_eq!(sched.run_ticks(1, &mut listener), 1);
        assert_eq!(sched.engine().clock_ms(), 15_000);
    }

    #[test]
    fn test_invalid_settings_are_ignored() {
        let mut sched = scheduler();
        let sink = published();
        apply(&mut sched, &[], &sink, LoopCommand::SetTickInterval(0));
        apply(&mut sched, &[], &sink, LoopCommand::SetTimeCompression(-3.0));
        assert_eq!(sched.config(), SchedulerConfig::default());

        apply(&mut sched, &[], &sink, LoopCommand::SetTickInterval(100));
        apply(&mut sched, &[], &sink, LoopCommand::SetTimeCompression(2.0));
        assert_eq!(sched.config().sim_step_ms(), 200);
    }

    #[test]
    fn test_status_republished_after_settings() {
        let mut sched = scheduler();
        let sink = published();
        sched.start();

        apply(&mut sched, &[], &sink, LoopCommand::SetTimeCompression(5.0));
        let status = sink.loop_status.lock().unwrap().unwrap();
        assert_eq!(status.config.time_compression, 5.0);
        assert!(status.running);

        // A rejected value leaves the published status unchanged.
        apply(&mut sched, &[], &sink, LoopCommand::SetTimeCompression(-1.0));
        apply(&mut sched, &[], &sink, LoopCommand::Pause);
        let status = sink.loop_status.lock().unwrap().unwrap();
        assert_eq!(status.config.time_compression, 5.0);
        assert!(!status.running);
    }

    #[test]
    fn test_new_battle_resets_log_and_snapshot() {
        let mut sched = scheduler();
        let mut sink = published();
        let roster = scenario::tank_duel(800.0);
        sched.start();
        sched.submit_orders([Order::stop("B-MBT-1")]);
        sched.run_ticks(1, &mut sink);
        assert!(!sink.events.lock().unwrap().is_empty());

        apply(&mut sched, &roster, &sink, LoopCommand::NewBattle { seed: 9 });
        assert!(sink.events.lock().unwrap().is_empty());
        let snap = sink.latest_snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(snap.sim_clock_ms, 0);
        assert_eq!(snap.units.len(), 2);
        assert_eq!(sched.engine().seed(), 9);
    }
}
