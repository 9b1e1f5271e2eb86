//! Repeating restart timer.
//!
//! The scheduler owns at most one timer task at a time. `activate` resolves
//! the interval, spawns the task, and hands back the resolved schedule;
//! `deactivate` cancels it. Re-activation cancels the previous timer before
//! starting the next one, so two timers never run concurrently. A failed
//! invocation on one tick never blocks the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{self, ScheduleConfig};
use crate::host::ServerHandle;
use crate::invoker;

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No timer is pending; nothing will fire.
    Stopped,
    /// A repeating timer is armed and will invoke a restart each interval.
    Scheduled,
}

/// The single owned timer resource backing one activation.
struct ActiveTimer {
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

/// Drives periodic restart invocations against one host handle.
pub struct RestartScheduler {
    timer: Option<ActiveTimer>,
}

impl RestartScheduler {
    pub const fn new() -> Self {
        Self { timer: None }
    }

    /// Current lifecycle state, derived from timer ownership.
    pub const fn state(&self) -> RunState {
        if self.timer.is_some() {
            RunState::Scheduled
        } else {
            RunState::Stopped
        }
    }

    /// Resolve the interval and arm the repeating timer.
    ///
    /// The first firing happens one full interval after activation, then
    /// every interval after that. If a timer is already armed it is
    /// cancelled first. Must be called from within a Tokio runtime.
    pub fn activate(
        &mut self,
        handle: Arc<dyn ServerHandle>,
        override_seconds: Option<u64>,
        restart_command: Option<String>,
    ) -> ScheduleConfig {
        if self.timer.is_some() {
            warn!("Scheduler re-activated while running; replacing the existing timer");
            self.deactivate();
        }

        let mut schedule = config::resolve(override_seconds, handle.as_ref());
        if let Some(command) = restart_command {
            schedule.restart_command = command;
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_timer(handle, schedule.clone(), cancel.clone()));
        self.timer = Some(ActiveTimer { cancel, _task: task });

        schedule
    }

    /// Cancel the armed timer. Idempotent; a no-op when already stopped.
    pub fn deactivate(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
            info!("Restart timer cancelled");
        }
    }
}

impl Default for RestartScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// The timer dies with its owner; a dropped scheduler never fires again.
impl Drop for RestartScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
        }
    }
}

/// Timer task: fire every interval until cancelled.
async fn run_timer(
    handle: Arc<dyn ServerHandle>,
    schedule: ScheduleConfig,
    cancel: CancellationToken,
) {
    let interval = schedule.interval;
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log_next_firing(interval);

    loop {
        tokio::select! {
            // Cancellation wins a simultaneous wake: once deactivated, no
            // further invocation may happen.
            biased;
            _ = cancel.cancelled() => {
                info!("Shutdown signal received; restart timer stopped");
                break;
            }
            _ = ticker.tick() => {
                if let Err(error) = invoker::issue_restart(handle.as_ref(), &schedule.restart_command) {
                    warn!(%error, "Restart attempt exhausted; will retry on the next tick");
                }
                log_next_firing(interval);
            }
        }
    }
}

fn log_next_firing(interval: Duration) {
    match chrono::Duration::from_std(interval) {
        Ok(delta) => {
            let next = chrono::Utc::now() + delta;
            info!("Next restart scheduled at {}", next.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Err(_) => info!("Next restart scheduled in {} seconds", interval.as_secs()),
    }
}
