//! Host plugin lifecycle adapter.
//!
//! The embedding host drives this plugin through two hooks: `on_enable`,
//! handing over the live server handle, and `on_disable`, taking nothing.
//! Both are thin wrappers around the scheduler's activate/deactivate; the
//! plugin also remembers any fixed overrides configured before enablement.

use std::sync::Arc;

use tracing::info;

use crate::config::ScheduleConfig;
use crate::host::ServerHandle;
use crate::scheduler::{RestartScheduler, RunState};

/// Auto-restart plugin, one per host process.
pub struct AutoRestartPlugin {
    scheduler: RestartScheduler,
    interval_override: Option<u64>,
    restart_command: Option<String>,
    schedule: Option<ScheduleConfig>,
}

impl AutoRestartPlugin {
    pub const fn new() -> Self {
        Self {
            scheduler: RestartScheduler::new(),
            interval_override: None,
            restart_command: None,
            schedule: None,
        }
    }

    /// Force a fixed interval, bypassing the environment and host config.
    #[must_use]
    pub const fn with_interval_seconds(mut self, seconds: u64) -> Self {
        self.interval_override = Some(seconds);
        self
    }

    /// Override the command string sent to command-dispatch surfaces.
    #[must_use]
    pub fn with_restart_command(mut self, command: impl Into<String>) -> Self {
        self.restart_command = Some(command.into());
        self
    }

    /// Host hook: plugin enabled. Resolves the interval against the handle
    /// and starts the restart schedule. Enabling an already-enabled plugin
    /// replaces the running schedule.
    pub fn on_enable(&mut self, handle: Arc<dyn ServerHandle>) {
        let schedule = self.scheduler.activate(
            handle,
            self.interval_override,
            self.restart_command.clone(),
        );
        info!(
            "AutoRestart enabled. Interval: {} seconds",
            schedule.interval_seconds()
        );
        self.schedule = Some(schedule);
    }

    /// Host hook: plugin disabled. Cancels any pending restart. Safe to call
    /// even if the plugin was never enabled.
    pub fn on_disable(&mut self) {
        self.scheduler.deactivate();
        self.schedule = None;
        info!("AutoRestart disabled; timer cancelled");
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> RunState {
        self.scheduler.state()
    }

    /// The schedule resolved at the last enablement, while enabled.
    pub fn schedule(&self) -> Option<&ScheduleConfig> {
        self.schedule.as_ref()
    }
}

impl Default for AutoRestartPlugin {
    fn default() -> Self {
        Self::new()
    }
}
