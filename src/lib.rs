//! AutoRestart: interval-based automatic restart for embedded game servers.
//!
//! Glue between a host game server's plugin lifecycle and its (unknown at
//! build time) restart API:
//!
//! - **Interval resolution**: explicit override, then the
//!   `AUTORESTART_INTERVAL_SECONDS` environment variable, then host
//!   configuration (seconds or hours keys), then a 6-hour default.
//! - **Capability probing**: a fixed ordered list of restart surfaces is
//!   tried on the host handle each tick; the first that works wins, and
//!   exhaustion just waits for the next tick.
//! - **One owned timer**: the scheduler owns at most one repeating timer
//!   task; the host's enable/disable hooks arm and cancel it.

pub mod config;
pub mod host;
pub mod invoker;
pub mod plugin;
pub mod scheduler;
pub mod sim;

// Re-export schedule configuration
pub use config::{
    ScheduleConfig, DEFAULT_INTERVAL_SECONDS, DEFAULT_RESTART_COMMAND, HOURS_KEY,
    INTERVAL_ENV_VAR, SECONDS_KEY,
};

// Re-export the host capability surface
pub use host::{ConfigValue, HostCallError, HostConfig, ServerHandle};

// Re-export the restart probe
pub use invoker::{issue_restart, RestartError, RestartMethod};

// Re-export the lifecycle components
pub use plugin::AutoRestartPlugin;
pub use scheduler::{RestartScheduler, RunState};
