//! Host server capability surface.
//!
//! The embedding host hands this plugin an opaque server handle when the
//! plugin is enabled. Which restart surfaces that handle actually supports
//! is unknown at build time, so every capability method has a default body
//! reporting [`HostCallError::Unsupported`]; a host implementation overrides
//! only the surfaces it really exposes. The probe loop in
//! [`crate::invoker`] treats `Unsupported` as "try the next candidate", not
//! as a failure.

use std::collections::HashMap;

use thiserror::Error;

/// Errors surfaced by a single capability call on the host handle.
#[derive(Debug, Error)]
pub enum HostCallError {
    /// The host does not expose this capability at all.
    #[error("capability not supported by host")]
    Unsupported,

    /// The capability exists but the call failed on the host side.
    #[error("host call failed: {0}")]
    Failed(String),
}

/// A configuration value as exposed by the host.
///
/// Host configuration mappings are heterogeneous: the same key may arrive as
/// an integer, a float, or a numeric string depending on how the host parses
/// its own config files. The accessors coerce across those shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    /// Integer view of the value. Floats truncate toward zero; text must
    /// parse as a whole number. Non-finite floats yield `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Float view of the value. Text must parse as a number.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Mapping-like configuration object returned by the host, when it has one.
pub type HostConfig = HashMap<String, ConfigValue>;

/// Opaque handle onto the embedding game server.
///
/// Command-dispatch surfaces (`dispatch_command` through `run_command`)
/// receive a command string; `shutdown` and `stop` take no arguments. The
/// handle is shared with the timer task, so implementations must be
/// `Send + Sync` and record any state behind interior mutability.
pub trait ServerHandle: Send + Sync {
    /// Dispatch a console command through the host's primary command bus.
    fn dispatch_command(&self, _command: &str) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Execute a console command (alternate command-bus naming).
    fn execute_command(&self, _command: &str) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Run a command as the server console (alternate naming).
    fn console_command(&self, _command: &str) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Run a command string (alternate naming).
    fn run_command(&self, _command: &str) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Ask the host to shut itself down.
    fn shutdown(&self) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Ask the host to stop.
    fn stop(&self) -> Result<(), HostCallError> {
        Err(HostCallError::Unsupported)
    }

    /// Host configuration retrieval, when the host exposes one.
    fn config(&self) -> Option<HostConfig> {
        None
    }
}
