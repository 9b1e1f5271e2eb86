//! Simulated host handle for the standalone harness and tests.
//!
//! Stands in for a real game server: exposes a single `dispatch_command`
//! surface that records every command it receives, plus an optional host
//! configuration mapping that can be seeded from a TOML file.

use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::{HOURS_KEY, SECONDS_KEY};
use crate::host::{ConfigValue, HostCallError, HostConfig, ServerHandle};

/// Errors loading a simulated-host configuration file.
#[derive(Debug, Error)]
pub enum SimConfigError {
    #[error("failed to read host config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid host config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk shape of a simulated host's configuration.
#[derive(Debug, Default, Deserialize)]
pub struct HostConfigFile {
    pub autorestart_interval_seconds: Option<i64>,
    pub autorestart_interval_hours: Option<f64>,
}

impl HostConfigFile {
    /// Convert into the mapping shape a host handle exposes.
    pub fn into_host_config(self) -> HostConfig {
        let mut config = HostConfig::new();
        if let Some(seconds) = self.autorestart_interval_seconds {
            config.insert(SECONDS_KEY.to_string(), ConfigValue::Integer(seconds));
        }
        if let Some(hours) = self.autorestart_interval_hours {
            config.insert(HOURS_KEY.to_string(), ConfigValue::Float(hours));
        }
        config
    }
}

/// Load a simulated-host configuration mapping from a TOML file.
pub fn load_host_config(path: &Path) -> Result<HostConfig, SimConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let file: HostConfigFile = toml::from_str(&raw)?;
    Ok(file.into_host_config())
}

/// Fake game server: records dispatched commands, optionally exposes config.
pub struct SimulatedHost {
    commands: Mutex<Vec<String>>,
    config: Option<HostConfig>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            config: None,
        }
    }

    pub fn with_config(config: HostConfig) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            config: Some(config),
        }
    }

    /// Snapshot of every command dispatched so far.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    /// Number of commands dispatched so far.
    pub fn command_count(&self) -> usize {
        self.commands.lock().map(|commands| commands.len()).unwrap_or(0)
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerHandle for SimulatedHost {
    fn dispatch_command(&self, command: &str) -> Result<(), HostCallError> {
        info!("Simulated host received dispatch_command: {command:?}");
        let mut commands = self
            .commands
            .lock()
            .map_err(|_| HostCallError::Failed("command log mutex poisoned".to_string()))?;
        commands.push(command.to_string());
        Ok(())
    }

    fn config(&self) -> Option<HostConfig> {
        self.config.clone()
    }
}
