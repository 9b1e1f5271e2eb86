//! Restart interval resolution.
//!
//! ## Resolution Order
//!
//! The first source yielding a valid positive number of seconds wins:
//!
//! 1. Explicit override supplied by the caller
//! 2. `AUTORESTART_INTERVAL_SECONDS` environment variable
//! 3. Host configuration: `autorestart_interval_seconds`, then
//!    `autorestart_interval_hours` (scaled by 3600)
//! 4. Built-in default (6 hours)
//!
//! A malformed or non-positive value at any level is logged at warn level and
//! skipped; resolution always lands on a positive interval. Host config
//! values may arrive as integers, floats, or numeric strings (see
//! [`crate::host::ConfigValue`]).

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::host::{HostConfig, ServerHandle};

/// Environment variable consulted at resolution step 2.
pub const INTERVAL_ENV_VAR: &str = "AUTORESTART_INTERVAL_SECONDS";

/// Host config key holding the interval in seconds.
pub const SECONDS_KEY: &str = "autorestart_interval_seconds";

/// Host config key holding the interval in hours.
pub const HOURS_KEY: &str = "autorestart_interval_hours";

/// Fallback interval when no source provides one: 6 hours.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 6 * 60 * 60;

/// Conventional command string sent to command-dispatch restart surfaces.
pub const DEFAULT_RESTART_COMMAND: &str = "restart";

/// Immutable schedule parameters for one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Time between restart invocations. Always positive.
    pub interval: Duration,
    /// Command string handed to command-dispatch surfaces.
    pub restart_command: String,
}

impl ScheduleConfig {
    /// The interval in whole seconds.
    pub fn interval_seconds(&self) -> u64 {
        self.interval.as_secs()
    }
}

/// Resolve the schedule for one activation against a live host handle.
///
/// Reads the process environment and the handle's configuration surface once;
/// the result is immutable for the lifetime of the activation.
pub fn resolve(override_seconds: Option<u64>, handle: &dyn ServerHandle) -> ScheduleConfig {
    let env_value = std::env::var(INTERVAL_ENV_VAR).ok();
    let host_config = handle.config();
    let seconds = resolve_seconds(override_seconds, env_value.as_deref(), host_config.as_ref());
    ScheduleConfig {
        interval: Duration::from_secs(seconds),
        restart_command: DEFAULT_RESTART_COMMAND.to_string(),
    }
}

/// Pure precedence scan over already-fetched sources.
///
/// Split from [`resolve`] so tests can exercise precedence without touching
/// the process environment.
fn resolve_seconds(
    override_seconds: Option<u64>,
    env_value: Option<&str>,
    host_config: Option<&HostConfig>,
) -> u64 {
    if let Some(seconds) = override_seconds {
        if seconds > 0 {
            info!(seconds, "Interval set by explicit override");
            return seconds;
        }
        warn!("Ignoring non-positive interval override: {seconds}");
    }

    if let Some(raw) = env_value {
        match raw.trim().parse::<i64>() {
            Ok(seconds) if seconds > 0 => {
                info!(seconds, "Interval loaded from {INTERVAL_ENV_VAR}");
                return seconds as u64;
            }
            _ => warn!("Ignoring invalid {INTERVAL_ENV_VAR} value: {raw:?}"),
        }
    }

    if let Some(config) = host_config {
        if let Some(value) = config.get(SECONDS_KEY) {
            match value.as_integer() {
                Some(seconds) if seconds > 0 => {
                    info!(seconds, "Interval loaded from host config key {SECONDS_KEY}");
                    return seconds as u64;
                }
                _ => warn!("Ignoring invalid host config value for {SECONDS_KEY}: {value:?}"),
            }
        }

        if let Some(value) = config.get(HOURS_KEY) {
            let seconds = value
                .as_float()
                .filter(|hours| hours.is_finite() && *hours > 0.0)
                .map(|hours| (hours * 3600.0).round() as i64);
            match seconds {
                Some(seconds) if seconds > 0 => {
                    info!(seconds, "Interval loaded from host config key {HOURS_KEY}");
                    return seconds as u64;
                }
                _ => warn!("Ignoring invalid host config value for {HOURS_KEY}: {value:?}"),
            }
        }
    }

    debug!("No interval configured; using the {DEFAULT_INTERVAL_SECONDS}-second default");
    DEFAULT_INTERVAL_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ConfigValue;

    fn host_config(entries: &[(&str, ConfigValue)]) -> HostConfig {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn override_wins_over_everything() {
        let config = host_config(&[(SECONDS_KEY, ConfigValue::Integer(10))]);
        assert_eq!(resolve_seconds(Some(42), Some("99"), Some(&config)), 42);
    }

    #[test]
    fn non_positive_override_falls_through() {
        assert_eq!(resolve_seconds(Some(0), Some("99"), None), 99);
    }

    #[test]
    fn env_value_wins_regardless_of_host_config() {
        let config = host_config(&[
            (SECONDS_KEY, ConfigValue::Integer(10)),
            (HOURS_KEY, ConfigValue::Integer(2)),
        ]);
        assert_eq!(resolve_seconds(None, Some("300"), Some(&config)), 300);
    }

    #[test]
    fn malformed_env_values_fall_through() {
        let config = host_config(&[(SECONDS_KEY, ConfigValue::Integer(10))]);
        for bad in ["", "abc", "0", "-5", "2.5"] {
            assert_eq!(resolve_seconds(None, Some(bad), Some(&config)), 10);
        }
    }

    #[test]
    fn malformed_env_without_host_config_uses_default() {
        assert_eq!(
            resolve_seconds(None, Some("not-a-number"), None),
            DEFAULT_INTERVAL_SECONDS
        );
    }

    #[test]
    fn seconds_key_takes_precedence_over_hours_key() {
        let config = host_config(&[
            (SECONDS_KEY, ConfigValue::Integer(10)),
            (HOURS_KEY, ConfigValue::Integer(2)),
        ]);
        assert_eq!(resolve_seconds(None, None, Some(&config)), 10);
    }

    #[test]
    fn hours_key_is_scaled_to_seconds() {
        let config = host_config(&[(HOURS_KEY, ConfigValue::Integer(2))]);
        assert_eq!(resolve_seconds(None, None, Some(&config)), 7200);
    }

    #[test]
    fn fractional_hours_are_scaled() {
        let config = host_config(&[(HOURS_KEY, ConfigValue::Float(0.5))]);
        assert_eq!(resolve_seconds(None, None, Some(&config)), 1800);
    }

    #[test]
    fn numeric_string_values_are_accepted() {
        let config = host_config(&[(SECONDS_KEY, ConfigValue::Text("900".to_string()))]);
        assert_eq!(resolve_seconds(None, None, Some(&config)), 900);
    }

    #[test]
    fn invalid_seconds_key_falls_through_to_hours_key() {
        let config = host_config(&[
            (SECONDS_KEY, ConfigValue::Text("soon".to_string())),
            (HOURS_KEY, ConfigValue::Integer(1)),
        ]);
        assert_eq!(resolve_seconds(None, None, Some(&config)), 3600);
    }

    #[test]
    fn invalid_host_values_use_default() {
        let config = host_config(&[
            (SECONDS_KEY, ConfigValue::Integer(-10)),
            (HOURS_KEY, ConfigValue::Float(0.0)),
        ]);
        assert_eq!(
            resolve_seconds(None, None, Some(&config)),
            DEFAULT_INTERVAL_SECONDS
        );
    }

    #[test]
    fn nothing_configured_uses_six_hour_default() {
        assert_eq!(resolve_seconds(None, None, None), 21_600);
    }
}
