//! Best-effort restart invocation over an unknown host API.
//!
//! Host servers differ in what they name their restart surface, so each tick
//! tries a fixed ordered list of candidate capabilities on the handle and
//! stops at the first success. A capability the host does not expose is
//! skipped silently; one that exists but fails is logged and the scan moves
//! on. Exhausting the list is reported to the caller but is never fatal to
//! the schedule.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::host::{HostCallError, ServerHandle};

/// One restart capability that may exist on the host handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartMethod {
    DispatchCommand,
    ExecuteCommand,
    ConsoleCommand,
    RunCommand,
    Shutdown,
    Stop,
}

impl RestartMethod {
    /// Fixed trial order: command-dispatch surfaces first (a `restart`
    /// command keeps the process supervisor in charge), then the
    /// stop/shutdown fallbacks.
    pub const TRIAL_ORDER: [Self; 6] = [
        Self::DispatchCommand,
        Self::ExecuteCommand,
        Self::ConsoleCommand,
        Self::RunCommand,
        Self::Shutdown,
        Self::Stop,
    ];

    /// The capability's name on the host API surface.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DispatchCommand => "dispatch_command",
            Self::ExecuteCommand => "execute_command",
            Self::ConsoleCommand => "console_command",
            Self::RunCommand => "run_command",
            Self::Shutdown => "shutdown",
            Self::Stop => "stop",
        }
    }

    /// Whether this capability takes a command-string argument.
    const fn takes_command(self) -> bool {
        !matches!(self, Self::Shutdown | Self::Stop)
    }

    fn call(self, handle: &dyn ServerHandle, command: &str) -> Result<(), HostCallError> {
        match self {
            Self::DispatchCommand => handle.dispatch_command(command),
            Self::ExecuteCommand => handle.execute_command(command),
            Self::ConsoleCommand => handle.console_command(command),
            Self::RunCommand => handle.run_command(command),
            Self::Shutdown => handle.shutdown(),
            Self::Stop => handle.stop(),
        }
    }
}

impl fmt::Display for RestartMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal outcome of one tick's restart attempt.
#[derive(Debug, Error)]
pub enum RestartError {
    /// No candidate capability existed or succeeded on this tick.
    #[error("no restart capability available on the host ({tried} candidates tried, {failed} failed)")]
    Unavailable { tried: usize, failed: usize },
}

/// Try each candidate in [`RestartMethod::TRIAL_ORDER`] until one succeeds.
///
/// Returns the capability that issued the restart, or
/// [`RestartError::Unavailable`] when the whole list is exhausted. The caller
/// is expected to log the error and carry on; the next tick retries from the
/// top of the list.
pub fn issue_restart(
    handle: &dyn ServerHandle,
    command: &str,
) -> Result<RestartMethod, RestartError> {
    let mut failed = 0usize;

    for method in RestartMethod::TRIAL_ORDER {
        match method.call(handle, command) {
            Ok(()) => {
                if method.takes_command() {
                    info!("Issued restart via {}({:?})", method.name(), command);
                } else {
                    info!("Called {}() as restart fallback", method.name());
                }
                return Ok(method);
            }
            Err(HostCallError::Unsupported) => {
                debug!("Host does not expose {}; trying next candidate", method.name());
            }
            Err(HostCallError::Failed(reason)) => {
                failed += 1;
                warn!("{} failed: {reason}; trying next candidate", method.name());
            }
        }
    }

    warn!("Could not find a supported API to issue restart; no action taken");
    Err(RestartError::Unavailable {
        tried: RestartMethod::TRIAL_ORDER.len(),
        failed,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Test double that exposes a chosen subset of capabilities and records
    /// every call that reaches one of them.
    struct ScriptedHost {
        /// (capability name, scripted outcome); absent names stay unsupported.
        script: Vec<(&'static str, Result<(), String>)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedHost {
        fn new(script: Vec<(&'static str, Result<(), String>)>) -> Self {
            Self {
                script,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn respond(&self, name: &'static str, argument: Option<&str>) -> Result<(), HostCallError> {
            let outcome = match self.script.iter().find(|(n, _)| *n == name) {
                Some((_, outcome)) => outcome.clone(),
                None => return Err(HostCallError::Unsupported),
            };
            let record = match argument {
                Some(arg) => format!("{name}({arg})"),
                None => format!("{name}()"),
            };
            self.calls.lock().unwrap().push(record);
            outcome.map_err(HostCallError::Failed)
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ServerHandle for ScriptedHost {
        fn dispatch_command(&self, command: &str) -> Result<(), HostCallError> {
            self.respond("dispatch_command", Some(command))
        }
        fn execute_command(&self, command: &str) -> Result<(), HostCallError> {
            self.respond("execute_command", Some(command))
        }
        fn console_command(&self, command: &str) -> Result<(), HostCallError> {
            self.respond("console_command", Some(command))
        }
        fn run_command(&self, command: &str) -> Result<(), HostCallError> {
            self.respond("run_command", Some(command))
        }
        fn shutdown(&self) -> Result<(), HostCallError> {
            self.respond("shutdown", None)
        }
        fn stop(&self) -> Result<(), HostCallError> {
            self.respond("stop", None)
        }
    }

    #[test]
    fn stop_only_host_is_restarted_via_stop() {
        let host = ScriptedHost::new(vec![("stop", Ok(()))]);
        let method = issue_restart(&host, "restart").unwrap();
        assert_eq!(method, RestartMethod::Stop);
        assert_eq!(host.calls(), vec!["stop()"]);
    }

    #[test]
    fn failing_dispatch_falls_back_to_shutdown() {
        let host = ScriptedHost::new(vec![
            ("dispatch_command", Err("command bus offline".to_string())),
            ("shutdown", Ok(())),
        ]);
        let method = issue_restart(&host, "restart").unwrap();
        assert_eq!(method, RestartMethod::Shutdown);
        // Exactly two candidates reached the host: the failure, then the success.
        assert_eq!(host.calls(), vec!["dispatch_command(restart)", "shutdown()"]);
    }

    #[test]
    fn first_command_surface_wins_over_later_candidates() {
        let host = ScriptedHost::new(vec![
            ("dispatch_command", Ok(())),
            ("stop", Ok(())),
        ]);
        let method = issue_restart(&host, "restart").unwrap();
        assert_eq!(method, RestartMethod::DispatchCommand);
        assert_eq!(host.calls(), vec!["dispatch_command(restart)"]);
    }

    #[test]
    fn command_surfaces_receive_the_configured_command() {
        let host = ScriptedHost::new(vec![("console_command", Ok(()))]);
        issue_restart(&host, "restart now").unwrap();
        assert_eq!(host.calls(), vec!["console_command(restart now)"]);
    }

    #[test]
    fn bare_host_reports_unavailable() {
        let host = ScriptedHost::new(vec![]);
        let err = issue_restart(&host, "restart").unwrap_err();
        let RestartError::Unavailable { tried, failed } = err;
        assert_eq!(tried, 6);
        assert_eq!(failed, 0);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn all_failing_candidates_report_unavailable_with_failure_count() {
        let host = ScriptedHost::new(vec![
            ("execute_command", Err("boom".to_string())),
            ("stop", Err("still booting".to_string())),
        ]);
        let RestartError::Unavailable { tried, failed } =
            issue_restart(&host, "restart").unwrap_err();
        assert_eq!(tried, 6);
        assert_eq!(failed, 2);
        assert_eq!(host.calls(), vec!["execute_command(restart)", "stop()"]);
    }
}
