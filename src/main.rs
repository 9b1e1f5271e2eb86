//! AutoRestart standalone harness.
//!
//! In production the plugin is embedded in a host game-server process, which
//! drives it through `on_enable`/`on_disable`. This binary exists to exercise
//! a full scheduling/invocation cycle without a host: it enables the plugin
//! against a simulated server handle with a short interval, lets the
//! requested number of timer firings happen, disables the plugin, and exits.
//!
//! # Usage
//!
//! ```bash
//! # One 5-second cycle against the built-in demo config
//! cargo run --release
//!
//! # Three 2-second cycles
//! cargo run --release -- --interval 2 --cycles 3
//!
//! # Seed the simulated host's configuration from a TOML file
//! cargo run --release -- --config demo_host.toml
//! ```
//!
//! # Environment Variables
//!
//! - `AUTORESTART_INTERVAL_SECONDS`: interval override consulted when
//!   `--interval` is not given
//! - `RUST_LOG`: logging level (default: info)

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use autorestart::sim::{self, SimulatedHost};
use autorestart::{AutoRestartPlugin, ConfigValue, HostConfig, SECONDS_KEY};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "autorestart")]
#[command(about = "Interval-based automatic restart for embedded game servers")]
#[command(version)]
struct CliArgs {
    /// Restart interval in seconds (bypasses env and host configuration)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Number of timer firings to observe before disabling the plugin
    #[arg(long, default_value = "1")]
    cycles: u64,

    /// Command string sent to the host's command-dispatch surface
    #[arg(long)]
    command: Option<String>,

    /// Path to a TOML file seeding the simulated host's configuration
    #[arg(long)]
    config: Option<String>,
}

/// Interval the simulated host advertises when no `--config` file is given;
/// short enough to watch a cycle complete interactively.
const DEMO_INTERVAL_SECONDS: i64 = 5;

/// Build the simulated host's configuration mapping: from the given TOML
/// file, or the short built-in demo interval.
fn build_host_config(config_path: Option<&str>) -> Result<HostConfig> {
    match config_path {
        Some(path) => sim::load_host_config(Path::new(path))
            .with_context(|| format!("Failed to load host config from {path}")),
        None => {
            let mut config = HostConfig::new();
            config.insert(
                SECONDS_KEY.to_string(),
                ConfigValue::Integer(DEMO_INTERVAL_SECONDS),
            );
            Ok(config)
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  AutoRestart - interval-based server restart harness");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let host_config = build_host_config(args.config.as_deref())?;
    let host = Arc::new(SimulatedHost::with_config(host_config));

    let mut plugin = AutoRestartPlugin::new();
    if let Some(seconds) = args.interval {
        plugin = plugin.with_interval_seconds(seconds);
    }
    if let Some(command) = args.command {
        plugin = plugin.with_restart_command(command);
    }

    plugin.on_enable(host.clone());

    let interval_seconds = plugin
        .schedule()
        .map(autorestart::ScheduleConfig::interval_seconds)
        .context("Plugin failed to arm a schedule")?;
    let observation = Duration::from_secs(interval_seconds * args.cycles + 1);
    info!(
        "Observing {} cycle(s) of {} seconds (Ctrl+C to stop early)",
        args.cycles, interval_seconds
    );

    tokio::select! {
        _ = tokio::time::sleep(observation) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down early");
        }
    }

    plugin.on_disable();

    info!("✓ Harness complete. Commands issued: {:?}", host.commands());
    Ok(())
}
