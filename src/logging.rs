//! Logging setup.
//!
//! The interactive game owns the terminal, so its logs can only go to a
//! file. Headless modes may log to stderr.

use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// No subscriber is installed
    Off,
    Stderr,
    File(&'a Path),
}

/// Install the global subscriber. Levels come from `RUST_LOG`, defaulting
/// to `info`.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|err| anyhow!("Failed to install log subscriber: {err}"))?;
    tracing::debug!(?target, "Logging initialized");
    Ok(())
}
