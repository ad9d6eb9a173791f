//! Helpers shared by CLI commands.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use upkeep_core::{parse_tasks, seed_tasks, MaintenanceTask};

/// Install the stderr `tracing` subscriber.
///
/// `-q` and `-v` win over `UPKEEP_LOG`, which wins over the configured level.
pub fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let forced = if quiet {
        Some("error")
    } else if verbose {
        Some("debug")
    } else {
        None
    };

    let filter = match forced {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_env("UPKEEP_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(configured)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Read a JSON task list, or fall back to the demo board.
pub fn load_tasks(path: Option<&Path>) -> anyhow::Result<Vec<MaintenanceTask>> {
    let Some(path) = path else {
        tracing::debug!("no task file given, using seed board");
        return Ok(seed_tasks());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read task file {}", path.display()))?;
    let tasks = parse_tasks(&content)
        .with_context(|| format!("invalid task list in {}", path.display()))?;
    tracing::debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
    Ok(tasks)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
