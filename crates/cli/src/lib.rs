//! tailwatch command line front end
//!
//! Parses arguments, merges configuration, sets up logging and runs the
//! watch session until the process is killed.

pub mod args;
pub mod config;
pub mod logging;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tw_core::TailContext;
use watcher::WatchSession;

pub use args::Cli;
pub use config::{FileConfig, Settings};

/// Make sure the watch root exists, creating it when allowed
pub fn ensure_dir(dir: &Path, create: bool) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }
    if !create {
        anyhow::bail!("Directory does not exist: {}", dir.display());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    info!(dir = %dir.display(), "created watch directory");
    Ok(())
}

/// Tail `settings.dir` to stdout. Only returns on a startup error.
pub fn run(settings: Settings) -> Result<()> {
    ensure_dir(&settings.dir, settings.create_dir)?;

    let ctx = Arc::new(TailContext::stdout(settings.emitter, settings.debug));
    WatchSession::new(ctx, &settings.dir)
        .run()
        .with_context(|| format!("Failed to watch {}", settings.dir.display()))
}
