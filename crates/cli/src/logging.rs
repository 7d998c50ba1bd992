//! Tracing subscriber setup
//!
//! Logs go to stderr; stdout carries only tailed lines.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const DEBUG_FILTER: &str = "info,tailwatch_core=debug,watcher=debug,cli_lib=debug";

/// Default filter directives, overridden by `RUST_LOG`
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber.
///
/// With `log_file` set, logs are mirrored to that file through a background
/// writer; the returned guard must be held until exit to flush it.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("Failed to install log subscriber")?;
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", log_file.display()))?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(Some(guard))
}
