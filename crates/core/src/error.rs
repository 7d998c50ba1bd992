//! Error types for per-file read operations

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading appended data from a tailed file
#[derive(Debug, Error)]
pub enum TailError {
    /// The file could not be opened read-only
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seeking to the recorded offset failed
    #[error("failed to seek {} to offset {offset}: {source}", path.display())]
    Seek {
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error interrupted the line scan
    #[error("error reading {} at offset {offset}: {source}", path.display())]
    Scan {
        path: PathBuf,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// A line exceeded the configured maximum length
    #[error("line in {} at offset {offset} exceeds {limit} bytes", path.display())]
    LineTooLong {
        path: PathBuf,
        offset: u64,
        limit: usize,
    },

    /// Writing an emitted line to the output sink failed
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}
