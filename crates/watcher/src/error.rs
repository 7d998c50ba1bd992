//! Fatal watcher errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a watch session
#[derive(Debug, Error)]
pub enum WatchError {
    /// The notify backend could not be created
    #[error("failed to create file watcher: {0}")]
    Init(#[source] notify::Error),

    /// A path could not be added to the watch set
    #[error("failed to watch {}: {source}", path.display())]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The root directory is missing or not a directory
    #[error("cannot access watch root {}: {reason}", path.display())]
    Root { path: PathBuf, reason: String },

    /// The startup walk hit an unreadable entry
    #[error("initial scan of {} failed: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The reconciler thread could not be started
    #[error("failed to spawn reconciler thread: {0}")]
    Spawn(#[source] std::io::Error),
}
