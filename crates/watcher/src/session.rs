//! Watch session lifecycle
//!
//! Owns the notify watcher for the life of the process and wires the startup
//! scan to the event reconciler.

use crate::error::WatchError;
use crate::reconcile::EventReconciler;
use crate::registry::{NotifyRegistry, WatchRegistry};
use crate::scan::{DirectoryScanner, ScanSummary};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info};
use tw_core::path::clean;
use tw_core::TailContext;

const RECONCILER_THREAD: &str = "tailwatch-reconcile";

/// A tailing session rooted at one directory
pub struct WatchSession {
    ctx: Arc<TailContext>,
    root: PathBuf,
}

/// A started session. Keeps the watcher alive while held.
pub struct SessionHandle {
    _registry: Arc<NotifyRegistry>,
    consumer: JoinHandle<()>,
    summary: ScanSummary,
}

impl WatchSession {
    pub fn new(ctx: Arc<TailContext>, root: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            root: root.into(),
        }
    }

    /// Start watching and run the initial scan.
    ///
    /// The root watch and the reconciler are set up before the scan, so files
    /// created while the scan runs are picked up by events. The offset table
    /// serializes the two paths.
    pub fn start(self) -> crate::Result<SessionHandle> {
        // Offsets are keyed by path, and notify reports absolute paths
        let root = resolve_root(&self.root)?;

        let (tx, rx) = crossbeam_channel::unbounded();
        let registry = Arc::new(NotifyRegistry::new(tx)?);
        registry.add(&root)?;
        info!(root = %root.display(), "watching directory");

        let reconciler = EventReconciler::new(Arc::clone(&self.ctx), registry.clone());
        let consumer = thread::Builder::new()
            .name(RECONCILER_THREAD.to_string())
            .spawn(move || reconciler.run(rx))
            .map_err(WatchError::Spawn)?;

        let summary = DirectoryScanner::new(Arc::clone(&self.ctx), registry.clone())
            .walk(&root)?;

        Ok(SessionHandle {
            _registry: registry,
            consumer,
            summary,
        })
    }

    /// Start the session and block for the rest of the process lifetime
    pub fn run(self) -> crate::Result<()> {
        self.start()?.wait();
        Ok(())
    }
}

impl SessionHandle {
    /// Result of the initial scan
    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    /// Block until the reconciler exits, which only happens if the watcher is torn down
    pub fn wait(self) {
        let SessionHandle {
            _registry,
            consumer,
            ..
        } = self;
        if consumer.join().is_err() {
            error!("reconciler thread panicked");
        }
    }
}

/// Absolute, lexically clean form of `root`, which must be an existing directory
fn resolve_root(root: &Path) -> crate::Result<PathBuf> {
    let invalid = |reason: String| WatchError::Root {
        path: root.to_path_buf(),
        reason,
    };

    let absolute = std::path::absolute(root).map_err(|err| invalid(err.to_string()))?;
    let root = clean(&absolute);
    let metadata = std::fs::metadata(&root).map_err(|err| invalid(err.to_string()))?;
    if !metadata.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    Ok(root)
}
