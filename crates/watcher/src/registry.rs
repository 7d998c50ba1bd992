//! Watch set registration

use crate::error::WatchError;
use crossbeam_channel::Sender;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::Path;

/// Adds paths to the set the OS reports changes for
pub trait WatchRegistry: Send + Sync {
    fn add(&self, path: &Path) -> crate::Result<()>;
}

/// Registry backed by the platform's recommended notify watcher.
///
/// Events and backend errors are forwarded, in arrival order, to one channel.
/// Dropping the registry stops the OS watcher.
pub struct NotifyRegistry {
    watcher: Mutex<RecommendedWatcher>,
}

impl NotifyRegistry {
    pub fn new(tx: Sender<notify::Result<notify::Event>>) -> crate::Result<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| {
                // Receiver gone means the session is shutting down
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(WatchError::Init)?;

        Ok(Self {
            watcher: Mutex::new(watcher),
        })
    }
}

impl WatchRegistry for NotifyRegistry {
    fn add(&self, path: &Path) -> crate::Result<()> {
        self.watcher
            .lock()
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Register {
                path: path.to_path_buf(),
                source,
            })
    }
}
