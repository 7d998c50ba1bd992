//! Startup scan of the watch root
//!
//! Registers every file already present and emits its existing contents
//! before live events take over.

use crate::error::WatchError;
use crate::registry::WatchRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tw_core::path::is_hidden;
use tw_core::TailContext;
use walkdir::{DirEntry, WalkDir};

/// Counts reported by a completed walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files registered and read
    pub files: usize,
    /// Entries passed over (directories, hidden files, dangling links, ...)
    pub skipped: usize,
}

/// One-shot walk of the root directory
pub struct DirectoryScanner {
    ctx: Arc<TailContext>,
    registry: Arc<dyn WatchRegistry>,
}

impl DirectoryScanner {
    pub fn new(ctx: Arc<TailContext>, registry: Arc<dyn WatchRegistry>) -> Self {
        Self { ctx, registry }
    }

    /// Register and read every regular, non-hidden file directly under `root`.
    ///
    /// Symlinks count when their target is a regular file. Subdirectories are
    /// not descended into. Any walk or registration error aborts the scan.
    pub fn walk(&self, root: &Path) -> crate::Result<ScanSummary> {
        let mut summary = ScanSummary::default();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| WatchError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if !is_regular_file(&entry) || is_hidden(path) {
                debug!(path = %path.display(), "skipping entry");
                summary.skipped += 1;
                continue;
            }

            self.registry.add(path)?;
            let offset = self.ctx.tail(path);
            debug!(path = %path.display(), offset, "tracking file");
            summary.files += 1;
        }

        info!(
            root = %root.display(),
            files = summary.files,
            skipped = summary.skipped,
            "initial scan complete"
        );
        Ok(summary)
    }
}

/// Links are judged by their target, the same way change events are
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        return std::fs::metadata(entry.path())
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
    }
    entry.file_type().is_file()
}
