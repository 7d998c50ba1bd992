//! Shared path -> byte offset table

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Last-read byte offset for every file seen so far.
///
/// All access goes through one mutex, shared by the startup scan and the
/// event consumer. Entries are created on first sight and never removed.
#[derive(Debug, Default)]
pub struct OffsetTable {
    entries: Mutex<HashMap<PathBuf, u64>>,
}

impl OffsetTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset for `path`, 0 if it has never been read
    pub fn get(&self, path: &Path) -> u64 {
        self.entries.lock().get(path).copied().unwrap_or(0)
    }

    /// Record a new offset for `path`. A value below the current one is ignored.
    pub fn set(&self, path: &Path, offset: u64) {
        let mut entries = self.entries.lock();
        store(&mut entries, path, offset);
    }

    /// Read-modify-write one entry while holding the lock for the whole call.
    ///
    /// `f` receives the current offset (0 when absent) and returns the new one.
    /// Returns the offset actually stored.
    pub fn update<F>(&self, path: &Path, f: F) -> u64
    where
        F: FnOnce(u64) -> u64,
    {
        let mut entries = self.entries.lock();
        let current = entries.get(path).copied().unwrap_or(0);
        let next = f(current);
        store(&mut entries, path, next)
    }

    /// Whether `path` has an entry
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.lock().contains_key(path)
    }

    /// Number of tracked paths
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of the current table, sorted by path
    pub fn snapshot(&self) -> Vec<(PathBuf, u64)> {
        let mut entries: Vec<_> = self
            .entries
            .lock()
            .iter()
            .map(|(path, offset)| (path.clone(), *offset))
            .collect();
        entries.sort();
        entries
    }
}

fn store(entries: &mut HashMap<PathBuf, u64>, path: &Path, offset: u64) -> u64 {
    let slot = entries.entry(path.to_path_buf()).or_insert(0);
    if offset < *slot {
        tracing::debug!(
            path = %path.display(),
            recorded = *slot,
            offset,
            "ignoring offset regression"
        );
    } else {
        *slot = offset;
    }
    *slot
}
