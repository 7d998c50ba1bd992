//! Classification of paths under observation

use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// A path seen by the scanner or the event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedPath {
    pub path: PathBuf,
    pub is_hidden: bool,
    pub is_dir: bool,
}

impl WatchedPath {
    /// Build from a path and metadata already obtained by the caller
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        Self {
            path: path.to_path_buf(),
            is_hidden: is_hidden(path),
            is_dir: metadata.is_dir(),
        }
    }

    /// Stat `path` and classify it
    pub fn stat(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self::from_metadata(path, &metadata))
    }

    /// Whether this path should be tailed at all
    pub fn is_tailable(&self) -> bool {
        !self.is_hidden && !self.is_dir
    }
}

/// True when the final component starts with `.`
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Lexically normalise a path: drop `.` components and fold `..` into the parent.
///
/// Does not touch the filesystem, so symlinks are not resolved.
pub fn clean(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                );
                if last_is_normal {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
