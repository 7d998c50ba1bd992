//! Platform-specific read-only file opening

use std::fs::File;
use std::io;
use std::path::Path;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

/// Opens tailed files for reading.
///
/// The tailer must never block writers, which needs different flags per platform.
pub trait FileOpener: Send + Sync {
    fn open_read_only(&self, path: &Path) -> io::Result<File>;
}

/// Opener for the current target
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open_read_only(&self, path: &Path) -> io::Result<File> {
        #[cfg(unix)]
        {
            unix::open_read_only(path)
        }

        #[cfg(windows)]
        {
            windows::open_read_only(path)
        }

        #[cfg(not(any(unix, windows)))]
        {
            File::open(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[test]
    fn test_open_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.log");
        std::fs::write(&path, b"hello\n").unwrap();

        let mut file = SystemOpener.open_read_only(&path).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn test_open_is_read_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.log");
        std::fs::write(&path, b"hello\n").unwrap();

        let mut file = SystemOpener.open_read_only(&path).unwrap();
        assert!(file.write_all(b"nope").is_err());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(SystemOpener
            .open_read_only(&temp_dir.path().join("missing.log"))
            .is_err());
    }
}
