//! Fakes shared by unit tests

use crate::error::WatchError;
use crate::registry::WatchRegistry;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tw_core::{EmitterConfig, LineEmitter, SystemOpener, TailContext};

/// Records registrations instead of talking to the OS
#[derive(Default)]
pub struct RecordingRegistry {
    added: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingRegistry {
    pub fn failing() -> Self {
        Self {
            added: Mutex::default(),
            fail: true,
        }
    }

    pub fn added(&self) -> Vec<PathBuf> {
        self.added.lock().clone()
    }
}

impl WatchRegistry for RecordingRegistry {
    fn add(&self, path: &Path) -> crate::Result<()> {
        if self.fail {
            return Err(WatchError::Register {
                path: path.to_path_buf(),
                source: notify::Error::generic("registration refused"),
            });
        }
        self.added.lock().push(path.to_path_buf());
        Ok(())
    }
}

/// In-memory output sink
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Context writing into `capture`
pub fn context(capture: &Capture) -> Arc<TailContext> {
    Arc::new(TailContext::new(
        LineEmitter::new(SystemOpener, EmitterConfig::default()),
        Box::new(capture.clone()),
        false,
    ))
}
