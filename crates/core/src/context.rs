//! Shared state for one tailing session

use crate::emitter::{EmitterConfig, LineEmitter};
use crate::offsets::OffsetTable;
use crate::platform::SystemOpener;
use parking_lot::Mutex;
use std::io::Write;
use std::path::Path;

/// State handed to the scanner and the reconciler.
///
/// Built once at startup and shared behind an `Arc`.
pub struct TailContext {
    offsets: OffsetTable,
    emitter: LineEmitter,
    output: Mutex<Box<dyn Write + Send>>,
    debug: bool,
}

impl TailContext {
    pub fn new(emitter: LineEmitter, output: Box<dyn Write + Send>, debug: bool) -> Self {
        Self {
            offsets: OffsetTable::new(),
            emitter,
            output: Mutex::new(output),
            debug,
        }
    }

    /// Context writing to stdout through the platform opener
    pub fn stdout(config: EmitterConfig, debug: bool) -> Self {
        Self::new(
            LineEmitter::new(SystemOpener, config),
            Box::new(std::io::stdout()),
            debug,
        )
    }

    /// Emit everything appended to `path` since its recorded offset and record the new one.
    ///
    /// The offset table lock is held for the whole read, so two callers can
    /// never emit the same bytes.
    pub fn tail(&self, path: &Path) -> u64 {
        self.offsets.update(path, |current| {
            let mut output = self.output.lock();
            self.emitter.read_appended(path, current, &mut **output)
        })
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Whether every change event should be logged
    pub fn debug(&self) -> bool {
        self.debug
    }
}
