//! File system watching for tailwatch
//!
//! This crate wires the `notify` backend to the core tailing primitives:
//! - Change event classification (create / write / other)
//! - Watch registration behind a small trait
//! - Startup directory scan
//! - Event reconciliation loop
//! - Session lifecycle

pub mod error;
pub mod event;
pub mod reconcile;
pub mod registry;
pub mod scan;
pub mod session;

#[cfg(test)]
mod test_support;

pub use error::WatchError;
pub use event::{ChangeEvent, ChangeOp};
pub use reconcile::EventReconciler;
pub use registry::{NotifyRegistry, WatchRegistry};
pub use scan::{DirectoryScanner, ScanSummary};
pub use session::{SessionHandle, WatchSession};

/// Result type for watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;
