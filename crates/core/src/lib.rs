//! Core tailing primitives for tailwatch
//!
//! This crate provides:
//! - `WatchedPath` classification (hidden / directory)
//! - `OffsetTable`, the lock-guarded path -> byte offset map
//! - `LineEmitter`, which reads exactly the bytes appended since the last read
//! - `FileOpener`, the platform read-only open primitive
//! - `TailContext`, the shared state handed to every component

pub mod context;
pub mod emitter;
pub mod error;
pub mod offsets;
pub mod path;
pub mod platform;

// Re-exports
pub use context::TailContext;
pub use emitter::{EmitterConfig, LineEmitter, PartialLinePolicy, DEFAULT_MAX_LINE_BYTES};
pub use error::TailError;
pub use offsets::OffsetTable;
pub use path::WatchedPath;
pub use platform::{FileOpener, SystemOpener};

/// Result type for tailing operations
pub type Result<T> = std::result::Result<T, TailError>;
