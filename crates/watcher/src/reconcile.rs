//! Event reconciliation
//!
//! Turns change notifications into "read what was appended" operations
//! against the shared offset table.

use crate::event::{ChangeEvent, ChangeOp};
use crate::registry::WatchRegistry;
use crossbeam_channel::Receiver;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tw_core::{TailContext, WatchedPath};

/// Single consumer of the change event stream
pub struct EventReconciler {
    ctx: Arc<TailContext>,
    registry: Arc<dyn WatchRegistry>,
}

impl EventReconciler {
    pub fn new(ctx: Arc<TailContext>, registry: Arc<dyn WatchRegistry>) -> Self {
        Self { ctx, registry }
    }

    /// Drain `events` until the channel disconnects.
    ///
    /// Backend errors share the channel with events, so both are handled in
    /// arrival order. Errors are logged and never stop the loop.
    pub fn run(&self, events: Receiver<notify::Result<notify::Event>>) {
        for message in events.iter() {
            match message {
                Ok(event) => {
                    for change in ChangeEvent::from_notify(event) {
                        self.handle(&change);
                    }
                }
                Err(err) => warn!(error = %err, "watch error"),
            }
        }
        debug!("event channel closed, reconciler exiting");
    }

    /// Apply one change event. Create runs before write when both bits are set.
    pub fn handle(&self, event: &ChangeEvent) {
        if self.ctx.debug() {
            info!(op = %event.op, path = %event.path.display(), "change event");
        }

        if event.op.contains(ChangeOp::CREATE) {
            self.on_create(&event.path);
        }
        if event.op.contains(ChangeOp::WRITE) {
            self.on_write(&event.path);
        }
    }

    fn on_create(&self, path: &Path) {
        if !is_tailable(path) {
            return;
        }

        if let Err(err) = self.registry.add(path) {
            warn!(error = %err, "failed to watch new file");
        }
        let offset = self.ctx.tail(path);
        debug!(path = %path.display(), offset, "tracking new file");
    }

    fn on_write(&self, path: &Path) {
        if !is_tailable(path) {
            return;
        }

        let offset = self.ctx.tail(path);
        debug!(path = %path.display(), offset, "caught up");
    }
}

fn is_tailable(path: &Path) -> bool {
    match WatchedPath::stat(path) {
        Ok(watched) => watched.is_tailable(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "ignoring unreadable path");
            false
        }
    }
}
