//! Event emitter trait for watch events.
//!
//! Implementations handle transport details (channels, terminal output, etc.).

use crate::events::WatchEvent;

/// Trait for emitting watch events.
///
/// This is also the error sink for rejected frames: the session reports
/// them here and keeps going.
///
/// # Implementations
///
/// - `NoopWatchEmitter` - For tests and contexts that don't need events
/// - `BroadcastEmitter` in `routewatch-client` - fans out over a tokio broadcast channel
pub trait WatchEventEmitter: Send + Sync {
    /// Emit a watch event.
    ///
    /// Must not block: the session calls this from its read loop.
    fn emit(&self, event: WatchEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn WatchEventEmitter>;
}

/// A no-op event emitter.
#[derive(Debug, Clone, Default)]
pub struct NoopWatchEmitter;

impl NoopWatchEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl WatchEventEmitter for NoopWatchEmitter {
    fn emit(&self, _event: WatchEvent) {}

    fn clone_box(&self) -> Box<dyn WatchEventEmitter> {
        Box::new(self.clone())
    }
}
