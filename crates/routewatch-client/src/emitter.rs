//! Broadcast-channel event emitter.

use routewatch_core::{WatchEvent, WatchEventEmitter};
use tokio::sync::broadcast;

/// Emitter that fans watch events out to any number of receivers.
///
/// Slow receivers may miss events if the buffer overflows; they observe a
/// `Lagged` error and continue with newer events.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<WatchEvent>,
}

impl BroadcastEmitter {
    /// Create an emitter with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create an emitter with default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl WatchEventEmitter for BroadcastEmitter {
    fn emit(&self, event: WatchEvent) {
        // No receivers is fine.
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn WatchEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use routewatch_core::LogEvent;

    use super::*;

    #[test]
    fn test_emit_without_subscribers() {
        let emitter = BroadcastEmitter::with_defaults();
        assert_eq!(emitter.subscriber_count(), 0);
        emitter.emit(WatchEvent::route_observed(LogEvent::new("/a", "index")));
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let emitter = BroadcastEmitter::new(8);
        let mut first = emitter.subscribe();
        let mut second = emitter.subscribe();
        assert_eq!(emitter.subscriber_count(), 2);

        let event = WatchEvent::route_observed(LogEvent::new("/a", "index"));
        emitter.emit(event.clone());

        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_clone_box_shares_channel() {
        let emitter = BroadcastEmitter::new(4);
        let mut rx = emitter.subscribe();

        let boxed = emitter.clone_box();
        boxed.emit(WatchEvent::frame_rejected("{", "eof"));

        assert_eq!(rx.recv().await.unwrap().event_type(), "frame_rejected");
    }
}
