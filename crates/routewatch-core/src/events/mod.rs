//! Canonical event union emitted while watching the route log stream.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "route_observed", "event": { "route": "/a", "endpoint": "index" } }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{LogEvent, SessionState};

/// Everything a stream session reports to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    /// The session moved to a new lifecycle state.
    StateChanged {
        /// Session that changed state.
        #[serde(rename = "sessionId")]
        session_id: Uuid,
        /// The state entered.
        state: SessionState,
    },

    /// A frame was parsed and reconciled into the route store.
    RouteObserved {
        /// The event as stored.
        event: LogEvent,
    },

    /// A non-empty frame could not be parsed and was dropped.
    FrameRejected {
        /// The line after prefix stripping and trimming.
        line: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The transport failed or ended; a retry may be scheduled.
    Interrupted {
        /// Transport diagnostic.
        reason: String,
        /// Delay before the next attempt, or `None` when giving up.
        #[serde(rename = "retryInMs")]
        retry_in_ms: Option<u64>,
        /// Consecutive attempt number the retry will be.
        attempt: u32,
    },
}

impl WatchEvent {
    /// Create a state change event.
    pub const fn state_changed(session_id: Uuid, state: SessionState) -> Self {
        Self::StateChanged { session_id, state }
    }

    /// Create a route observed event.
    pub const fn route_observed(event: LogEvent) -> Self {
        Self::RouteObserved { event }
    }

    /// Create a frame rejected event.
    pub fn frame_rejected(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FrameRejected {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create an interruption event.
    pub fn interrupted(reason: impl Into<String>, retry_in: Option<Duration>, attempt: u32) -> Self {
        Self::Interrupted {
            reason: reason.into(),
            retry_in_ms: retry_in.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            attempt,
        }
    }

    /// Get the event type name as a string.
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::RouteObserved { .. } => "route_observed",
            Self::FrameRejected { .. } => "frame_rejected",
            Self::Interrupted { .. } => "interrupted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_observed_wire_format() {
        let event = WatchEvent::route_observed(LogEvent::new("/a", "index"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "route_observed");
        assert_eq!(json["event"]["route"], "/a");
        assert_eq!(json["event"]["endpoint"], "index");
    }

    #[test]
    fn test_state_changed_uses_camel_case_id() {
        let id = Uuid::new_v4();
        let event = WatchEvent::state_changed(id, SessionState::Open);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "state_changed");
        assert_eq!(json["sessionId"], id.to_string());
        assert_eq!(json["state"], "open");
    }

    #[test]
    fn test_interrupted_retry_millis() {
        let event = WatchEvent::interrupted("reset", Some(Duration::from_secs(2)), 1);
        match event {
            WatchEvent::Interrupted {
                retry_in_ms,
                attempt,
                ..
            } => {
                assert_eq!(retry_in_ms, Some(2000));
                assert_eq!(attempt, 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_event_type_matches_tag() {
        let events = [
            WatchEvent::state_changed(Uuid::nil(), SessionState::Idle),
            WatchEvent::route_observed(LogEvent::new("/a", "b")),
            WatchEvent::frame_rejected("{", "EOF"),
            WatchEvent::interrupted("reset", None, 3),
        ];

        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.event_type());
        }
    }
}
