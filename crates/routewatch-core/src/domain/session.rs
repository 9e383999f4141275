//! Stream session lifecycle vocabulary.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between an interruption and the next subscription attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(2000);

/// Lifecycle state of one stream session.
///
/// ```text
/// Idle -> Connecting -> Open -> Reconnecting -> Connecting -> ...
///            |            |          |
///            +------------+----------+--> Closed (terminal)
/// ```
///
/// A failed subscribe goes `Connecting -> Reconnecting`, the same as an
/// interruption of an open stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created, not yet started.
    #[default]
    Idle,
    /// Subscription request in flight.
    Connecting,
    /// Subscription established; frames are flowing.
    Open,
    /// Interrupted; waiting for the retry timer.
    Reconnecting,
    /// Stopped. Never left.
    Closed,
}

impl SessionState {
    /// Whether this state can never be left.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether `self -> next` is a legal transition.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Connecting | Self::Closed)
                | (Self::Connecting, Self::Open | Self::Reconnecting | Self::Closed)
                | (Self::Open, Self::Reconnecting | Self::Closed)
                | (Self::Reconnecting, Self::Connecting | Self::Closed)
        )
    }

    /// Stable lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Reconnecting => "reconnecting",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retry policy applied after every interruption.
///
/// Fixed delay, no backoff growth. The attempt cap is unset by default, so
/// the session retries forever until it is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    delay: Duration,
    max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy {
    /// Retry forever after `delay`.
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Give up after `max_attempts` consecutive failed attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set or clear the attempt cap.
    #[must_use]
    pub const fn with_optional_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay before each retry.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Attempt cap, if any.
    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Delay before retry number `attempt` (1-based, counted since the last
    /// successful subscription), or `None` once the cap is exhausted.
    pub const fn next_delay(&self, attempt: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt > max => None,
            _ => Some(self.delay),
        }
    }
}
