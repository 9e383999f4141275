//! Stream session state machine.
//!
//! A [`StreamSession`] runs as one spawned task that subscribes through a
//! [`StreamTransport`], feeds the byte stream through the decoder and parser,
//! and reconciles each event into the shared [`RouteStateStore`]. When the
//! transport fails or the server closes the response, the task waits for the
//! policy delay and subscribes again.
//!
//! Every suspension point (subscribe, next chunk, retry sleep) races the
//! session's [`CancellationToken`], and the token is re-checked after the
//! retry sleep, so a stopped session can never open a new subscription.

use std::sync::Arc;

use futures_util::StreamExt;
use routewatch_core::{
    ReconnectPolicy, RouteStateStore, SessionState, WatchEvent, WatchEventEmitter,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::decoder::decode_lines;
use crate::error::StreamError;
use crate::parser::EventFrameParser;
use crate::transport::{ByteStream, StreamTransport};

/// One subscription lifecycle, from `Idle` to the terminal `Closed`.
///
/// Consumed by [`start`](Self::start); a stopped session is never restarted.
pub struct StreamSession {
    id: Uuid,
    transport: Arc<dyn StreamTransport>,
    store: Arc<RouteStateStore>,
    emitter: Arc<dyn WatchEventEmitter>,
    policy: ReconnectPolicy,
    cancel: CancellationToken,
    state_tx: Arc<watch::Sender<SessionState>>,
}

/// How a subscription's read loop ended.
enum PumpExit {
    Cancelled,
    Interrupted(StreamError),
}

impl StreamSession {
    /// Create an idle session.
    pub fn new(
        transport: Arc<dyn StreamTransport>,
        store: Arc<RouteStateStore>,
        emitter: Arc<dyn WatchEventEmitter>,
        policy: ReconnectPolicy,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        Self {
            id: Uuid::new_v4(),
            transport,
            store,
            emitter,
            policy,
            cancel: CancellationToken::new(),
            state_tx: Arc::new(state_tx),
        }
    }

    /// Session identifier used in logs and events.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Spawn the session task and return its handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> SessionHandle {
        let id = self.id;
        let cancel = self.cancel.clone();
        let state_tx = Arc::clone(&self.state_tx);
        let task = tokio::spawn(self.run());

        SessionHandle {
            id,
            cancel,
            state_tx,
            task: Some(task),
        }
    }

    async fn run(self) {
        let mut attempt: u32 = 0;

        while !self.cancel.is_cancelled() {
            self.transition(SessionState::Connecting);
            debug!(session_id = %self.id, attempt, "Subscribing to log stream");

            let subscribed = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                result = self.transport.subscribe() => result,
            };

            let reason = match subscribed {
                Ok(stream) => {
                    attempt = 0;
                    self.transition(SessionState::Open);
                    info!(session_id = %self.id, "Log stream open");

                    match self.pump(stream).await {
                        PumpExit::Cancelled => break,
                        PumpExit::Interrupted(err) => err,
                    }
                }
                Err(err) => err,
            };

            attempt = attempt.saturating_add(1);
            self.transition(SessionState::Reconnecting);

            let Some(delay) = self.policy.next_delay(attempt) else {
                error!(
                    session_id = %self.id,
                    attempt,
                    error = %reason,
                    "Reconnect attempts exhausted, closing log stream"
                );
                self.emitter
                    .emit(WatchEvent::interrupted(reason.to_string(), None, attempt));
                break;
            };

            let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
            warn!(
                session_id = %self.id,
                attempt,
                delay_ms,
                error = %reason,
                "Connection to log stream interrupted, will try to reconnect"
            );
            self.emitter.emit(WatchEvent::interrupted(
                reason.to_string(),
                Some(delay),
                attempt,
            ));

            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        self.transition(SessionState::Closed);
        info!(session_id = %self.id, "Log stream closed");
    }

    /// Read one subscription until it ends, fails, or the session is stopped.
    ///
    /// The byte stream is dropped on return, which releases the connection.
    async fn pump(&self, stream: ByteStream) -> PumpExit {
        let lines = decode_lines(stream);
        tokio::pin!(lines);

        loop {
            let next = tokio::select! {
                biased;
                () = self.cancel.cancelled() => return PumpExit::Cancelled,
                next = lines.next() => next,
            };

            match next {
                Some(Ok(line)) => self.handle_line(&line),
                Some(Err(err)) => return PumpExit::Interrupted(err),
                None => return PumpExit::Interrupted(StreamError::Closed),
            }
        }
    }

    fn handle_line(&self, line: &str) {
        match EventFrameParser::parse(line) {
            Ok(Some(event)) => {
                debug!(
                    session_id = %self.id,
                    route = %event.route,
                    endpoint = %event.endpoint,
                    "Route observed"
                );
                self.store.upsert(event.clone());
                self.emitter.emit(WatchEvent::route_observed(event));
            }
            Ok(None) => {}
            Err(err) => {
                warn!(session_id = %self.id, line = err.line(), error = %err, "Dropping malformed frame");
                self.emitter
                    .emit(WatchEvent::frame_rejected(err.line(), err.to_string()));
            }
        }
    }

    fn transition(&self, next: SessionState) {
        let prev = self.state_tx.send_replace(next);
        debug_assert!(
            prev.can_transition_to(next),
            "illegal session transition {prev} -> {next}"
        );
        debug!(session_id = %self.id, from = %prev, to = %next, "Session state changed");
        self.emitter.emit(WatchEvent::state_changed(self.id, next));
    }
}

/// Owner's handle to a running [`StreamSession`].
///
/// Dropping the handle cancels the session; [`stop`](Self::stop) also waits
/// for the task to release its connection.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    cancel: CancellationToken,
    state_tx: Arc<watch::Sender<SessionState>>,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Session identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Receiver that observes every state change.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Whether the session task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the session and wait for it to reach `Closed`.
    ///
    /// Idempotent. Cancels any in-flight subscribe, read, or retry timer.
    pub async fn stop(&mut self) {
        self.cancel.cancel();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(session_id = %self.id, error = %e, "Stream session task failed");
            }
        }

        // The task normally publishes Closed itself; cover a panicked task.
        self.state_tx.send_if_modified(|state| {
            if state.is_terminal() {
                false
            } else {
                *state = SessionState::Closed;
                true
            }
        });
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
