//! Owner of the single current stream session.

use std::sync::Arc;

use routewatch_core::{LogEvent, ReconnectPolicy, RouteStateStore, SessionState, WatchEventEmitter};
use tokio::sync::{Mutex, watch};
use tracing::info;
use uuid::Uuid;

use crate::config::StreamClientConfig;
use crate::error::StreamResult;
use crate::session::{SessionHandle, StreamSession};
use crate::transport::{ReqwestTransport, StreamTransport};

/// Watches the route log for one viewer.
///
/// Holds the route store and at most one live [`StreamSession`]. Starting
/// again always stops the previous session first, so two sessions never
/// write to the store at once.
pub struct RouteWatcher {
    transport: Arc<dyn StreamTransport>,
    emitter: Arc<dyn WatchEventEmitter>,
    policy: ReconnectPolicy,
    store: Arc<RouteStateStore>,
    current: Mutex<Option<SessionHandle>>,
}

impl RouteWatcher {
    /// Create a watcher over an arbitrary transport.
    pub fn new(
        transport: Arc<dyn StreamTransport>,
        emitter: Arc<dyn WatchEventEmitter>,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            transport,
            emitter,
            policy,
            store: Arc::new(RouteStateStore::new()),
            current: Mutex::new(None),
        }
    }

    /// Create a watcher that streams over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(
        config: &StreamClientConfig,
        emitter: Arc<dyn WatchEventEmitter>,
    ) -> StreamResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(
            Arc::new(transport),
            emitter,
            config.reconnect_policy(),
        ))
    }

    /// Shared route store.
    pub fn store(&self) -> Arc<RouteStateStore> {
        Arc::clone(&self.store)
    }

    /// Start watching with a fresh session and an empty store.
    ///
    /// Any running session is stopped and awaited first.
    pub async fn start(&self) -> Uuid {
        let mut current = self.current.lock().await;

        if let Some(mut previous) = current.take() {
            info!(session_id = %previous.id(), "Replacing log stream session");
            previous.stop().await;
        }
        self.store.clear();

        let session = StreamSession::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.store),
            Arc::clone(&self.emitter),
            self.policy,
        );
        let handle = session.start();
        let id = handle.id();
        *current = Some(handle);
        id
    }

    /// Stop the current session, if any.
    ///
    /// Returns `true` if a session was stopped. The store keeps its entries.
    pub async fn stop(&self) -> bool {
        let Some(mut handle) = self.current.lock().await.take() else {
            return false;
        };
        handle.stop().await;
        true
    }

    /// State of the current session, or `None` when none was started.
    pub async fn state(&self) -> Option<SessionState> {
        self.current.lock().await.as_ref().map(SessionHandle::state)
    }

    /// State receiver of the current session.
    pub async fn subscribe_state(&self) -> Option<watch::Receiver<SessionState>> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(SessionHandle::subscribe_state)
    }

    /// Whether a session is running and not yet closed.
    pub async fn is_watching(&self) -> bool {
        self.state()
            .await
            .is_some_and(|state| !state.is_terminal())
    }

    /// Entries whose route contains `predicate`, ignoring case.
    pub fn filter(&self, predicate: &str) -> Vec<LogEvent> {
        self.store.filter(predicate)
    }

    /// Drop every stored entry without touching the session.
    pub fn clear(&self) {
        self.store.clear();
    }
}
