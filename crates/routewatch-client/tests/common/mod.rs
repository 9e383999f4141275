//! Shared fixtures for routewatch-client integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use routewatch_client::{ByteStream, StreamError, StreamResult, StreamTransport};
use routewatch_core::SessionState;
use tokio::sync::watch;

/// How a scripted subscription ends after its chunks are delivered.
#[derive(Debug, Clone, Copy)]
pub enum StreamEnd {
    /// Stay open until the session drops it.
    Hold,
    /// Server closes the response.
    Close,
    /// Connection reset.
    Reset,
}

/// One scripted subscription attempt.
#[derive(Debug, Clone)]
pub enum Attempt {
    /// Subscribe fails outright.
    Refuse,
    /// Subscribe succeeds and delivers `chunks`.
    Stream {
        chunks: Vec<&'static [u8]>,
        end: StreamEnd,
    },
}

impl Attempt {
    pub fn hold(chunks: &[&'static str]) -> Self {
        Self::stream(chunks, StreamEnd::Hold)
    }

    pub fn reset(chunks: &[&'static str]) -> Self {
        Self::stream(chunks, StreamEnd::Reset)
    }

    pub fn close(chunks: &[&'static str]) -> Self {
        Self::stream(chunks, StreamEnd::Close)
    }

    fn stream(chunks: &[&'static str], end: StreamEnd) -> Self {
        Self::Stream {
            chunks: chunks.iter().copied().map(str::as_bytes).collect(),
            end,
        }
    }
}

/// Transport that replays a fixed script, one entry per subscribe call.
///
/// Once the script runs out every further subscription stays open with no
/// data.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Attempt>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Attempt>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of subscribe calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamTransport for ScriptedTransport {
    async fn subscribe(&self) -> StreamResult<ByteStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let attempt = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Attempt::hold(&[]));

        match attempt {
            Attempt::Refuse => Err(StreamError::Transport("connection refused".to_string())),
            Attempt::Stream { chunks, end } => {
                let body = stream::iter(
                    chunks
                        .into_iter()
                        .map(|chunk| Ok(Bytes::from_static(chunk)))
                        .collect::<Vec<StreamResult<Bytes>>>(),
                );
                let stream = match end {
                    StreamEnd::Hold => body.chain(stream::pending()).boxed(),
                    StreamEnd::Close => body.boxed(),
                    StreamEnd::Reset => body
                        .chain(stream::once(async {
                            Err(StreamError::Transport("connection reset".to_string()))
                        }))
                        .boxed(),
                };
                Ok(stream)
            }
        }
    }
}

/// Wait (in virtual time when paused) until `condition` holds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(60), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached within timeout");
}

/// Wait until the receiver observes `state`.
pub async fn wait_for_state(rx: &mut watch::Receiver<SessionState>, state: SessionState) {
    tokio::time::timeout(Duration::from_secs(60), rx.wait_for(|s| *s == state))
        .await
        .expect("state not reached within timeout")
        .expect("session state channel closed");
}
