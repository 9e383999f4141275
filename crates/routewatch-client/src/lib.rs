#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod control;
mod decoder;
mod emitter;
mod error;
mod parser;
mod session;
mod transport;
mod watcher;

// ============================================================================
// Public API
// ============================================================================

// Configuration
pub use config::StreamClientConfig;

// Stream pipeline
pub use decoder::{FrameDecoder, Lines, decode_lines};
pub use parser::EventFrameParser;

// Session lifecycle
pub use session::{SessionHandle, StreamSession};
pub use watcher::RouteWatcher;

// Transport port and adapter
pub use transport::{ByteStream, ReqwestTransport, StreamTransport};

// Events
pub use emitter::BroadcastEmitter;

// Control endpoints
pub use control::ControlClient;

// Errors
pub use error::{ControlError, ControlResult, FrameError, StreamError, StreamResult};

// Silence unused dev-dependency warnings for crates only used by integration tests
#[cfg(test)]
use axum as _;
