//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from adapters.
//! They contain no implementation details and use only domain types.

pub mod event_emitter;
pub mod route_view;

pub use event_emitter::{NoopWatchEmitter, WatchEventEmitter};
pub use route_view::RouteView;
