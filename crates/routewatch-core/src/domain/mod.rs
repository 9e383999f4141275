//! Domain types for the route watcher.
//!
//! These are pure data types with no infrastructure dependencies.

mod log_event;
mod proxy;
mod route_store;
mod selection;
mod session;

pub use log_event::LogEvent;
pub use proxy::{
    ControlMessage, ProxySettings, ProxySettingsError, ProxyType, RunningStatus, SaveProxyRequest,
};
pub use route_store::RouteStateStore;
pub use selection::RowSelection;
pub use session::{DEFAULT_RECONNECT_DELAY, ReconnectPolicy, SessionState};
