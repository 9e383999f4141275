#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod events;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ControlMessage, DEFAULT_RECONNECT_DELAY, LogEvent, ProxySettings, ProxySettingsError,
    ProxyType, ReconnectPolicy, RouteStateStore, RowSelection, RunningStatus, SaveProxyRequest,
    SessionState,
};
pub use events::WatchEvent;
pub use ports::{NoopWatchEmitter, RouteView, WatchEventEmitter};
pub use settings::{
    DEFAULT_BASE_URL, SettingsError, SettingsUpdate, WatchSettings, validate_settings,
};

// Silence unused dev-dependency warnings for crates only used by some test targets
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use serde_json as _;
