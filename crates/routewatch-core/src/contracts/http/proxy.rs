//! Proxy API route constants.

/// Long-lived `text/event-stream` of route observations.
pub const STREAM_LOGS_PATH: &str = "/proxy/stream-logs";

/// Start the intercepting proxy (POST).
pub const START_PATH: &str = "/proxy/start";

/// Stop the intercepting proxy (POST).
pub const STOP_PATH: &str = "/proxy/stop";

/// Whether the proxy is running (GET).
pub const IS_RUNNING_PATH: &str = "/proxy/is-running";

/// Saved proxy listen settings (GET).
pub const GET_PROXY_PATH: &str = "/proxy/get-proxy";

/// Replace the saved proxy settings (POST, form-encoded).
pub const SAVE_PROXY_PATH: &str = "/proxy/save-proxy";

/// Literal marker in front of each JSON record on the stream.
pub const DATA_PREFIX: &str = "data:";
