//! Public configuration for the route log client.

use std::time::Duration;

use routewatch_core::contracts::http::proxy::STREAM_LOGS_PATH;
use routewatch_core::{DEFAULT_BASE_URL, ReconnectPolicy, WatchSettings};
use url::Url;

/// Configuration for the stream and control clients.
///
/// Use the builder pattern methods to customize the configuration.
///
/// # Example
///
/// ```
/// use routewatch_client::StreamClientConfig;
/// use std::time::Duration;
///
/// let config = StreamClientConfig::new()
///     .with_base_url("http://10.0.0.5:8000")
///     .with_reconnect_delay(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct StreamClientConfig {
    /// Base URL of the server exposing `/proxy/*`
    pub(crate) base_url: String,
    /// Path of the log stream, joined onto `base_url`
    pub(crate) stream_path: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// TCP/TLS connect timeout. The stream itself has no overall timeout.
    pub(crate) connect_timeout: Duration,
    /// Overall timeout for control requests
    pub(crate) request_timeout: Duration,
    /// What to do after the stream drops
    pub(crate) reconnect: ReconnectPolicy,
}

impl Default for StreamClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: STREAM_LOGS_PATH.to_string(),
            user_agent: concat!("routewatch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl StreamClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from user-facing settings.
    #[must_use]
    pub fn from_settings(settings: &WatchSettings) -> Self {
        Self::new()
            .with_base_url(settings.effective_base_url())
            .with_reconnect_policy(settings.effective_reconnect_policy())
    }

    /// Set the server base URL.
    ///
    /// Defaults to `http://127.0.0.1:8000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the log stream path.
    ///
    /// Defaults to `/proxy/stream-logs`.
    #[must_use]
    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connect timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout for control requests.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the reconnect policy.
    #[must_use]
    pub const fn with_reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Set the fixed delay between an interruption and the next attempt,
    /// keeping the current attempt cap.
    ///
    /// Defaults to 2000ms.
    #[must_use]
    pub const fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect =
            ReconnectPolicy::fixed(delay).with_optional_max_attempts(self.reconnect.max_attempts());
        self
    }

    /// Set or clear the reconnect attempt cap.
    ///
    /// Defaults to no cap.
    #[must_use]
    pub const fn with_max_reconnect_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.reconnect = self.reconnect.with_optional_max_attempts(max_attempts);
        self
    }

    /// The reconnect policy sessions will use.
    pub const fn reconnect_policy(&self) -> ReconnectPolicy {
        self.reconnect
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parsed base URL.
    pub(crate) fn base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    /// Absolute URL of the log stream.
    pub fn stream_url(&self) -> Result<Url, url::ParseError> {
        self.base()?.join(&self.stream_path)
    }
}
