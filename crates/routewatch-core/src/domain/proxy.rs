//! DTOs for the proxy control endpoints.
//!
//! The control surface (start/stop/status/settings) belongs to the server;
//! these types describe the request and response shapes the client uses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body returned by `/proxy/start`, `/proxy/stop` and `/proxy/save-proxy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMessage {
    /// Optional outcome marker (`"success"` on settings saves).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human-readable outcome.
    pub message: String,
}

/// Body returned by `/proxy/is-running`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStatus {
    pub is_running: bool,
}

/// Where the proxy forwards intercepted traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyType {
    /// Plain forward proxy used directly by a browser.
    ZerodayfToBrowser,
    /// Chained to an upstream Burp Suite listener.
    ZerodayfToBurpsuite,
}

impl ProxyType {
    /// Value of the `proxy_type` field when saving settings.
    ///
    /// The server stores `"1"` as browser mode and anything else as Burp
    /// Suite mode.
    pub const fn form_value(&self) -> &'static str {
        match self {
            Self::ZerodayfToBrowser => "1",
            Self::ZerodayfToBurpsuite => "2",
        }
    }
}

/// Body returned by `/proxy/get-proxy`.
///
/// The endpoint answers `{}` when nothing is configured, so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub ip: Option<String>,
    pub port: Option<u16>,
    pub proxy_type: Option<ProxyType>,
    pub source_path: Option<String>,
    pub burpsuite: Option<String>,
    pub framework: Option<String>,
}

impl ProxySettings {
    /// Whether listen address details are present.
    pub const fn is_configured(&self) -> bool {
        self.ip.is_some() && self.port.is_some()
    }
}

/// Rejected before a settings save is sent.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ProxySettingsError {
    #[error("Proxy listen IP cannot be empty")]
    EmptyIp,

    #[error("Invalid port number (1-65535)")]
    InvalidPort,
}

/// Form submitted to `/proxy/save-proxy`.
///
/// The server replaces any previously saved settings and requires every
/// field, so the optional ones are sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveProxyRequest {
    pub ip: String,
    pub port: u16,
    pub proxy_type: ProxyType,
    pub source_path: String,
    pub burpsuite: String,
    pub framework: String,
}

impl SaveProxyRequest {
    pub fn new(ip: impl Into<String>, port: u16, proxy_type: ProxyType) -> Self {
        Self {
            ip: ip.into(),
            port,
            proxy_type,
            source_path: String::new(),
            burpsuite: String::new(),
            framework: String::new(),
        }
    }

    /// Upstream Burp Suite listener, e.g. `http://127.0.0.1:8080`.
    #[must_use]
    pub fn with_burpsuite(mut self, burpsuite: impl Into<String>) -> Self {
        self.burpsuite = burpsuite.into();
        self
    }

    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = source_path.into();
        self
    }

    #[must_use]
    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = framework.into();
        self
    }

    pub fn validate(&self) -> Result<(), ProxySettingsError> {
        if self.ip.trim().is_empty() {
            return Err(ProxySettingsError::EmptyIp);
        }
        if self.port == 0 {
            return Err(ProxySettingsError::InvalidPort);
        }
        Ok(())
    }

    /// Form fields in the order the server declares them.
    pub fn form_fields(&self) -> [(&'static str, String); 6] {
        [
            ("ip", self.ip.trim().to_string()),
            ("port", self.port.to_string()),
            ("proxy_type", self.proxy_type.form_value().to_string()),
            ("source_path", self.source_path.clone()),
            ("burpsuite", self.burpsuite.trim().to_string()),
            ("framework", self.framework.clone()),
        ]
    }
}

impl fmt::Display for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(ip), Some(port)) = (&self.ip, self.port) else {
            return f.write_str("No proxy configured");
        };

        match self.proxy_type {
            Some(ProxyType::ZerodayfToBrowser) => {
                write!(f, "{ip}:{port} (Zerodayf to Browser)")
            }
            _ => write!(
                f,
                "{ip}:{port} (Zerodayf to Burpsuite [{}])",
                self.burpsuite.as_deref().unwrap_or_default()
            ),
        }
    }
}
