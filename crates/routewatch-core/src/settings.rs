//! Watch settings and validation.
//!
//! Raw, user-facing configuration values. Adapters read these from their own
//! sources (env, flags) and turn them into client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_RECONNECT_DELAY, ReconnectPolicy};

/// Default server base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Settings for watching the route log stream.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WatchSettings {
    /// Base URL of the server exposing `/proxy/*`.
    pub base_url: Option<String>,

    /// Fixed delay between an interruption and the next attempt.
    pub reconnect_delay_ms: Option<u64>,

    /// Consecutive failed attempts before giving up. Unset retries forever.
    pub max_reconnect_attempts: Option<u32>,
}

impl WatchSettings {
    /// Create settings with the reference defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            reconnect_delay_ms: Some(2000),
            max_reconnect_attempts: None,
        }
    }

    /// Get the effective base URL (with default fallback).
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Get the effective reconnect policy.
    pub const fn effective_reconnect_policy(&self) -> ReconnectPolicy {
        let delay = match self.reconnect_delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_RECONNECT_DELAY,
        };
        ReconnectPolicy::fixed(delay).with_optional_max_attempts(self.max_reconnect_attempts)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref url) = other.base_url {
            self.base_url.clone_from(url);
        }
        if let Some(delay) = other.reconnect_delay_ms {
            self.reconnect_delay_ms = delay;
        }
        if let Some(max) = other.max_reconnect_attempts {
            self.max_reconnect_attempts = max;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub base_url: Option<Option<String>>,
    pub reconnect_delay_ms: Option<Option<u64>>,
    pub max_reconnect_attempts: Option<Option<u32>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Base URL must start with http:// or https://, got {0}")]
    UnsupportedScheme(String),

    #[error("Reconnect delay must be at least 1 ms")]
    ZeroReconnectDelay,

    #[error("Max reconnect attempts must be at least 1 when set")]
    ZeroMaxReconnects,
}

/// Validate settings values.
pub fn validate_settings(settings: &WatchSettings) -> Result<(), SettingsError> {
    if let Some(ref url) = settings.base_url {
        let url = url.trim();
        if url.is_empty() {
            return Err(SettingsError::EmptyBaseUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::UnsupportedScheme(url.to_string()));
        }
    }

    if settings.reconnect_delay_ms == Some(0) {
        return Err(SettingsError::ZeroReconnectDelay);
    }

    if settings.max_reconnect_attempts == Some(0) {
        return Err(SettingsError::ZeroMaxReconnects);
    }

    Ok(())
}
