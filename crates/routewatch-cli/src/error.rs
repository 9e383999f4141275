//! CLI-specific error types and mappings.
//!
//! Maps library errors to exit codes and user-facing messages.

use routewatch_client::{ControlError, StreamError};
use routewatch_core::SettingsError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The stream client could not be set up.
    #[error("Stream error: {0}")]
    Stream(String),

    /// The server could not be reached or answered unexpectedly.
    #[error("Server unavailable: {0}")]
    Unavailable(String),

    /// The server refused a control request; carries its message.
    #[error("{0}")]
    Rejected(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Rejected(_) => 1,
            Self::Stream(_) => 70,      // EX_SOFTWARE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<StreamError> for CliError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::InvalidUrl(e) => Self::Config(format!("Invalid URL: {e}")),
            other => Self::Stream(other.to_string()),
        }
    }
}

impl From<ControlError> for CliError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::Rejected { message, .. } => Self::Rejected(message),
            ControlError::InvalidUrl(e) => Self::Config(format!("Invalid URL: {e}")),
            ControlError::InvalidSettings(e) => Self::Config(e.to_string()),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
