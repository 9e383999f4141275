//! Error types for the stream and control clients.
//!
//! None of these are fatal to a stream session: `StreamError` becomes an
//! interruption (retry), `FrameError` becomes a dropped frame.

use thiserror::Error;

/// Result type alias for stream transport operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Result type alias for control endpoint calls.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised while subscribing to or reading the log stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The request could not be sent or no response arrived.
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        /// The URL that was requested
        url: String,
        /// Underlying client error
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Stream request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Reading the response body failed mid-stream.
    #[error("Stream body error: {0}")]
    Body(#[source] reqwest::Error),

    /// The server ended the response.
    #[error("Stream closed by server")]
    Closed,

    /// Building the HTTP client failed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failure reported by a non-HTTP transport.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// A non-empty line that is not a valid event record.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Malformed frame: {source}")]
    Malformed {
        /// Payload after prefix stripping and trimming
        line: String,
        /// Parser diagnostic
        source: serde_json::Error,
    },
}

impl FrameError {
    /// The offending payload.
    pub fn line(&self) -> &str {
        match self {
            Self::Malformed { line, .. } => line,
        }
    }
}

/// Errors from the proxy control endpoints.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Network, timeout or body decoding failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server refused the request.
    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A settings save failed local validation and was not sent.
    #[error("{0}")]
    InvalidSettings(#[from] routewatch_core::ProxySettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = StreamError::Status {
            status: 502,
            url: "http://127.0.0.1:8000/proxy/stream-logs".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("/proxy/stream-logs"));
    }

    #[test]
    fn test_closed_error_message() {
        assert_eq!(StreamError::Closed.to_string(), "Stream closed by server");
    }

    #[test]
    fn test_frame_error_keeps_line() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = FrameError::Malformed {
            line: "{".to_string(),
            source,
        };
        assert_eq!(error.line(), "{");
        assert!(error.to_string().starts_with("Malformed frame"));
    }

    #[test]
    fn test_rejected_error_message() {
        let error = ControlError::Rejected {
            status: 400,
            message: "Proxy is already running".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("already running"));
    }
}
