//! The record pushed by the proxy log stream.

use serde::{Deserialize, Serialize};

/// One observation of an intercepted request.
///
/// Wire format: `{"route": "<string>", "endpoint": "<string>"}`. Unknown
/// fields are ignored; both known fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEvent {
    /// Full URL the proxy saw. Reconciliation key.
    pub route: String,
    /// Resolved handler/target for the route.
    pub endpoint: String,
}

impl LogEvent {
    /// Create a new event.
    pub fn new(route: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Whether the route contains `predicate`, ignoring case.
    ///
    /// An empty predicate matches every event.
    pub fn matches(&self, predicate: &str) -> bool {
        predicate.is_empty() || self.route.to_lowercase().contains(&predicate.to_lowercase())
    }
}
