//! Presentation port for the route table.
//!
//! The renderer owns no stream logic: it is handed a filtered snapshot of
//! the route store and draws it.

use crate::domain::LogEvent;

/// Renders route snapshots and transient status lines.
#[cfg_attr(test, mockall::automock)]
pub trait RouteView: Send + Sync {
    /// Redraw with the current filtered snapshot.
    fn refresh(&self, rows: &[LogEvent]);

    /// Show a transient, non-blocking status line (e.g. reconnecting).
    fn status(&self, message: &str);
}
