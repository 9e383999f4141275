//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: filtering and reconciliation live in the
//! route store.

pub mod tables;
pub mod terminal;

// Re-export commonly used items
pub use tables::{separator, truncate_string};
pub use terminal::{TerminalView, ViewMode};
