//! Multi-row selection state for route views.

use std::collections::BTreeSet;

use super::LogEvent;

/// Routes the user has ticked in a view.
///
/// Views enable their bulk actions only while [`any_selected`](Self::any_selected)
/// is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    routes: BTreeSet<String>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of `route`. Returns whether it is now selected.
    pub fn toggle(&mut self, route: &str) -> bool {
        if self.routes.remove(route) {
            false
        } else {
            self.routes.insert(route.to_string());
            true
        }
    }

    pub fn is_selected(&self, route: &str) -> bool {
        self.routes.contains(route)
    }

    pub fn any_selected(&self) -> bool {
        !self.routes.is_empty()
    }

    /// Selected routes in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }

    /// Drop selections that are no longer among `rows` (e.g. after the
    /// filter changed).
    pub fn retain_visible(&mut self, rows: &[LogEvent]) {
        self.routes
            .retain(|route| rows.iter().any(|row| &row.route == route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_enables_actions() {
        let mut selection = RowSelection::new();
        assert!(!selection.any_selected());

        assert!(selection.toggle("/a"));
        assert!(selection.any_selected());
        assert!(selection.is_selected("/a"));

        assert!(!selection.toggle("/a"));
        assert!(!selection.any_selected());
    }

    #[test]
    fn test_retain_visible_drops_hidden_rows() {
        let mut selection = RowSelection::new();
        selection.toggle("/a");
        selection.toggle("/b");

        selection.retain_visible(&[LogEvent::new("/b", "health")]);

        let selected: Vec<&str> = selection.selected().collect();
        assert_eq!(selected, vec!["/b"]);
    }
}
