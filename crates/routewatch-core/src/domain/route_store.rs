//! Keyed view of the latest event per route.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::LogEvent;

/// In-memory map from route to the most recently received event.
///
/// Reconciliation is last-write-wins: [`upsert`](Self::upsert) overwrites
/// whatever was stored for the route. The stream never removes entries;
/// [`clear`](Self::clear) exists for an explicit viewer reset.
///
/// Iteration order is ascending by route, independent of arrival order.
#[derive(Debug, Default)]
pub struct RouteStateStore {
    entries: RwLock<BTreeMap<String, LogEvent>>,
}

impl RouteStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the map half-written
    // (every mutation is a single BTreeMap call), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, LogEvent>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, LogEvent>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `event` as the latest value for its route.
    ///
    /// Returns the value it replaced, if any.
    pub fn upsert(&self, event: LogEvent) -> Option<LogEvent> {
        self.write().insert(event.route.clone(), event)
    }

    /// Latest event for `route`, if one was observed.
    pub fn get(&self, route: &str) -> Option<LogEvent> {
        self.read().get(route).cloned()
    }

    /// All entries whose route contains `predicate`, ignoring case.
    ///
    /// An empty predicate matches everything.
    pub fn filter(&self, predicate: &str) -> Vec<LogEvent> {
        self.read()
            .values()
            .filter(|event| event.matches(predicate))
            .cloned()
            .collect()
    }

    /// All entries.
    pub fn snapshot(&self) -> Vec<LogEvent> {
        self.filter("")
    }

    /// Number of distinct routes observed.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no route has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let store = RouteStateStore::new();
        for endpoint in ["e1", "e2", "e3", "e4"] {
            store.upsert(LogEvent::new("/r", endpoint));
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("/r"), Some(LogEvent::new("/r", "e4")));
    }

    #[test]
    fn test_upsert_returns_previous() {
        let store = RouteStateStore::new();
        assert!(store.upsert(LogEvent::new("/r", "a")).is_none());

        let previous = store.upsert(LogEvent::new("/r", "b"));
        assert_eq!(previous, Some(LogEvent::new("/r", "a")));
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let store = RouteStateStore::new();
        store.upsert(LogEvent::new("/API/Foo", "foo"));
        store.upsert(LogEvent::new("/other", "other"));

        let hits = store.filter("api");
        assert_eq!(hits, vec![LogEvent::new("/API/Foo", "foo")]);

        let hits = store.filter("FOO");
        assert_eq!(hits, vec![LogEvent::new("/API/Foo", "foo")]);
    }

    #[test]
    fn test_empty_filter_returns_all_in_route_order() {
        let store = RouteStateStore::new();
        store.upsert(LogEvent::new("/b", "health"));
        store.upsert(LogEvent::new("/a", "index"));

        let routes: Vec<String> = store.filter("").into_iter().map(|e| e.route).collect();
        assert_eq!(routes, vec!["/a", "/b"]);
    }

    #[test]
    fn test_filter_is_stable_across_calls() {
        let store = RouteStateStore::new();
        store.upsert(LogEvent::new("/z", "1"));
        store.upsert(LogEvent::new("/m", "2"));
        store.upsert(LogEvent::new("/a", "3"));

        let first = store.snapshot();
        let second = store.snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_without_match_is_empty() {
        let store = RouteStateStore::new();
        store.upsert(LogEvent::new("/a", "index"));
        assert!(store.filter("nope").is_empty());
    }

    #[test]
    fn test_clear() {
        let store = RouteStateStore::new();
        store.upsert(LogEvent::new("/a", "index"));
        assert!(!store.is_empty());

        store.clear();
        assert!(store.is_empty());
        assert!(store.get("/a").is_none());
    }
}
