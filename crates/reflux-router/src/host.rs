//! Host environment capabilities
//!
//! The router never detects its environment. Everything outside route
//! resolution (applying state, recording history, showing a title, reading
//! the current location) is handed to it by the host through these traits.
//! Each capability is optional; a missing one means that step is skipped.
//!
//! Headless hosts (tests, server-side rendering, the CLI) can use the in-memory
//! implementations: [`MemoryHistory`], [`MemoryTitle`] and [`StaticLocation`].

use std::sync::{Arc, Mutex, MutexGuard};

/// How navigation changes are detected by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// Structural history: the host reports back/forward with a pushed marker
    Path,
    /// Location marker (`#...`): the host reports marker changes
    Marker,
}

/// Reserved first character of a marker-mode routing marker
pub const MARKER_PREFIX: char = '#';

impl RoutingMode {
    /// Picks the mode for a routing marker
    ///
    /// ```
    /// use reflux_router::RoutingMode;
    ///
    /// assert_eq!(RoutingMode::for_marker("#!"), RoutingMode::Marker);
    /// assert_eq!(RoutingMode::for_marker("/app"), RoutingMode::Path);
    /// ```
    pub fn for_marker(marker: &str) -> Self {
        if marker.starts_with(MARKER_PREFIX) {
            Self::Marker
        } else {
            Self::Path
        }
    }
}

/// One recorded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Opaque marker handed back on history events (the canonical path)
    pub marker: String,
    pub title: Option<String>,
    /// Location to display for the entry
    pub location: String,
}

/// Applies a state definition's payload to application state
pub trait StateApplier<S> {
    fn apply_state(&mut self, state: &S);
}

impl<S, F> StateApplier<S> for F
where
    F: FnMut(&S),
{
    fn apply_state(&mut self, state: &S) {
        self(state)
    }
}

/// Navigation history of the host
pub trait HistorySink {
    fn push_entry(&mut self, entry: HistoryEntry);

    /// Called once at initialization with the detected mode, so the host can
    /// subscribe to the matching navigation events and forward them to
    /// [`Router::on_history_changed`](crate::Router::on_history_changed) or
    /// [`Router::on_marker_changed`](crate::Router::on_marker_changed).
    fn attach_listener(&mut self, _mode: RoutingMode) {}
}

/// Display title of the host
pub trait TitleSink {
    fn set_title(&mut self, title: &str);
}

impl<F> TitleSink for F
where
    F: FnMut(&str),
{
    fn set_title(&mut self, title: &str) {
        self(title)
    }
}

/// Source of the full location string at startup
pub trait LocationSource {
    fn current_location(&self) -> Option<String>;
}

/// A fixed location, for hosts that know their location up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation(pub String);

impl LocationSource for StaticLocation {
    fn current_location(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct HistoryInner {
    entries: Vec<HistoryEntry>,
    mode: Option<RoutingMode>,
}

/// In-memory history stack
///
/// Clones share the same stack, so a host can keep one handle and give the
/// other to the router.
///
/// ```
/// use reflux_router::{HistoryEntry, HistorySink, MemoryHistory};
///
/// let history = MemoryHistory::new();
/// let mut sink = history.clone();
/// sink.push_entry(HistoryEntry { marker: "/a/".into(), title: None, location: "/a/".into() });
/// sink.push_entry(HistoryEntry { marker: "/b/".into(), title: None, location: "/b/".into() });
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.back().as_deref(), Some("/a/"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    inner: Arc<Mutex<HistoryInner>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        lock(&self.inner).entries.clone()
    }

    pub fn current(&self) -> Option<HistoryEntry> {
        lock(&self.inner).entries.last().cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).entries.is_empty()
    }

    /// Mode the router attached with, if initialized
    pub fn mode(&self) -> Option<RoutingMode> {
        lock(&self.inner).mode
    }

    /// Drops the current entry and returns the marker of the one before it
    ///
    /// `None` means the stack is back at its start, which hosts report as a
    /// history event without marker.
    pub fn back(&self) -> Option<String> {
        let mut inner = lock(&self.inner);
        inner.entries.pop();
        inner.entries.last().map(|entry| entry.marker.clone())
    }
}

impl HistorySink for MemoryHistory {
    fn push_entry(&mut self, entry: HistoryEntry) {
        lock(&self.inner).entries.push(entry);
    }

    fn attach_listener(&mut self, mode: RoutingMode) {
        lock(&self.inner).mode = Some(mode);
    }
}

/// In-memory display title; clones share the same title
#[derive(Debug, Clone, Default)]
pub struct MemoryTitle {
    inner: Arc<Mutex<Option<String>>>,
}

impl MemoryTitle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        lock(&self.inner).clone()
    }
}

impl TitleSink for MemoryTitle {
    fn set_title(&mut self, title: &str) {
        *lock(&self.inner) = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> HistoryEntry {
        HistoryEntry {
            marker: path.to_string(),
            title: None,
            location: path.to_string(),
        }
    }

    #[test]
    fn test_memory_history_shared_between_clones() {
        let history = MemoryHistory::new();
        let mut sink = history.clone();
        sink.push_entry(entry("/a/"));
        sink.attach_listener(RoutingMode::Marker);

        assert_eq!(history.current(), Some(entry("/a/")));
        assert_eq!(history.mode(), Some(RoutingMode::Marker));
    }

    #[test]
    fn test_memory_history_back_to_start() {
        let mut history = MemoryHistory::new();
        history.push_entry(entry("/a/"));

        assert_eq!(history.back(), None);
        assert!(history.is_empty());
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_memory_title() {
        let title = MemoryTitle::new();
        let mut sink = title.clone();
        assert_eq!(title.get(), None);

        sink.set_title("Home");
        assert_eq!(title.get().as_deref(), Some("Home"));
    }

    #[test]
    fn test_closure_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |title: &str| seen.push(title.to_string());
            sink.set_title("x");
        }
        assert_eq!(seen, vec!["x".to_string()]);

        let mut applied = 0;
        {
            let mut applier = |state: &i32| applied += *state;
            applier.apply_state(&5);
        }
        assert_eq!(applied, 5);
    }

    #[test]
    fn test_static_location() {
        let location = StaticLocation("http://host/app/#/a".to_string());
        assert_eq!(location.current_location().as_deref(), Some("http://host/app/#/a"));
    }
}
