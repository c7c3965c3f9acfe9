//! Navigation controller
//!
//! [`Router`] owns the route registry and the host capabilities and runs each
//! navigation as one synchronous transaction:
//!
//! normalize → resolve → record history → apply effects → set title → return title

use serde_json::Value;

use crate::error::{Result, RouterError};
use crate::host::{
    HistoryEntry, HistorySink, LocationSource, RoutingMode, StateApplier, TitleSink,
};
use crate::path::{normalize_path, ROOT_PATH};
use crate::registry::{Resolution, RouteRegistry};
use crate::route::{RouteDefinition, RouteSpecs};

/// Routes navigation paths to actions, state and titles
///
/// # Examples
///
/// ```
/// use reflux_router::{MemoryHistory, MemoryTitle, Router};
/// use regex::Regex;
///
/// let history = MemoryHistory::new();
/// let title = MemoryTitle::new();
///
/// let mut router: Router = Router::new()
///     .with_history(history.clone())
///     .with_title_sink(title.clone());
///
/// router.define_route(Regex::new("^/docs/").unwrap(), |_| {}, "Docs");
/// router.define_route(Regex::new("^/docs/api/").unwrap(), |_| {}, "{title} > API");
/// router.define_route(["home", "index"], |_| {}, "Home");
///
/// let initial = router.initialize_routing("home", "#", Some("app.html#/")).unwrap();
/// assert_eq!(initial.as_deref(), Some("Home"));
///
/// assert_eq!(router.navigate_to("docs/api", false).as_deref(), Some("Docs > API"));
/// assert_eq!(title.get().as_deref(), Some("Docs > API"));
/// assert_eq!(history.len(), 1);
/// ```
pub struct Router<S = Value> {
    registry: RouteRegistry<S>,
    default_route: String,
    routing_marker: Option<String>,
    mode: Option<RoutingMode>,
    state_applier: Option<Box<dyn StateApplier<S>>>,
    history: Option<Box<dyn HistorySink>>,
    title_sink: Option<Box<dyn TitleSink>>,
    location: Option<Box<dyn LocationSource>>,
}

impl<S> Router<S> {
    /// Creates a router with an empty registry and no host capabilities
    pub fn new() -> Self {
        Self {
            registry: RouteRegistry::new(),
            default_route: ROOT_PATH.to_string(),
            routing_marker: None,
            mode: None,
            state_applier: None,
            history: None,
            title_sink: None,
            location: None,
        }
    }

    // ========================================================================
    // Host capabilities (functional builders)
    // ========================================================================

    pub fn with_state_applier<A>(mut self, applier: A) -> Self
    where
        A: StateApplier<S> + 'static,
    {
        self.state_applier = Some(Box::new(applier));
        self
    }

    pub fn with_history<H>(mut self, history: H) -> Self
    where
        H: HistorySink + 'static,
    {
        self.history = Some(Box::new(history));
        self
    }

    pub fn with_title_sink<T>(mut self, sink: T) -> Self
    where
        T: TitleSink + 'static,
    {
        self.title_sink = Some(Box::new(sink));
        self
    }

    pub fn with_location<L>(mut self, location: L) -> Self
    where
        L: LocationSource + 'static,
    {
        self.location = Some(Box::new(location));
        self
    }

    /// Sets the default route ahead of [`Router::initialize_routing`]
    pub fn with_default_route(mut self, default_route: &str) -> Self {
        self.default_route = normalize_path(default_route).into_owned();
        self
    }

    /// Replaces the state applier after construction
    pub fn set_state_applier<A>(&mut self, applier: A)
    where
        A: StateApplier<S> + 'static,
    {
        self.state_applier = Some(Box::new(applier));
    }

    // ========================================================================
    // Route definition
    // ========================================================================

    /// Registers one definition under every given specifier
    pub fn define(&mut self, routes: impl Into<RouteSpecs>, definition: RouteDefinition<S>)
    where
        S: Clone,
    {
        for spec in routes.into() {
            tracing::trace!("Defining route {}", spec);
            self.registry.define(spec, definition.clone());
        }
    }

    /// Registers an action route; an empty `title` means no title
    pub fn define_route<F>(&mut self, routes: impl Into<RouteSpecs>, action: F, title: &str)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
        S: Clone,
    {
        self.define(routes, RouteDefinition::action(action).with_title(title));
    }

    /// Registers an action route whose action receives `args` on every call
    pub fn define_route_with_args<F>(
        &mut self,
        routes: impl Into<RouteSpecs>,
        action: F,
        args: Vec<Value>,
        title: &str,
    ) where
        F: Fn(&[Value]) + Send + Sync + 'static,
        S: Clone,
    {
        self.define(
            routes,
            RouteDefinition::action(action)
                .with_args(args)
                .with_title(title),
        );
    }

    /// Registers a state route; an empty `title` means no title
    pub fn define_route_state(&mut self, routes: impl Into<RouteSpecs>, state: S, title: &str)
    where
        S: Clone,
    {
        self.define(routes, RouteDefinition::state(state).with_title(title));
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// One-time routing setup
    ///
    /// Stores the default route, picks the routing mode from `routing_marker`,
    /// notifies the history sink, and navigates to the fragment after the
    /// marker in the current location (`manual_route` overrides the location
    /// source; an empty `manual_route` counts as absent). History is not
    /// recorded for this first navigation.
    ///
    /// Fails with [`RouterError::MarkerNotFound`] when a path-mode marker does
    /// not occur in the location; marker mode falls back to the root path.
    pub fn initialize_routing(
        &mut self,
        default_route: &str,
        routing_marker: &str,
        manual_route: Option<&str>,
    ) -> Result<Option<String>> {
        self.default_route = normalize_path(default_route).into_owned();

        let location = manual_route
            .filter(|route| !route.is_empty())
            .map(str::to_string)
            .or_else(|| self.location.as_ref().and_then(|l| l.current_location()))
            .unwrap_or_default();

        let location = location.strip_suffix('/').unwrap_or(&location);
        let marker = routing_marker.strip_suffix('/').unwrap_or(routing_marker);

        let mode = RoutingMode::for_marker(marker);
        self.mode = Some(mode);
        self.routing_marker = Some(marker.to_string());

        if let Some(history) = self.history.as_mut() {
            history.attach_listener(mode);
        }

        let fragment = match (location.find(marker), mode) {
            (Some(idx), _) => normalize_path(&location[idx + marker.len()..]).into_owned(),
            (None, RoutingMode::Marker) => ROOT_PATH.to_string(),
            (None, RoutingMode::Path) => {
                return Err(RouterError::MarkerNotFound {
                    marker: marker.to_string(),
                    location: location.to_string(),
                })
            }
        };

        tracing::info!(
            "Routing initialized in {:?} mode (default route {}, initial fragment {})",
            mode,
            self.default_route,
            fragment
        );

        Ok(self.navigate_to(&fragment, true))
    }

    /// Navigates to `raw_path`
    ///
    /// The root path (or an empty path) stands for the default route. When
    /// `skip_history` is false and a history sink is present, an entry is
    /// recorded before any effect runs. Returns the resulting title, or `None`
    /// when nothing provided one. Navigating to an unknown path is not an error.
    pub fn navigate_to(&mut self, raw_path: &str, skip_history: bool) -> Option<String> {
        let path = self.target_path(raw_path);

        let Self {
            registry,
            state_applier,
            history,
            title_sink,
            ..
        } = self;

        let resolution = registry.resolve(&path);
        let title = resolution.title();

        tracing::debug!(
            "Navigating to {} (raw {:?}): exact={}, patterns={}",
            path,
            raw_path,
            resolution.exact.is_some(),
            resolution.patterns.len()
        );

        if !skip_history {
            if let Some(history) = history.as_mut() {
                history.push_entry(HistoryEntry {
                    marker: path.clone(),
                    title: title.clone(),
                    location: path.clone(),
                });
            }
        }

        apply_effects(&resolution, state_applier);

        if let (Some(sink), Some(title)) = (title_sink.as_mut(), title.as_deref()) {
            sink.set_title(title);
        }

        title
    }

    /// Handler for the host's "history changed" event
    ///
    /// `marker` is the value recorded with the entry being returned to, or
    /// `None` when the entry carries none (navigate to the default route).
    pub fn on_history_changed(&mut self, marker: Option<&str>) -> Option<String> {
        match marker {
            Some(marker) => self.navigate_to(marker, true),
            None => {
                let default_route = self.default_route.clone();
                self.navigate_to(&default_route, true)
            }
        }
    }

    /// Handler for the host's "marker changed" event (marker mode)
    ///
    /// `location_marker` is the host's full marker string, e.g. `#!/users/`
    /// for routing marker `#!`; the routing marker prefix is skipped.
    pub fn on_marker_changed(&mut self, location_marker: &str) -> Option<String> {
        let skip = self.routing_marker.as_deref().map_or(0, str::len);
        let fragment = location_marker.get(skip..).unwrap_or_default();
        self.navigate_to(fragment, true)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn registry(&self) -> &RouteRegistry<S> {
        &self.registry
    }

    /// Canonical path a navigation to `raw_path` resolves, with the root
    /// standing for the default route
    pub fn target_path(&self, raw_path: &str) -> String {
        let path = normalize_path(raw_path);
        if path == ROOT_PATH {
            self.default_route.clone()
        } else {
            path.into_owned()
        }
    }

    /// Resolves without applying effects or touching the host
    pub fn resolve(&self, raw_path: &str) -> Resolution<'_, S> {
        self.registry.resolve(&self.target_path(raw_path))
    }

    /// Canonical default route (`/` until initialized)
    pub fn default_route(&self) -> &str {
        &self.default_route
    }

    /// Mode chosen at initialization
    pub fn mode(&self) -> Option<RoutingMode> {
        self.mode
    }

    pub fn routing_marker(&self) -> Option<&str> {
        self.routing_marker.as_deref()
    }
}

fn apply_effects<S>(
    resolution: &Resolution<'_, S>,
    state_applier: &mut Option<Box<dyn StateApplier<S>>>,
) {
    for definition in resolution.definitions() {
        match definition {
            RouteDefinition::Action { action, args, .. } => {
                tracing::trace!("Calling route action with {} args", args.len());
                action(args.as_slice());
            }
            RouteDefinition::State { state, .. } => match state_applier.as_mut() {
                Some(applier) => applier.apply_state(state),
                None => tracing::warn!("State route matched but no state applier is configured"),
            },
        }
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHistory, MemoryTitle, StaticLocation};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_navigate_without_host() {
        let mut router: Router = Router::new();
        router.define_route_state("a", json!({"page": "a"}), "A");
        assert_eq!(router.navigate_to("a", false).as_deref(), Some("A"));
    }

    #[test]
    fn test_root_uses_default_route() {
        let mut router: Router = Router::new();
        router.define_route("home", |_| {}, "Home");
        router
            .initialize_routing("home", "#", Some("page#/elsewhere"))
            .unwrap();

        assert_eq!(router.navigate_to("/", true).as_deref(), Some("Home"));
        assert_eq!(router.navigate_to("", true).as_deref(), Some("Home"));
    }

    #[test]
    fn test_history_recorded_before_effects() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let history = MemoryHistory::new();

        let mut router: Router = Router::new().with_history(history.clone());
        let action_log = Arc::clone(&log);
        let action_history = history.clone();
        router.define_route(
            "a",
            move |_| {
                action_log
                    .lock()
                    .unwrap()
                    .push(format!("action after {} entries", action_history.len()));
            },
            "",
        );

        router.navigate_to("a", false);
        assert_eq!(*log.lock().unwrap(), vec!["action after 1 entries".to_string()]);
    }

    #[test]
    fn test_history_entry_contents() {
        let history = MemoryHistory::new();
        let mut router: Router = Router::new().with_history(history.clone());
        router.define_route("a/b", |_| {}, "AB");

        router.navigate_to("a/b", false);
        assert_eq!(
            history.current(),
            Some(HistoryEntry {
                marker: "/a/b/".to_string(),
                title: Some("AB".to_string()),
                location: "/a/b/".to_string(),
            })
        );
    }

    #[test]
    fn test_title_sink_untouched_without_title() {
        let title = MemoryTitle::new();
        let mut router: Router = Router::new().with_title_sink(title.clone());
        router.define_route("a", |_| {}, "");

        assert_eq!(router.navigate_to("a", true), None);
        assert_eq!(title.get(), None);
    }

    #[test]
    fn test_state_without_applier_is_skipped() {
        let mut router: Router = Router::new();
        router.define_route_state("a", json!(1), "");
        assert_eq!(router.navigate_to("a", true), None);
    }

    #[test]
    fn test_marker_changed_strips_marker() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let mut router: Router = Router::new();
        let sink = Arc::clone(&visited);
        router.define_route("users", move |_| sink.lock().unwrap().push("users"), "Users");
        router.initialize_routing("", "#!", Some("index.html")).unwrap();

        assert_eq!(router.on_marker_changed("#!/users").as_deref(), Some("Users"));
        assert_eq!(*visited.lock().unwrap(), vec!["users"]);
    }

    #[test]
    fn test_empty_manual_route_falls_back_to_location() {
        let mut router: Router =
            Router::new().with_location(StaticLocation("http://x/app/users".to_string()));
        router.define_route("users", |_| {}, "Users");

        let initial = router.initialize_routing("", "/app", Some("")).unwrap();
        assert_eq!(initial.as_deref(), Some("Users"));
    }

    #[test]
    fn test_default_route_before_initialization() {
        let mut router: Router = Router::new().with_default_route("home");
        router.define_route("home", |_| {}, "Home");

        assert_eq!(router.target_path("/"), "/home/");
        assert_eq!(router.target_path("a"), "/a/");
        assert_eq!(router.resolve("").title().as_deref(), Some("Home"));
        assert_eq!(router.navigate_to("/", true).as_deref(), Some("Home"));
    }

    #[test]
    fn test_resolve_does_not_apply_effects() {
        let calls = Arc::new(Mutex::new(0));
        let mut router: Router = Router::new();
        let counter = Arc::clone(&calls);
        router.define_route("a", move |_| *counter.lock().unwrap() += 1, "A");

        assert_eq!(router.resolve("a").title().as_deref(), Some("A"));
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
