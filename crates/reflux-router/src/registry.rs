//! Route registry and resolver
//!
//! The registry keeps two collections:
//! - exact routes: canonical path → definition (HashMap, last write wins)
//! - pattern routes: (matcher, definition) in registration order (Vec, never
//!   reordered or deduplicated)
//!
//! Resolution rule: an exact route always wins and short-circuits pattern
//! matching entirely. Without an exact route, *every* matching pattern applies,
//! in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::path::normalize_path;
use crate::route::matcher::PathMatcher;
use crate::route::{RouteDefinition, RouteSpec};
use crate::title::compose_title;

/// A pattern route entry
#[derive(Clone)]
pub struct PatternRoute<S> {
    pub matcher: Arc<dyn PathMatcher>,
    pub definition: RouteDefinition<S>,
}

/// Outcome of resolving one canonical path
#[derive(Debug)]
pub struct Resolution<'a, S> {
    /// The exact definition, if one is registered for the path
    pub exact: Option<&'a RouteDefinition<S>>,
    /// Matching pattern definitions in registration order (empty when `exact` is set)
    pub patterns: Vec<&'a RouteDefinition<S>>,
}

impl<'a, S> Resolution<'a, S> {
    /// True when neither an exact route nor any pattern matched
    pub fn is_empty(&self) -> bool {
        self.exact.is_none() && self.patterns.is_empty()
    }

    /// Definitions whose effects apply, in application order
    pub fn definitions(&self) -> impl Iterator<Item = &'a RouteDefinition<S>> + '_ {
        self.exact.into_iter().chain(self.patterns.iter().copied())
    }

    /// Title for this resolution
    ///
    /// An exact match uses its own title verbatim (no placeholder substitution).
    /// Pattern matches compose their templates in order. `None` means there is
    /// no title to set.
    pub fn title(&self) -> Option<String> {
        let title = match self.exact {
            Some(def) => def.title().map(str::to_string).unwrap_or_default(),
            None => compose_title(self.patterns.iter().map(|def| def.title())),
        };
        (!title.is_empty()).then_some(title)
    }
}

/// Exact and pattern route storage
///
/// # Examples
///
/// ```
/// use reflux_router::{RouteDefinition, RouteRegistry};
/// use regex::Regex;
///
/// let mut registry: RouteRegistry = RouteRegistry::new();
/// registry.define_exact("home", RouteDefinition::action(|_| {}).with_title("Home"));
/// registry.define_pattern(Regex::new("^/docs/").unwrap(), RouteDefinition::action(|_| {}));
///
/// let resolution = registry.resolve("/home/");
/// assert!(resolution.exact.is_some());
/// assert_eq!(resolution.title().as_deref(), Some("Home"));
/// ```
pub struct RouteRegistry<S = serde_json::Value> {
    exact: HashMap<String, RouteDefinition<S>>,
    patterns: Vec<PatternRoute<S>>,
}

impl<S> RouteRegistry<S> {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            patterns: Vec::new(),
        }
    }

    /// Stores a definition under the canonical form of `path`, replacing any previous one
    pub fn define_exact(&mut self, path: &str, definition: RouteDefinition<S>) {
        let key = normalize_path(path).into_owned();
        if self.exact.insert(key.clone(), definition).is_some() {
            tracing::debug!("Replaced exact route {}", key);
        }
    }

    /// Appends a pattern route; existing entries are never touched
    pub fn define_pattern<M>(&mut self, matcher: M, definition: RouteDefinition<S>)
    where
        M: PathMatcher + 'static,
    {
        self.push_pattern(Arc::new(matcher), definition);
    }

    fn push_pattern(&mut self, matcher: Arc<dyn PathMatcher>, definition: RouteDefinition<S>) {
        self.patterns.push(PatternRoute {
            matcher,
            definition,
        });
    }

    /// Registers a definition under one specifier
    pub fn define(&mut self, spec: RouteSpec, definition: RouteDefinition<S>) {
        match spec {
            RouteSpec::Exact(path) => self.define_exact(&path, definition),
            RouteSpec::Pattern(matcher) => self.push_pattern(matcher, definition),
        }
    }

    /// Resolves a canonical path
    ///
    /// The input is expected to be canonical already; use
    /// [`normalize_path`] first when it may not be.
    pub fn resolve(&self, path: &str) -> Resolution<'_, S> {
        if let Some(def) = self.exact.get(path) {
            return Resolution {
                exact: Some(def),
                patterns: Vec::new(),
            };
        }

        let patterns = self
            .patterns
            .iter()
            .filter(|route| route.matcher.matches(path))
            .inspect(|route| tracing::trace!("Pattern {} matched {}", route.matcher.describe(), path))
            .map(|route| &route.definition)
            .collect();

        Resolution {
            exact: None,
            patterns,
        }
    }

    pub fn exact_route(&self, path: &str) -> Option<&RouteDefinition<S>> {
        self.exact.get(normalize_path(path).as_ref())
    }

    /// Exact routes (unordered)
    pub fn exact_routes(&self) -> impl Iterator<Item = (&str, &RouteDefinition<S>)> {
        self.exact.iter().map(|(path, def)| (path.as_str(), def))
    }

    /// Pattern routes in registration order
    pub fn pattern_routes(&self) -> &[PatternRoute<S>] {
        &self.patterns
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    pub fn pattern_len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }
}

impl<S> Default for RouteRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn titled(title: &str) -> RouteDefinition {
        RouteDefinition::state(json!(title)).with_title(title)
    }

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_exact_overwrite() {
        let mut registry = RouteRegistry::new();
        registry.define_exact("a", titled("first"));
        registry.define_exact("/a/", titled("second"));

        assert_eq!(registry.exact_len(), 1);
        assert_eq!(registry.resolve("/a/").title().as_deref(), Some("second"));
    }

    #[test]
    fn test_exact_short_circuits_patterns() {
        let mut registry = RouteRegistry::new();
        registry.define_pattern(re("^/x/"), titled("pattern"));
        registry.define_exact("x", titled("exact"));

        let resolution = registry.resolve("/x/");
        assert!(resolution.exact.is_some());
        assert!(resolution.patterns.is_empty());
        assert_eq!(resolution.definitions().count(), 1);
    }

    #[test]
    fn test_exact_title_not_substituted() {
        let mut registry = RouteRegistry::new();
        registry.define_exact("x", titled("{title} page"));
        assert_eq!(registry.resolve("/x/").title().as_deref(), Some("{title} page"));
    }

    #[test]
    fn test_all_patterns_collected_in_order() {
        let mut registry = RouteRegistry::new();
        registry.define_pattern(re("^/x/"), titled("one"));
        registry.define_pattern(re("^/y/"), titled("never"));
        registry.define_pattern(re("x"), titled("{title} > two"));
        registry.define_pattern(re("^/x/$"), titled("{title} > three"));

        let resolution = registry.resolve("/x/");
        assert_eq!(resolution.patterns.len(), 3);
        assert_eq!(resolution.title().as_deref(), Some("one > two > three"));
    }

    #[test]
    fn test_duplicate_patterns_kept() {
        let mut registry = RouteRegistry::new();
        registry.define_pattern(re("^/x/"), titled("a"));
        registry.define_pattern(re("^/x/"), titled("{title}a"));

        assert_eq!(registry.pattern_len(), 2);
        assert_eq!(registry.resolve("/x/").title().as_deref(), Some("aa"));
    }

    #[test]
    fn test_no_match() {
        let mut registry = RouteRegistry::new();
        registry.define_exact("a", titled("a"));

        let resolution = registry.resolve("/b/");
        assert!(resolution.is_empty());
        assert_eq!(resolution.title(), None);
    }

    #[test]
    fn test_untitled_exact_has_no_title() {
        let mut registry = RouteRegistry::new();
        registry.define_pattern(re("."), titled("pattern"));
        registry.define_exact("a", RouteDefinition::state(json!(null)));

        assert_eq!(registry.resolve("/a/").title(), None);
    }

    #[test]
    fn test_define_dispatches_on_spec() {
        let mut registry = RouteRegistry::new();
        registry.define(RouteSpec::from("a/b"), titled("exact"));
        registry.define(RouteSpec::regex("^/c/").unwrap(), titled("pattern"));

        assert_eq!(registry.exact_len(), 1);
        assert_eq!(registry.pattern_len(), 1);
        assert!(registry.exact_route("a/b").is_some());
    }
}
