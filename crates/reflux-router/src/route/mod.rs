//! Route definitions and route specifiers
//!
//! - [`RouteDefinition`]: what happens when a route is navigated to
//!   (an action call or a state application) plus its optional title.
//! - [`RouteSpec`]: where a definition is registered, either an exact
//!   path or a pattern.
//! - [`RouteSpecs`]: one or many specifiers sharing the same definition.

pub mod matcher;
pub mod pattern;

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, RouterError};
use crate::path::normalize_path;
use matcher::PathMatcher;
use pattern::SegmentPattern;

/// A route action, called with the definition's argument list
pub type Action = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// The effect and title registered for a route
///
/// Exactly one effect per definition: either an action or a state payload.
/// `S` is opaque to the router and handed to the host's
/// [`StateApplier`](crate::host::StateApplier) unchanged.
///
/// Empty titles are stored as `None`; an empty title never applies.
///
/// # Examples
///
/// ```
/// use reflux_router::RouteDefinition;
/// use serde_json::json;
///
/// let def: RouteDefinition = RouteDefinition::action(|_args| {})
///     .with_args(vec![json!(1)])
///     .with_title("{title} > Users");
/// assert_eq!(def.title(), Some("{title} > Users"));
///
/// let def: RouteDefinition = RouteDefinition::state(json!({"page": "home"})).with_title("");
/// assert_eq!(def.title(), None);
/// ```
#[derive(Clone)]
pub enum RouteDefinition<S = Value> {
    Action {
        action: Action,
        args: Vec<Value>,
        title: Option<String>,
    },
    State {
        state: S,
        title: Option<String>,
    },
}

fn non_empty(title: String) -> Option<String> {
    (!title.is_empty()).then_some(title)
}

impl<S> RouteDefinition<S> {
    /// Action definition without arguments or title
    pub fn action<F>(action: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::from_action(Arc::new(action))
    }

    /// Action definition from an already shared action
    pub fn from_action(action: Action) -> Self {
        Self::Action {
            action,
            args: Vec::new(),
            title: None,
        }
    }

    /// State definition without title
    pub fn state(state: S) -> Self {
        Self::State { state, title: None }
    }

    /// Sets the argument list passed to the action
    ///
    /// State definitions take no arguments and are returned unchanged.
    pub fn with_args(self, args: Vec<Value>) -> Self {
        match self {
            Self::Action { action, title, .. } => Self::Action {
                action,
                args,
                title,
            },
            state => state,
        }
    }

    /// Sets the title template (an empty string clears it)
    pub fn with_title(self, title: impl Into<String>) -> Self {
        let title = non_empty(title.into());
        match self {
            Self::Action { action, args, .. } => Self::Action {
                action,
                args,
                title,
            },
            Self::State { state, .. } => Self::State { state, title },
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Action { title, .. } | Self::State { title, .. } => title.as_deref(),
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }
}

impl<S: fmt::Debug> fmt::Debug for RouteDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action { args, title, .. } => f
                .debug_struct("Action")
                .field("args", args)
                .field("title", title)
                .finish_non_exhaustive(),
            Self::State { state, title } => f
                .debug_struct("State")
                .field("state", state)
                .field("title", title)
                .finish(),
        }
    }
}

/// Where a definition is registered
///
/// Textual specifiers are exact routes (normalized on registration);
/// anything implementing [`PathMatcher`] is a pattern route.
#[derive(Clone)]
pub enum RouteSpec {
    Exact(String),
    Pattern(Arc<dyn PathMatcher>),
}

impl RouteSpec {
    /// Exact specifier, normalized to canonical form
    pub fn exact(path: &str) -> Self {
        Self::Exact(normalize_path(path).into_owned())
    }

    pub fn pattern<M>(matcher: M) -> Self
    where
        M: PathMatcher + 'static,
    {
        Self::Pattern(Arc::new(matcher))
    }

    /// Pattern specifier from regex source
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::pattern)
            .map_err(|source| RouterError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Pattern specifier from a segment pattern such as `/users/[id]/`
    pub fn segments(pattern: &str) -> Result<Self> {
        SegmentPattern::parse(pattern).map(Self::pattern)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => f.debug_tuple("Exact").field(path).finish(),
            Self::Pattern(matcher) => f.debug_tuple("Pattern").field(&matcher.describe()).finish(),
        }
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => f.write_str(path),
            Self::Pattern(matcher) => write!(f, "~{}", matcher.describe()),
        }
    }
}

impl From<&str> for RouteSpec {
    fn from(path: &str) -> Self {
        Self::exact(path)
    }
}

impl From<String> for RouteSpec {
    fn from(path: String) -> Self {
        Self::exact(&path)
    }
}

impl From<Regex> for RouteSpec {
    fn from(regex: Regex) -> Self {
        Self::pattern(regex)
    }
}

impl From<SegmentPattern> for RouteSpec {
    fn from(pattern: SegmentPattern) -> Self {
        Self::pattern(pattern)
    }
}

/// One or more route specifiers sharing a definition
///
/// Registering a definition under `RouteSpecs` with three entries is the same
/// as three individual registrations with that definition.
///
/// ```
/// use reflux_router::RouteSpecs;
///
/// let specs = RouteSpecs::from(vec!["a", "b/", "/c"]);
/// let names: Vec<String> = specs.iter().map(|s| s.to_string()).collect();
/// assert_eq!(names, vec!["/a/", "/b/", "/c/"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSpecs(Vec<RouteSpec>);

impl RouteSpecs {
    pub fn iter(&self) -> std::slice::Iter<'_, RouteSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RouteSpecs {
    type Item = RouteSpec;
    type IntoIter = std::vec::IntoIter<RouteSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<RouteSpec> for RouteSpecs {
    fn from_iter<I: IntoIterator<Item = RouteSpec>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<RouteSpec> for RouteSpecs {
    fn from(spec: RouteSpec) -> Self {
        Self(vec![spec])
    }
}

impl From<&str> for RouteSpecs {
    fn from(path: &str) -> Self {
        RouteSpec::from(path).into()
    }
}

impl From<String> for RouteSpecs {
    fn from(path: String) -> Self {
        RouteSpec::from(path).into()
    }
}

impl From<Regex> for RouteSpecs {
    fn from(regex: Regex) -> Self {
        RouteSpec::from(regex).into()
    }
}

impl From<SegmentPattern> for RouteSpecs {
    fn from(pattern: SegmentPattern) -> Self {
        RouteSpec::from(pattern).into()
    }
}

impl From<Vec<RouteSpec>> for RouteSpecs {
    fn from(specs: Vec<RouteSpec>) -> Self {
        Self(specs)
    }
}

impl From<Vec<&str>> for RouteSpecs {
    fn from(paths: Vec<&str>) -> Self {
        paths.into_iter().map(RouteSpec::from).collect()
    }
}

impl From<Vec<String>> for RouteSpecs {
    fn from(paths: Vec<String>) -> Self {
        paths.into_iter().map(RouteSpec::from).collect()
    }
}

impl From<Vec<Regex>> for RouteSpecs {
    fn from(regexes: Vec<Regex>) -> Self {
        regexes.into_iter().map(RouteSpec::from).collect()
    }
}

impl<const N: usize> From<[&str; N]> for RouteSpecs {
    fn from(paths: [&str; N]) -> Self {
        paths.into_iter().map(RouteSpec::from).collect()
    }
}

impl<const N: usize> From<[RouteSpec; N]> for RouteSpecs {
    fn from(specs: [RouteSpec; N]) -> Self {
        specs.into_iter().collect()
    }
}
