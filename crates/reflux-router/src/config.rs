//! Route tables loaded from TOML
//!
//! A route table describes routing setup and route definitions as data:
//!
//! ```toml
//! [routing]
//! default_route = "home"
//! marker = "#!"
//!
//! [[routes]]
//! path = ["home", "index"]
//! action = "show_home"
//! args = [1, "two"]
//! title = "Home"
//!
//! [[routes]]
//! pattern = "^/docs/"
//! state = { page = "docs" }
//! title = "Docs"
//!
//! [[routes]]
//! segments = "/users/[id]/"
//! action = "show_user"
//! title = "{title} > User"
//! ```
//!
//! Actions are referenced by name and resolved by the host when the table is
//! registered. Entries are registered in file order, so pattern order (and
//! with it title composition) follows the file.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RouterError};
use crate::route::{Action, RouteDefinition, RouteSpec, RouteSpecs};
use crate::router::Router;

/// Default routing marker for route tables (marker mode, root fragment)
pub const DEFAULT_MARKER: &str = "#";

/// Routing setup section (`[routing]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub default_route: String,
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_route: String::new(),
            marker: default_marker(),
        }
    }
}

/// One path or a list of paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

/// One `[[routes]]` entry
///
/// Exactly one of `path`, `pattern` and `segments`, and exactly one of
/// `action` and `state`, must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Exact path(s)
    #[serde(default)]
    pub path: Option<OneOrMany>,
    /// Regex pattern(s), matched against canonical paths
    #[serde(default)]
    pub pattern: Option<OneOrMany>,
    /// Segment pattern(s) such as `/users/[id]/`
    #[serde(default)]
    pub segments: Option<OneOrMany>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RouteEntry {
    fn malformed(&self, reason: &str) -> RouterError {
        RouterError::MalformedRouteSpec {
            route: format!("{reason} in {self:?}"),
        }
    }

    /// Builds the specifiers of this entry
    pub fn specs(&self) -> Result<RouteSpecs> {
        match (&self.path, &self.pattern, &self.segments) {
            (Some(paths), None, None) => Ok(paths.to_vec().into()),
            (None, Some(patterns), None) => patterns
                .to_vec()
                .iter()
                .map(|p| RouteSpec::regex(p))
                .collect(),
            (None, None, Some(patterns)) => patterns
                .to_vec()
                .iter()
                .map(|p| RouteSpec::segments(p))
                .collect(),
            (None, None, None) => Err(self.malformed("no path, pattern or segments")),
            _ => Err(self.malformed("more than one of path, pattern and segments")),
        }
    }

    /// Builds the definition of this entry, resolving the action by name
    pub fn definition<F>(&self, resolve_action: F) -> Result<RouteDefinition>
    where
        F: Fn(&str) -> Option<Action>,
    {
        let definition = match (&self.action, &self.state) {
            (Some(name), None) => {
                let action = resolve_action(name)
                    .ok_or_else(|| RouterError::UnknownAction { name: name.clone() })?;
                RouteDefinition::from_action(action).with_args(self.args.clone())
            }
            (None, Some(state)) => RouteDefinition::state(state.clone()),
            (None, None) => return Err(self.malformed("no action or state")),
            (Some(_), Some(_)) => return Err(self.malformed("both action and state")),
        };

        Ok(definition.with_title(self.title.clone().unwrap_or_default()))
    }

    /// Short form used in listings: `exact /a/ /b/`, `pattern ^/x/`
    pub fn describe(&self) -> String {
        let (kind, values) = match (&self.path, &self.pattern, &self.segments) {
            (Some(v), _, _) => ("exact", v.to_vec()),
            (_, Some(v), _) => ("pattern", v.to_vec()),
            (_, _, Some(v)) => ("segments", v.to_vec()),
            _ => ("?", Vec::new()),
        };
        format!("{kind} {}", values.join(" "))
    }
}

/// A parsed route table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Parse a route table from TOML
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a route table from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Registers every entry on `router`, in file order
    ///
    /// Every entry is validated before the first one is registered, so a
    /// malformed entry or unknown action leaves `router` untouched.
    pub fn register<F>(&self, router: &mut Router, resolve_action: F) -> Result<()>
    where
        F: Fn(&str) -> Option<Action>,
    {
        let entries = self
            .routes
            .iter()
            .map(|entry| -> Result<_> {
                Ok((entry.specs()?, entry.definition(&resolve_action)?))
            })
            .collect::<Result<Vec<_>>>()?;

        for (specs, definition) in entries {
            router.define(specs, definition);
        }

        tracing::debug!(
            "Registered {} route table entries ({} exact, {} pattern routes)",
            self.routes.len(),
            router.registry().exact_len(),
            router.registry().pattern_len()
        );
        Ok(())
    }

    /// Action names referenced by the table, in order of first use
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.routes.iter().filter_map(|entry| entry.action.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl FromStr for RouteTable {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const TABLE: &str = r##"
[routing]
default_route = "home"
marker = "#!"

[[routes]]
path = ["home", "index"]
action = "show_home"
args = [1, "two"]
title = "Home"

[[routes]]
pattern = "^/docs/"
state = { page = "docs" }
title = "Docs"

[[routes]]
segments = "/docs/[...rest]/"
action = "show_doc"
title = "{title} > Page"
"##;

    fn noop(_: &str) -> Option<Action> {
        Some(Arc::new(|_: &[Value]| {}))
    }

    #[test]
    fn test_parse_table() {
        let table = RouteTable::parse(TABLE).unwrap();
        assert_eq!(table.routing.default_route, "home");
        assert_eq!(table.routing.marker, "#!");
        assert_eq!(table.routes.len(), 3);
        assert_eq!(table.routes[0].args, vec![json!(1), json!("two")]);
        assert_eq!(table.routes[1].state, Some(json!({"page": "docs"})));
        assert_eq!(table.action_names(), vec!["show_home", "show_doc"]);
    }

    #[test]
    fn test_routing_defaults() {
        let table = RouteTable::parse("").unwrap();
        assert_eq!(table.routing.marker, DEFAULT_MARKER);
        assert!(table.routes.is_empty());
    }

    #[test]
    fn test_register_table() {
        let table = RouteTable::parse(TABLE).unwrap();
        let mut router = Router::new();
        table.register(&mut router, noop).unwrap();

        assert_eq!(router.registry().exact_len(), 2);
        assert_eq!(router.registry().pattern_len(), 2);
        assert_eq!(
            router.resolve("/docs/guide/").title().as_deref(),
            Some("Docs > Page")
        );
    }

    #[test]
    fn test_entry_without_route_rejected() {
        let entry = RouteEntry {
            action: Some("a".to_string()),
            ..RouteEntry::default()
        };
        assert!(matches!(
            entry.specs(),
            Err(RouterError::MalformedRouteSpec { .. })
        ));
    }

    #[test]
    fn test_entry_with_two_route_kinds_rejected() {
        let table = RouteTable::parse(
            r#"
[[routes]]
path = "a"
pattern = "^/a/"
action = "x"
"#,
        )
        .unwrap();
        let mut router = Router::new();
        let err = table.register(&mut router, noop).unwrap_err();
        assert!(matches!(err, RouterError::MalformedRouteSpec { .. }));
        assert!(router.registry().is_empty());
    }

    #[test]
    fn test_failed_registration_leaves_router_untouched() {
        let table = RouteTable::parse(
            r#"
[[routes]]
path = "a"
action = "ok"

[[routes]]
path = "b"
action = "missing"
"#,
        )
        .unwrap();
        let mut router = Router::new();
        let err = table
            .register(&mut router, |name| if name == "ok" { noop(name) } else { None })
            .unwrap_err();

        assert!(matches!(err, RouterError::UnknownAction { ref name } if name == "missing"));
        assert!(router.registry().is_empty());
    }

    #[test]
    fn test_entry_with_both_effects_rejected() {
        let entry = RouteEntry {
            path: Some(OneOrMany::One("a".to_string())),
            action: Some("x".to_string()),
            state: Some(json!(1)),
            ..RouteEntry::default()
        };
        assert!(matches!(
            entry.definition(noop),
            Err(RouterError::MalformedRouteSpec { .. })
        ));
    }

    #[test]
    fn test_unknown_action() {
        let entry = RouteEntry {
            path: Some(OneOrMany::One("a".to_string())),
            action: Some("missing".to_string()),
            ..RouteEntry::default()
        };
        let err = entry.definition(|_| None).unwrap_err();
        assert!(matches!(err, RouterError::UnknownAction { name } if name == "missing"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RouteTable::parse("routes = 5"),
            Err(RouterError::Config(_))
        ));
    }

    #[test]
    fn test_describe() {
        let table = RouteTable::parse(TABLE).unwrap();
        assert_eq!(table.routes[0].describe(), "exact home index");
        assert_eq!(table.routes[1].describe(), "pattern ^/docs/");
    }
}
