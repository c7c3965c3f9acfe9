//! # Reflux Router
//!
//! Path routing for single-page applications:
//! - Exact routes (`/about/`) with last-write-wins registration
//! - Pattern routes (regex, segment patterns like `/users/[id]/`, or closures)
//! - Actions with argument lists, or state payloads handed to the host
//! - Titles composed across every matching pattern route (`{title} > Docs`)
//! - History and title synchronization through injected host capabilities
//!
//! ## Resolution Rules
//!
//! 1. Paths are normalized to canonical form: `foo/bar`, `/foo/bar` and
//!    `foo/bar/` all become `/foo/bar/`.
//! 2. An exact route for the path always wins; patterns are not evaluated.
//! 3. Otherwise *every* matching pattern route applies, in registration order,
//!    and their title templates are folded left to right.
//!
//! Navigating to a path nothing matches is not an error: no effect runs, no
//! title is set, and `None` is returned.
//!
//! ## Example
//!
//! ```
//! use reflux_router::{MemoryHistory, Router};
//! use regex::Regex;
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! let applied = Arc::new(Mutex::new(Vec::new()));
//! let history = MemoryHistory::new();
//!
//! let sink = Arc::clone(&applied);
//! let mut router: Router = Router::new()
//!     .with_history(history.clone())
//!     .with_state_applier(move |state: &serde_json::Value| sink.lock().unwrap().push(state.clone()));
//!
//! router.define_route_state("home", json!({"page": "home"}), "Home");
//! router.define_route_state(Regex::new("^/x/").unwrap(), json!({"x": 1}), "one");
//! router.define_route_state(Regex::new("^/x/").unwrap(), json!({"x": 2}), "{title} > two");
//!
//! assert_eq!(router.navigate_to("x", false).as_deref(), Some("one > two"));
//! assert_eq!(applied.lock().unwrap().len(), 2);
//! assert_eq!(history.current().unwrap().marker, "/x/");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod host;
pub mod path;
pub mod registry;
pub mod route;
pub mod router;
pub mod title;

pub use config::{RouteEntry, RouteTable, RoutingConfig};
pub use error::{Result, RouterError};
pub use host::{
    HistoryEntry, HistorySink, LocationSource, MemoryHistory, MemoryTitle, RoutingMode,
    StateApplier, StaticLocation, TitleSink, MARKER_PREFIX,
};
pub use path::{is_canonical_path, normalize_optional_path, normalize_path, ROOT_PATH};
pub use registry::{PatternRoute, Resolution, RouteRegistry};
pub use route::matcher::PathMatcher;
pub use route::pattern::{classify_segment, PatternSegmentType, SegmentPattern};
pub use route::{Action, RouteDefinition, RouteSpec, RouteSpecs};
pub use router::Router;
pub use title::{compose_title, TITLE_PLACEHOLDER};
