//! Path utilities for canonical route keys
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//!
//! A canonical path always carries a leading AND a trailing slash (`/foo/bar/`),
//! so `foo/bar`, `/foo/bar` and `foo/bar/` all name the same route.

use std::borrow::Cow;

/// The canonical root path
pub const ROOT_PATH: &str = "/";

/// Checks if a path is already in canonical form
///
/// # Rules
///
/// - Must not be empty
/// - Must start with `/`
/// - Must end with `/`
///
/// Interior content is not inspected: `/a//b/` is canonical.
///
/// # Examples
///
/// ```
/// use reflux_router::path::is_canonical_path;
///
/// assert!(is_canonical_path("/"));
/// assert!(is_canonical_path("/about/"));
///
/// assert!(!is_canonical_path(""));
/// assert!(!is_canonical_path("about/")); // Missing leading /
/// assert!(!is_canonical_path("/about")); // Missing trailing /
/// ```
pub fn is_canonical_path(path: &str) -> bool {
    path.starts_with('/') && path.ends_with('/')
}

/// Normalize a path fragment to canonical form
///
/// Returns `Cow::Borrowed` when input is already canonical (zero allocations).
/// Returns `Cow::Owned` when a slash had to be added at either end.
///
/// Empty input maps to the root path. Existing slashes at either end are never
/// duplicated and interior content is left untouched.
///
/// # Examples
///
/// ```
/// use reflux_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about/");
/// assert!(matches!(path, Cow::Borrowed("/about/")));
///
/// assert_eq!(normalize_path("a/b"), "/a/b/");
/// assert_eq!(normalize_path("/a/b"), "/a/b/");
/// assert_eq!(normalize_path("a/b/"), "/a/b/");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed(ROOT_PATH);
    }

    if is_canonical_path(path) {
        return Cow::Borrowed(path);
    }

    let leading = if path.starts_with('/') { "" } else { "/" };
    let trailing = if path.ends_with('/') { "" } else { "/" };

    Cow::Owned(format!("{leading}{path}{trailing}"))
}

/// Normalize a path fragment that may be absent
///
/// `None` is treated like an empty fragment and maps to the root path.
///
/// ```
/// use reflux_router::path::normalize_optional_path;
///
/// assert_eq!(normalize_optional_path(None), "/");
/// assert_eq!(normalize_optional_path(Some("x")), "/x/");
/// ```
pub fn normalize_optional_path(path: Option<&str>) -> Cow<'_, str> {
    normalize_path(path.unwrap_or_default())
}
