use regex::Regex;

/// Capability for pattern routes: does a canonical path satisfy this pattern?
///
/// Matchers always see the canonical form (`/foo/bar/`), so regexes have to
/// account for the leading and trailing slash themselves.
///
/// Implemented for [`Regex`], [`SegmentPattern`](super::pattern::SegmentPattern)
/// and plain closures.
///
/// # Examples
///
/// ```
/// use reflux_router::PathMatcher;
/// use regex::Regex;
///
/// let re = Regex::new("^/admin/").unwrap();
/// assert!(re.matches("/admin/users/"));
///
/// let deep = |path: &str| path.matches('/').count() > 3;
/// assert!(deep.matches("/a/b/c/"));
/// ```
pub trait PathMatcher: Send + Sync {
    fn matches(&self, path: &str) -> bool;

    /// Human readable form used in logs and listings
    fn describe(&self) -> String {
        "<matcher>".to_string()
    }
}

impl PathMatcher for Regex {
    fn matches(&self, path: &str) -> bool {
        self.is_match(path)
    }

    fn describe(&self) -> String {
        self.as_str().to_string()
    }
}

impl<F> PathMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, path: &str) -> bool {
        self(path)
    }
}
