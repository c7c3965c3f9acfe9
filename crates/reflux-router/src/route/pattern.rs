//! Segment patterns for pattern routes
//!
//! A small string pattern engine: `/users/[id]/`, `/docs/[...rest]/`,
//! `/blog/[[...rest]]/`. Patterns only answer *whether* a canonical path
//! matches; no parameters are extracted.
//!
//! Parsing and matching are **pure**: same input → same output, no side effects.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RouterError};
use crate::route::matcher::PathMatcher;

/// Represents different types of pattern segments
///
/// # Examples
///
/// ```
/// use reflux_router::route::pattern::{classify_segment, PatternSegmentType};
///
/// assert!(matches!(classify_segment("about"), PatternSegmentType::Static(_)));
/// assert!(matches!(classify_segment("[id]"), PatternSegmentType::Required(_)));
/// assert!(matches!(classify_segment("[id?]"), PatternSegmentType::Optional(_)));
/// assert!(matches!(classify_segment("[...slug]"), PatternSegmentType::CatchAll(_)));
/// assert!(matches!(classify_segment("[[...slug]]"), PatternSegmentType::OptionalCatchAll(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegmentType {
    /// Catch-all segment: [...slug], one or more segments
    CatchAll(String),
    /// Optional catch-all segment: [[...slug]], zero or more segments
    OptionalCatchAll(String),
    /// Optional segment: [id?], zero or one segment
    Optional(String),
    /// Required segment: [id], exactly one segment
    Required(String),
    /// Static text segment
    Static(String),
}

impl PatternSegmentType {
    fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll(_) | Self::OptionalCatchAll(_))
    }

    fn name(&self) -> &str {
        match self {
            Self::CatchAll(name)
            | Self::OptionalCatchAll(name)
            | Self::Optional(name)
            | Self::Required(name)
            | Self::Static(name) => name,
        }
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Optional**: `[name?]`
/// 4. **Required**: `[name]`
/// 5. **Static**: Any other text
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    if let Some(name) = segment
        .strip_prefix("[[...")
        .and_then(|s| s.strip_suffix("]]"))
    {
        return PatternSegmentType::OptionalCatchAll(name.to_string());
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            if let Some(name) = inner.strip_prefix("...") {
                return PatternSegmentType::CatchAll(name.to_string());
            }

            if let Some(name) = inner.strip_suffix('?') {
                return PatternSegmentType::Optional(name.to_string());
            }

            PatternSegmentType::Required(inner.to_string())
        }
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

/// A parsed segment pattern
///
/// Empty segments are ignored on both sides, so `/a//b/` is compared as `a`, `b`,
/// the same way the pattern `a/b` is.
///
/// # Examples
///
/// ```
/// use reflux_router::route::pattern::SegmentPattern;
/// use reflux_router::PathMatcher;
///
/// let pattern = SegmentPattern::parse("/users/[id]/").unwrap();
/// assert!(pattern.matches("/users/42/"));
/// assert!(!pattern.matches("/users/"));
///
/// let docs = SegmentPattern::parse("docs/[...rest]").unwrap();
/// assert!(docs.matches("/docs/guide/intro/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPattern {
    source: String,
    segments: Vec<PatternSegmentType>,
    case_insensitive: bool,
}

impl SegmentPattern {
    /// Parses a pattern, rejecting empty parameter names and catch-alls that
    /// are not the final segment.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| RouterError::InvalidSegmentPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<PatternSegmentType> = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(classify_segment)
            .collect();

        if let Some(seg) = segments
            .iter()
            .find(|seg| !matches!(seg, PatternSegmentType::Static(_)) && seg.name().is_empty())
        {
            return Err(invalid(&format!("unnamed segment in {seg:?}")));
        }

        let last = segments.len().saturating_sub(1);
        if segments
            .iter()
            .enumerate()
            .any(|(idx, seg)| seg.is_catch_all() && idx != last)
        {
            return Err(invalid("catch-all must be the final segment"));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            case_insensitive: false,
        })
    }

    /// Compares static segments ignoring ASCII case (functional builder)
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// The pattern text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PatternSegmentType] {
        &self.segments
    }

    fn static_eq(&self, expected: &str, actual: &str) -> bool {
        if self.case_insensitive {
            expected.eq_ignore_ascii_case(actual)
        } else {
            expected == actual
        }
    }

    /// Tail-recursive walk over pattern and path segments
    fn match_segments(&self, pattern: &[PatternSegmentType], path: &[&str]) -> bool {
        match (pattern.split_first(), path.split_first()) {
            (None, _) => path.is_empty(),
            (Some((PatternSegmentType::OptionalCatchAll(_), _)), _) => true,
            (Some((PatternSegmentType::CatchAll(_), _)), _) => !path.is_empty(),
            (Some((PatternSegmentType::Optional(_), rest)), Some((_, path_rest))) => {
                self.match_segments(rest, path_rest) || self.match_segments(rest, path)
            }
            (Some((PatternSegmentType::Optional(_), rest)), None) => self.match_segments(rest, path),
            (Some((PatternSegmentType::Required(_), rest)), Some((_, path_rest))) => {
                self.match_segments(rest, path_rest)
            }
            (Some((PatternSegmentType::Static(expected), rest)), Some((actual, path_rest))) => {
                self.static_eq(expected, actual) && self.match_segments(rest, path_rest)
            }
            (Some(_), None) => false,
        }
    }
}

impl PathMatcher for SegmentPattern {
    fn matches(&self, path: &str) -> bool {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.match_segments(&self.segments, &path_segments)
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

impl FromStr for SegmentPattern {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
