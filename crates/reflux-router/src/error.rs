use thiserror::Error;

/// Errors raised while configuring routes or initializing routing
///
/// Navigating to a path that nothing matches is *not* an error, and neither is
/// running without a history or title sink.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The routing marker does not occur in the initial location (path mode only)
    #[error("routing marker `{marker}` not found in current location `{location}`")]
    MarkerNotFound { marker: String, location: String },

    /// A route-table entry that is not exactly one route kind with exactly one effect
    #[error("malformed route specifier: {route}")]
    MalformedRouteSpec { route: String },

    #[error("invalid route regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid segment pattern `{pattern}`: {reason}")]
    InvalidSegmentPattern { pattern: String, reason: String },

    /// A route table names an action the host did not provide
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },

    #[error("failed to parse route table: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read route table: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouterError>;
