use std::fmt;

/// Unified error type for the studyshelf crate.
#[derive(Debug, Clone)]
pub enum SiteError {
    /// A path, note index, or semester that resolves to nothing.
    NotFound,
    /// The static content source or site configuration is missing or malformed.
    ConfigLoad(String),
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::NotFound => write!(f, "not found"),
            SiteError::ConfigLoad(msg) => write!(f, "config load failure: {msg}"),
            SiteError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            SiteError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for SiteError {}

/// Result type alias using [`SiteError`].
pub type SiteResult<T> = Result<T, SiteError>;
