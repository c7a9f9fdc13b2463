// Error types for route construction

use thiserror::Error;

/// Errors raised while building converters, routes and routers.
///
/// Query-time misses are never errors: `Router::match_path` returns
/// `Match::NoMatch` and `Router::find` returns `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The route set cannot form a valid tree.
    #[error("{0}")]
    Configuration(String),

    /// A bracketed segment names a converter tag nobody registered.
    #[error("Unknown converter: {0}")]
    UnknownConverter(String),

    /// A registered converter refused its segment description.
    #[error("Invalid converter '{description}': {reason}")]
    InvalidConverter { description: String, reason: String },
}

impl RouterError {
    /// Shorthand for a [`RouterError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        RouterError::Configuration(message.into())
    }

    /// Shorthand for a [`RouterError::InvalidConverter`] error.
    pub fn invalid_converter(description: impl Into<String>, reason: impl Into<String>) -> Self {
        RouterError::InvalidConverter {
            description: description.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from tree assembly.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RouterError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
