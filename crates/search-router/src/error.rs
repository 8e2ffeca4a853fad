//! Error types for route table construction, resolution and navigation

use thiserror::Error;

/// Errors produced by the router
#[derive(Debug, Error)]
pub enum RouterError {
    /// Two records in one table share a name
    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    /// Two records in one table share a path pattern
    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),

    /// A path pattern does not follow the pattern syntax
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// No route is registered under this name
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    /// URL generation was asked for a route without one of its required params
    #[error("missing required param `{param}` for route `{route}`")]
    MissingParam { route: String, param: String },

    /// A descriptor references a component key the registry does not know
    #[error("no component registered under `{0}`")]
    UnknownComponent(String),

    /// A lazy component failed to load
    #[error("failed to load component `{key}`: {reason}")]
    ComponentLoad { key: String, reason: String },

    /// Descriptor list could not be (de)serialized
    #[error("route descriptor serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RouterError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RouterError>;
