//! Error taxonomy for name resolution and directory operations.

use thiserror::Error;

use crate::environment::expression::ExpandError;

/// Errors surfaced by routing and backend contexts.
#[derive(Debug, Error)]
pub enum NamingError {
    /// A configured or synthesized provider endpoint is not a well-formed URI.
    #[error("invalid provider URI `{value}`: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    /// Every resolution tier was exhausted for the scheme.
    #[error("no naming provider available for scheme {}", display_scheme(.scheme))]
    NoProviderAvailable { scheme: Option<String> },

    /// A string name could not be parsed.
    #[error("malformed name `{name}`: {reason}")]
    MalformedName { name: String, reason: String },

    /// The name is not bound in the target context.
    #[error("name not found: `{0}`")]
    NameNotFound(String),

    /// The target context does not support the operation.
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// A property expression could not be expanded.
    #[error(transparent)]
    Expansion(#[from] ExpandError),

    /// Failure raised by a plugin or backend context.
    #[error("backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl NamingError {
    /// Wrap an arbitrary backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Backend(err.into())
    }

    pub(crate) fn invalid_endpoint(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEndpoint {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

fn display_scheme(scheme: &Option<String>) -> String {
    match scheme {
        Some(s) => format!("`{}`", s),
        None => "<none>".to_string(),
    }
}

/// Result type for naming operations.
pub type NamingResult<T> = Result<T, NamingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NamingError::NoProviderAvailable {
            scheme: Some("ejb".into()),
        };
        assert_eq!(err.to_string(), "no naming provider available for scheme `ejb`");

        let err = NamingError::NoProviderAvailable { scheme: None };
        assert!(err.to_string().ends_with("<none>"));

        let err = NamingError::invalid_endpoint("a b://x", "bad scheme");
        assert!(err.to_string().contains("a b://x"));
    }

    #[test]
    fn test_backend_wraps_message() {
        let err = NamingError::backend("connection refused");
        assert_eq!(err.to_string(), "backend failure: connection refused");
    }
}
