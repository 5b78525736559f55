//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building requests or cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The route cannot be used as a request target.
    #[error("invalid route '{route}': {reason}")]
    InvalidRoute {
        /// The route as supplied.
        route: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// The HTTP method is not a valid token.
    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// A status code outside 100..=999.
    #[error("invalid status code: {0}")]
    InvalidStatusCode(u16),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
