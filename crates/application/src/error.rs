//! Harness error types

use thiserror::Error;

/// Errors raised while driving a handler.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The response body could not be read to completion.
    #[error("handler request to {route} failed while reading the response body: {source}")]
    BodyRead {
        /// Route that was requested.
        route: String,
        /// Underlying read error.
        source: std::io::Error,
    },

    /// The handler panicked before returning.
    #[error("handler request to {route} panicked: {reason}")]
    HandlerPanicked {
        /// Route that was requested.
        route: String,
        /// Panic message.
        reason: String,
    },

    /// The handler answered with a status outside the accepted set.
    #[error("handler request to {route} resulted in an unacceptable {status} status:\n{body}")]
    UnacceptedStatus {
        /// Route that was requested.
        route: String,
        /// Status the handler wrote.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
