//! The `{code, message}` error body handlers return.

use serde::{Deserialize, Serialize};

/// Standard error body: `{"code": <int>, "message": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Status code echoed into the body.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: i64::from(code),
            message: message.into(),
        }
    }

    /// Whether the body's code matches `status`.
    #[must_use]
    pub fn code_matches(&self, status: u16) -> bool {
        self.code == i64::from(status)
    }
}
