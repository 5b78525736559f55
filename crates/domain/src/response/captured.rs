//! Response captured from a single handler invocation.

use serde::{Deserialize, Serialize};

use super::StatusCode;
use crate::request::Headers;

/// Status, headers and raw body produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// Status the handler wrote (200 if it never wrote one).
    pub status: StatusCode,
    /// Response headers.
    #[serde(default)]
    pub headers: Headers,
    /// Raw body bytes.
    #[serde(default)]
    pub body: Vec<u8>,
}

impl CapturedResponse {
    /// Creates a captured response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Numeric status.
    #[must_use]
    pub const fn status_u16(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the body as a lossy UTF-8 string.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns at most `limit` characters of the body for diagnostics.
    #[must_use]
    pub fn body_preview(&self, limit: usize) -> String {
        preview(&self.body_text(), limit)
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns true if the content type indicates JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }
}

/// Truncates `text` to `limit` characters, appending `...` when cut.
#[must_use]
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
