//! The synthetic request handed to a handler.

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, Route};

/// A synthetic request: method, target, headers and body.
///
/// Built fresh for every handler invocation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Request method.
    pub method: HttpMethod,
    /// Request target.
    pub route: Route,
    /// Request headers.
    #[serde(default)]
    pub headers: Headers,
    /// Raw request body.
    #[serde(default)]
    pub body: Vec<u8>,
}

impl RequestSpec {
    /// Creates a request carrying `body` as its content.
    #[must_use]
    pub fn new(method: HttpMethod, route: Route, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            route,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// Request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.route.path()
    }

    /// Returns the body as UTF-8 text, if it is valid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the `Content-Length` a transport would send.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}
