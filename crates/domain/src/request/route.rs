//! Validated request targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Origin used to resolve relative routes, matching the host an in-memory
/// test request reports.
const SYNTHETIC_ORIGIN: &str = "http://example.com";

/// A request target: the route as written plus its resolved path and query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route {
    raw: String,
    url: Url,
}

impl Route {
    /// Parses a route such as `/widgets/7?verbose=true`.
    ///
    /// Relative routes are resolved against `http://example.com`; absolute
    /// URLs are kept as-is.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRoute`] if the route is blank or cannot
    /// be resolved to a URL.
    pub fn parse(route: &str) -> DomainResult<Self> {
        let trimmed = route.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRoute {
                route: route.to_string(),
                reason: "route is empty".to_string(),
            });
        }

        let invalid = |e: url::ParseError| DomainError::InvalidRoute {
            route: route.to_string(),
            reason: e.to_string(),
        };
        let base = Url::parse(SYNTHETIC_ORIGIN).map_err(invalid)?;
        let url = base.join(trimmed).map_err(invalid)?;

        Ok(Self {
            raw: trimmed.to_string(),
            url,
        })
    }

    /// The route exactly as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The percent-encoded path component.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The raw query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Decoded query pairs in order of appearance.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// First decoded value of query parameter `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// The host the request is addressed to.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Route {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.raw
    }
}
