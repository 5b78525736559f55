//! HTTP Method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// HTTP method a suite targets.
///
/// The common methods have their own variants; any other valid token
/// (`PURGE`, `PROPFIND`, a custom verb) is carried as [`HttpMethod::Extension`]
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// Any other method token, case preserved.
    Extension(String),
}

impl HttpMethod {
    /// Returns the method as it appears on the request line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Extension(token) => token,
        }
    }
}

// tchar from RFC 9110 section 5.6.2
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ if is_token(trimmed) => Ok(Self::Extension(trimmed.to_string())),
            _ => Err(DomainError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<&str> for HttpMethod {
    type Error = DomainError;

    fn try_from(value: &str) -> DomainResult<Self> {
        value.parse()
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Extension(token) => token,
            other => other.as_str().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!(" Delete ".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!(HttpMethod::try_from("OPTIONS").unwrap(), HttpMethod::Options);
    }

    #[test]
    fn other_tokens_are_kept_verbatim() {
        let purge = "PURGE".parse::<HttpMethod>().unwrap();
        assert_eq!(purge, HttpMethod::Extension("PURGE".to_string()));
        assert_eq!(purge.as_str(), "PURGE");
        assert_eq!(
            HttpMethod::try_from("x-Sync").unwrap().to_string(),
            "x-Sync"
        );
    }

    #[test]
    fn non_tokens_are_rejected() {
        assert_eq!(
            "BAD METHOD".parse::<HttpMethod>(),
            Err(DomainError::InvalidMethod("BAD METHOD".to_string()))
        );
        assert!("".parse::<HttpMethod>().is_err());
        assert!("GET/".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn serializes_as_request_line_text() {
        let json = serde_json::to_string(&HttpMethod::Extension("PURGE".to_string())).unwrap();
        assert_eq!(json, r#""PURGE""#);
        let method: HttpMethod = serde_json::from_str(r#""patch""#).unwrap();
        assert_eq!(method, HttpMethod::Patch);
    }

    #[test]
    fn displays_request_line_form() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
