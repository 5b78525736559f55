//! Field-level assertion capability.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of applying a [`FieldAssertion`] to one decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    /// The value satisfied the assertion.
    Pass,
    /// The value did not satisfy the assertion.
    Fail(String),
}

impl AssertionOutcome {
    /// Builds a failed outcome.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail(reason.into())
    }

    /// Passes when `ok` holds, otherwise fails with the lazily built reason.
    #[must_use]
    pub fn check(ok: bool, reason: impl FnOnce() -> String) -> Self {
        if ok { Self::Pass } else { Self::Fail(reason()) }
    }

    /// Returns true for [`AssertionOutcome::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A pluggable check applied to one top-level field of a JSON response.
///
/// Closures of type `Fn(&Value) -> AssertionOutcome` implement this trait,
/// so ad-hoc checks need no named type.
pub trait FieldAssertion: Send + Sync {
    /// Checks `value`.
    fn assert(&self, value: &Value) -> AssertionOutcome;

    /// Short description used in failure reports.
    fn description(&self) -> String {
        "custom assertion".to_string()
    }
}

impl<F> FieldAssertion for F
where
    F: Fn(&Value) -> AssertionOutcome + Send + Sync,
{
    fn assert(&self, value: &Value) -> AssertionOutcome {
        self(value)
    }
}

impl fmt::Debug for dyn FieldAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Comparison operators for value assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
    /// Contains (substring for strings, element for arrays, key for objects).
    Contains,
    /// Matches regex pattern.
    Matches,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
