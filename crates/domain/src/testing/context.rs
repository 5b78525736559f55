//! Failure recording for a single running case.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a failed decode was trying to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeTarget {
    /// The `{code, message}` error shape.
    ErrorBody,
    /// A JSON object keyed by field name.
    FieldMap,
}

impl fmt::Display for DecodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ErrorBody => f.write_str("error body {code, message}"),
            Self::FieldMap => f.write_str("JSON object"),
        }
    }
}

/// The part of a case that was executing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Suite-level before-hook.
    SuiteBefore,
    /// Case-level before-hook.
    CaseBefore,
    /// The handler invocation.
    Handler,
    /// A field assertion for the named field.
    FieldAssertion(String),
    /// Case-level after-hook.
    CaseAfter,
    /// Suite-level after-hook.
    SuiteAfter,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuiteBefore => f.write_str("suite before-hook"),
            Self::CaseBefore => f.write_str("case before-hook"),
            Self::Handler => f.write_str("handler"),
            Self::FieldAssertion(field) => write!(f, "field assertion for '{field}'"),
            Self::CaseAfter => f.write_str("case after-hook"),
            Self::SuiteAfter => f.write_str("suite after-hook"),
        }
    }
}

/// A single test-visible failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The request harness itself failed (body read, unaccepted status).
    #[error("{reason}")]
    Harness {
        /// Harness error text.
        reason: String,
    },

    /// The body could not be decoded for an expectation that needed it.
    #[error("failed to decode body as {target}: {reason}")]
    Decode {
        /// What was being decoded.
        target: DecodeTarget,
        /// Decoder error text.
        reason: String,
    },

    /// A comparison did not hold.
    #[error("{check}: expected {expected}, got {actual}")]
    Mismatch {
        /// Name of the check.
        check: String,
        /// Expected value, rendered.
        expected: String,
        /// Actual value, rendered.
        actual: String,
    },

    /// A check failed for a reason other than a plain mismatch.
    #[error("{check}: {reason}")]
    Assertion {
        /// Name of the check.
        check: String,
        /// Why it failed.
        reason: String,
    },

    /// A field assertion targets a field the body does not have.
    #[error("the key '{field}' does not exist in the response but a field assertion for it was specified")]
    MissingField {
        /// The configured field name.
        field: String,
    },

    /// A hook, the handler or a field assertion panicked.
    #[error("{stage} panicked: {reason}")]
    Panicked {
        /// Where the panic happened.
        stage: Stage,
        /// Panic payload, if it was a string.
        reason: String,
    },

    /// Reported directly by a hook.
    #[error("{reason}")]
    Reported {
        /// What the hook reported.
        reason: String,
    },
}

/// Collects failures for one running case.
///
/// Recording a failure never stops the case; every later check still runs
/// so a single run reports everything it can determine.
#[derive(Debug, Clone, Default)]
pub struct TestContext {
    name: String,
    failures: Vec<Failure>,
    checks: usize,
}

impl TestContext {
    /// Creates a context for the case called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: Vec::new(),
            checks: 0,
        }
    }

    /// The case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a failure.
    pub fn record(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Records a free-form failure, as a hook would.
    pub fn error(&mut self, reason: impl Into<String>) {
        self.record(Failure::Reported {
            reason: reason.into(),
        });
    }

    /// Counts a check and records a failure if `ok` is false.
    pub fn check(&mut self, check: &str, ok: bool, reason: impl FnOnce() -> String) -> bool {
        self.checks += 1;
        if !ok {
            self.record(Failure::Assertion {
                check: check.to_string(),
                reason: reason(),
            });
        }
        ok
    }

    /// Counts an equality check and records a mismatch if it does not hold.
    pub fn check_eq<T>(&mut self, check: &str, expected: &T, actual: &T) -> bool
    where
        T: PartialEq + fmt::Debug + ?Sized,
    {
        self.checks += 1;
        let ok = expected == actual;
        if !ok {
            self.record(Failure::Mismatch {
                check: check.to_string(),
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            });
        }
        ok
    }

    /// Whether any failure was recorded.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failures recorded so far.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of checks evaluated so far.
    #[must_use]
    pub const fn checks(&self) -> usize {
        self.checks
    }

    /// Consumes the context.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Failure>, usize) {
        (self.name, self.failures, self.checks)
    }
}
