//! One declared handler test scenario.

use std::collections::BTreeMap;
use std::fmt;

use super::{FieldAssertion, TestContext};

/// A before/after callback scoped to a suite or a case.
pub type Hook = Box<dyn Fn(&mut TestContext) + Send + Sync>;

/// Whether a case lets the suite-level hook run around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPolicy {
    /// Run the suite hook (default).
    #[default]
    RunSuiteHook,
    /// Skip the suite hook for this case only.
    SkipSuiteHook,
}

impl HookPolicy {
    /// Returns true when the suite hook should run.
    #[must_use]
    pub const fn runs(self) -> bool {
        matches!(self, Self::RunSuiteHook)
    }
}

/// One test scenario against a suite's handler.
///
/// Every expectation other than the status code is opt-in: an unset
/// expected body, error flag, error message or empty field map skips the
/// corresponding check.
#[derive(Default)]
pub struct Case {
    /// Sub-test name; should be unique within a run.
    pub name: String,
    /// Request body sent to the handler (may be empty).
    pub content: String,
    /// Status the handler must respond with.
    pub expected_status: u16,
    /// Exact raw body expected. `None` and `Some("")` both skip the check.
    pub expected_body: Option<String>,
    /// The body must be a `{code, message}` error with a non-empty message.
    pub expect_error: bool,
    /// Substring the error message must contain.
    pub expected_error_message: Option<String>,
    /// Assertions applied to top-level fields of the JSON body.
    pub field_assertions: BTreeMap<String, Box<dyn FieldAssertion>>,
    /// Runs after the suite before-hook and before the request.
    pub before: Option<Hook>,
    /// Runs after the checks and before the suite after-hook.
    pub after: Option<Hook>,
    /// Whether the suite before-hook runs for this case.
    pub suite_before: HookPolicy,
    /// Whether the suite after-hook runs for this case.
    pub suite_after: HookPolicy,
}

impl Case {
    /// Creates a case expecting `status`.
    #[must_use]
    pub fn new(name: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            expected_status: status,
            ..Self::default()
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Expects the raw body to equal `body` exactly.
    #[must_use]
    pub fn expect_body(mut self, body: impl Into<String>) -> Self {
        self.expected_body = Some(body.into());
        self
    }

    /// Expects a `{code, message}` error body with a non-empty message.
    #[must_use]
    pub const fn expect_error(mut self) -> Self {
        self.expect_error = true;
        self
    }

    /// Expects a `{code, message}` error body whose message contains `text`.
    #[must_use]
    pub fn expect_error_message(mut self, text: impl Into<String>) -> Self {
        self.expected_error_message = Some(text.into());
        self
    }

    /// Adds an assertion for the top-level JSON field `field`.
    #[must_use]
    pub fn assert_field(
        mut self,
        field: impl Into<String>,
        assertion: impl FieldAssertion + 'static,
    ) -> Self {
        self.field_assertions.insert(field.into(), Box::new(assertion));
        self
    }

    /// Sets the per-case before-hook.
    #[must_use]
    pub fn before(mut self, hook: impl Fn(&mut TestContext) + Send + Sync + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Sets the per-case after-hook.
    #[must_use]
    pub fn after(mut self, hook: impl Fn(&mut TestContext) + Send + Sync + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    /// Skips the suite before-hook for this case.
    #[must_use]
    pub const fn skip_suite_before(mut self) -> Self {
        self.suite_before = HookPolicy::SkipSuiteHook;
        self
    }

    /// Skips the suite after-hook for this case.
    #[must_use]
    pub const fn skip_suite_after(mut self) -> Self {
        self.suite_after = HookPolicy::SkipSuiteHook;
        self
    }

    /// The expected body, if body equality should be checked at all.
    #[must_use]
    pub fn body_expectation(&self) -> Option<&str> {
        self.expected_body.as_deref().filter(|b| !b.is_empty())
    }

    /// The required error-message substring, if any.
    #[must_use]
    pub fn error_message_expectation(&self) -> Option<&str> {
        self.expected_error_message.as_deref().filter(|m| !m.is_empty())
    }

    /// Whether the body must decode as the `{code, message}` error shape.
    #[must_use]
    pub fn expects_error_shape(&self) -> bool {
        self.expect_error || self.error_message_expectation().is_some()
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("content", &self.content)
            .field("expected_status", &self.expected_status)
            .field("expected_body", &self.expected_body)
            .field("expect_error", &self.expect_error)
            .field("expected_error_message", &self.expected_error_message)
            .field("field_assertions", &self.field_assertions)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("suite_before", &self.suite_before)
            .field("suite_after", &self.suite_after)
            .finish()
    }
}
