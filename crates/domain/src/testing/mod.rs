//! Declarative handler test cases and their outcomes.
//!
//! A [`Case`] describes one request to a handler and what the response must
//! look like. Running it records [`Failure`]s on a [`TestContext`], which is
//! folded into a [`CaseReport`]; a suite run collects those into a
//! [`SuiteReport`].

mod assertion;
mod case;
mod context;
mod report;

pub use assertion::{AssertionOutcome, ComparisonOperator, FieldAssertion};
pub use case::{Case, Hook, HookPolicy};
pub use context::{DecodeTarget, Failure, Stage, TestContext};
pub use report::{CaseReport, CaseStatus, SuiteReport};
