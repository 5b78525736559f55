//! Apitest Domain - Core types for declarative handler tests
//!
//! This crate defines requests, captured responses, test cases and their
//! reports. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestSpec, Route};
pub use response::{ApiError, CapturedResponse, StatusCode};
pub use settings::RunnerSettings;
pub use testing::{
    AssertionOutcome, Case, CaseReport, CaseStatus, ComparisonOperator, DecodeTarget, Failure,
    FieldAssertion, Hook, HookPolicy, Stage, SuiteReport, TestContext,
};
