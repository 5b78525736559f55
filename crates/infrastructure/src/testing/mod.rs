//! Case execution: validation, single-case runs and suites.
//!
//! [`Suite`] is the entry point; [`CaseRunner`] and [`ResponseValidator`]
//! are exposed for callers that drive cases on their own.

mod assertions;
pub(crate) mod guard;
mod runner;
mod suite;
mod validator;

pub use assertions::{Compare, Equals, NotEmpty, compare, equals, not_empty};
pub use runner::CaseRunner;
pub use suite::Suite;
pub use validator::ResponseValidator;
