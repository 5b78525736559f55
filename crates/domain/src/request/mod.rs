//! Synthetic request types handed to a handler under test.

mod header;
mod method;
mod route;
mod spec;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use route::Route;
pub use spec::RequestSpec;
