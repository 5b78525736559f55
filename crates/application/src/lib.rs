//! Apitest Application - Handler ports and harness errors
//!
//! The handler under test and the response writer it writes to are ports;
//! the in-memory recorder and the harness that drives them live in the
//! infrastructure crate.

pub mod error;
pub mod ports;
pub mod respond;

pub use error::{HarnessError, HarnessResult};
pub use ports::{Clock, Handler, ResponseWriter};
