//! JSON decoding of response bodies.

mod json;

pub use json::*;
