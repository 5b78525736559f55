//! Captured handler output.

mod api_error;
mod captured;
mod status;

pub use api_error::ApiError;
pub use captured::{CapturedResponse, preview};
pub use status::StatusCode;
