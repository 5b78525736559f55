//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness and the code it drives.
//! Adapters in the infrastructure layer implement them.

mod clock;
mod handler;

pub use clock::Clock;
pub use handler::{Handler, ResponseWriter};
