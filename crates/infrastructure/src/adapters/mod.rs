//! Adapters implementing application ports.

mod clock;
mod recorder;

pub use clock::{FixedClock, SystemClock};
pub use recorder::{RecordedBody, RecordedResponse, ResponseRecorder};
