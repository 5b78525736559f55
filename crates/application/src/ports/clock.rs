//! Clock port for report timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Reports stamp each case with it; tests substitute a fixed clock to get
/// reproducible reports.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
