//! Runner settings.

use serde::{Deserialize, Serialize};

/// Default number of body characters echoed into failure messages.
pub const DEFAULT_BODY_PREVIEW_LIMIT: usize = 100;

/// Settings controlling how suites run and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// Stop running cases after the first failed one; the rest are skipped.
    pub stop_on_failure: bool,
    /// Catch panics in hooks, handlers and field assertions and report them
    /// as failures of the case.
    pub catch_panics: bool,
    /// Maximum body characters included in failure messages.
    pub body_preview_limit: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            stop_on_failure: false,
            catch_panics: true,
            body_preview_limit: DEFAULT_BODY_PREVIEW_LIMIT,
        }
    }
}

impl RunnerSettings {
    /// Sets whether to stop after the first failed case.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Sets whether panics are caught per stage.
    #[must_use]
    pub const fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Sets the body preview limit.
    #[must_use]
    pub const fn with_body_preview_limit(mut self, limit: usize) -> Self {
        self.body_preview_limit = limit;
        self
    }
}
