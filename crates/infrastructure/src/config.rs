//! Runner settings from environment variables.

use apitest_domain::RunnerSettings;
use thiserror::Error;

/// Stops a suite after its first failed case.
pub const STOP_ON_FAILURE_VAR: &str = "APITEST_STOP_ON_FAILURE";
/// Enables or disables panic isolation.
pub const CATCH_PANICS_VAR: &str = "APITEST_CATCH_PANICS";
/// Maximum body characters echoed into failure messages.
pub const BODY_PREVIEW_LIMIT_VAR: &str = "APITEST_BODY_PREVIEW_LIMIT";

/// A configuration variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value could not be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Loads settings from the process environment.
///
/// Unset variables keep their defaults.
///
/// # Errors
///
/// Returns an error naming the first variable with a malformed value.
pub fn load_settings() -> Result<RunnerSettings, ConfigError> {
    load_settings_from(|var| std::env::var(var).ok())
}

/// Loads settings through `lookup`, which maps a variable name to its value.
///
/// # Errors
///
/// Returns an error naming the first variable with a malformed value.
pub fn load_settings_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RunnerSettings, ConfigError> {
    let mut settings = RunnerSettings::default();

    if let Some(value) = lookup(STOP_ON_FAILURE_VAR) {
        settings.stop_on_failure = parse_bool(STOP_ON_FAILURE_VAR, &value)?;
    }
    if let Some(value) = lookup(CATCH_PANICS_VAR) {
        settings.catch_panics = parse_bool(CATCH_PANICS_VAR, &value)?;
    }
    if let Some(value) = lookup(BODY_PREVIEW_LIMIT_VAR) {
        settings.body_preview_limit =
            value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    var: BODY_PREVIEW_LIMIT_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
    }

    tracing::debug!(?settings, "runner settings loaded");
    Ok(settings)
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected one of 1, true, yes, on, 0, false, no, off".to_string(),
        }),
    }
}
