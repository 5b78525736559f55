//! JSON helpers for decoding captured bodies.

use apitest_domain::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Error type for decoding operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

/// Decodes the `{code, message}` error shape.
///
/// # Errors
///
/// Returns an error unless the body is an object with an integer `code`
/// and a string `message`.
pub fn decode_error_body(bytes: &[u8]) -> Result<ApiError, SerializationError> {
    from_json_bytes(bytes)
}

/// Decodes a body into its top-level fields.
///
/// # Errors
///
/// Returns an error if the body is not JSON or is JSON but not an object.
pub fn decode_field_map(bytes: &[u8]) -> Result<Map<String, Value>, SerializationError> {
    match from_json_bytes::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(SerializationError::NotAnObject(value_kind(&other))),
    }
}

/// Name of a JSON value's variant, for messages.
#[must_use]
pub const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
