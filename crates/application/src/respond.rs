//! Helpers for handlers that answer with JSON.

use apitest_domain::{ApiError, StatusCode};
use serde::Serialize;

use crate::ports::ResponseWriter;

/// Content type written by the JSON helpers.
pub const APPLICATION_JSON: &str = "application/json";

/// Writes `value` as a JSON body with `status`.
///
/// If `value` cannot be encoded, a `500` error body is written instead.
pub fn write_json<T: Serialize + ?Sized>(
    w: &mut dyn ResponseWriter,
    status: StatusCode,
    value: &T,
) {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            let _ = w.headers_mut().set("Content-Type", APPLICATION_JSON);
            w.write_header(status);
            w.write(&bytes);
        }
        Err(e) => write_error(
            w,
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("failed to encode response: {e}"),
        ),
    }
}

/// Writes a `{"code": status, "message": message}` error body.
pub fn write_error(w: &mut dyn ResponseWriter, status: StatusCode, message: &str) {
    let body = ApiError::new(status.as_u16(), message);
    let bytes = serde_json::to_vec(&body).unwrap_or_default();
    let _ = w.headers_mut().set("Content-Type", APPLICATION_JSON);
    w.write_header(status);
    w.write(&bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use apitest_domain::Headers;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::io::Read;

    #[derive(Default)]
    struct Buffer {
        headers: Headers,
        status: Option<StatusCode>,
        body: Vec<u8>,
    }

    impl ResponseWriter for Buffer {
        fn headers_mut(&mut self) -> &mut Headers {
            &mut self.headers
        }

        fn write_header(&mut self, status: StatusCode) {
            self.status.get_or_insert(status);
        }

        fn write(&mut self, bytes: &[u8]) {
            self.body.extend_from_slice(bytes);
        }

        fn stream(&mut self, mut body: Box<dyn Read + Send>) {
            let _ = body.read_to_end(&mut self.body);
        }
    }

    #[test]
    fn writes_json_with_content_type() {
        let mut w = Buffer::default();
        let value = BTreeMap::from([("id", "abc"), ("name", "x")]);
        write_json(&mut w, StatusCode::CREATED, &value);

        assert_eq!(w.status, Some(StatusCode::CREATED));
        assert_eq!(w.headers.get("content-type"), Some(APPLICATION_JSON));
        assert_eq!(String::from_utf8_lossy(&w.body), r#"{"id":"abc","name":"x"}"#);
    }

    #[test]
    fn writes_standard_error_shape() {
        let mut w = Buffer::default();
        write_error(&mut w, StatusCode::NOT_FOUND, "not found: widget");
        assert_eq!(
            String::from_utf8_lossy(&w.body),
            r#"{"code":404,"message":"not found: widget"}"#
        );
    }

    #[test]
    fn unencodable_value_becomes_server_error() {
        let mut w = Buffer::default();
        let value = BTreeMap::from([(vec![1u8], 1)]);
        write_json(&mut w, StatusCode::OK, &value);
        assert_eq!(w.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(String::from_utf8_lossy(&w.body).contains("failed to encode response"));
    }
}
