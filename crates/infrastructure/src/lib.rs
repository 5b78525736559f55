//! Apitest Infrastructure - Recorder, harness and suite runner
//!
//! This crate provides the in-memory response recorder, the request harness
//! that drives a handler once, and the validator and runners that turn
//! declarative cases into reports.
//!
//! ```
//! use apitest_application::{ResponseWriter, respond};
//! use apitest_domain::{Case, HttpMethod, RequestSpec, StatusCode};
//! use apitest_infrastructure::testing::{Suite, equals, not_empty};
//! use serde_json::json;
//!
//! fn create_widget(w: &mut dyn ResponseWriter, r: &RequestSpec) {
//!     let name = r.body_str().unwrap_or_default();
//!     respond::write_json(w, StatusCode::CREATED, &json!({"id": "abc", "name": name}));
//! }
//!
//! let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget).unwrap();
//! suite.assert_handler_tests(&[
//!     Case::new("creates widget", 201)
//!         .content("x")
//!         .assert_field("id", not_empty())
//!         .assert_field("name", equals("x")),
//! ]);
//! ```

pub mod adapters;
pub mod config;
pub mod harness;
pub mod serialization;
pub mod telemetry;
pub mod testing;

pub use adapters::{FixedClock, ResponseRecorder, SystemClock};
pub use config::{ConfigError, load_settings, load_settings_from};
pub use harness::{HandlerRequest, Invocation};
pub use serialization::{SerializationError, decode_error_body, decode_field_map, from_json_bytes};
pub use telemetry::init_test_tracing;
pub use testing::{CaseRunner, ResponseValidator, Suite, compare, equals, not_empty};
