//! Checks a captured response against a case's expectations.

use apitest_domain::response::preview;
use apitest_domain::{
    AssertionOutcome, CapturedResponse, Case, DecodeTarget, Failure, RunnerSettings, Stage,
    TestContext,
};

use super::guard::run_guarded;
use crate::serialization::{decode_error_body, decode_field_map};

/// Validates responses without stopping at the first failed check.
///
/// Status equality is always checked. Body equality, the error shape and
/// field assertions run only when the case configures them. A decode
/// failure ends its own check group; the other groups still run.
#[derive(Debug, Clone, Copy)]
pub struct ResponseValidator {
    body_preview_limit: usize,
    catch_panics: bool,
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self::new(&RunnerSettings::default())
    }
}

impl ResponseValidator {
    /// Creates a validator using `settings`.
    #[must_use]
    pub const fn new(settings: &RunnerSettings) -> Self {
        Self {
            body_preview_limit: settings.body_preview_limit,
            catch_panics: settings.catch_panics,
        }
    }

    /// Runs every configured check, recording failures on `ctx`.
    pub fn validate(&self, ctx: &mut TestContext, case: &Case, response: &CapturedResponse) {
        ctx.check_eq("status code", &case.expected_status, &response.status_u16());
        self.check_body(ctx, case, response);
        Self::check_error_shape(ctx, case, response);
        self.check_fields(ctx, case, response);
    }

    fn check_body(&self, ctx: &mut TestContext, case: &Case, response: &CapturedResponse) {
        let Some(expected) = case.body_expectation() else {
            return;
        };
        let limit = self.body_preview_limit;
        ctx.check("body", response.body_text() == expected, || {
            format!(
                "expected {:?}, got {:?}",
                preview(expected, limit),
                response.body_preview(limit)
            )
        });
    }

    fn check_error_shape(ctx: &mut TestContext, case: &Case, response: &CapturedResponse) {
        if !case.expects_error_shape() {
            return;
        }
        let error = match decode_error_body(&response.body) {
            Ok(error) => error,
            Err(e) => {
                ctx.record(Failure::Decode {
                    target: DecodeTarget::ErrorBody,
                    reason: e.to_string(),
                });
                return;
            }
        };

        ctx.check("error code", error.code_matches(case.expected_status), || {
            format!("expected {}, got {}", case.expected_status, error.code)
        });
        if case.expect_error {
            ctx.check("error message", !error.message.is_empty(), || {
                "should not be empty".to_string()
            });
        }
        if let Some(needle) = case.error_message_expectation() {
            ctx.check("error message", error.message.contains(needle), || {
                format!("{:?} does not contain {needle:?}", error.message)
            });
        }
    }

    fn check_fields(&self, ctx: &mut TestContext, case: &Case, response: &CapturedResponse) {
        if case.field_assertions.is_empty() {
            return;
        }
        let fields = match decode_field_map(&response.body) {
            Ok(fields) => fields,
            Err(e) => {
                ctx.record(Failure::Decode {
                    target: DecodeTarget::FieldMap,
                    reason: e.to_string(),
                });
                return;
            }
        };

        for (field, assertion) in &case.field_assertions {
            let Some(value) = fields.get(field) else {
                ctx.record(Failure::MissingField {
                    field: field.clone(),
                });
                continue;
            };
            match run_guarded(self.catch_panics, || assertion.assert(value)) {
                Ok(outcome) => {
                    let check = format!("field '{field}' {}", assertion.description());
                    ctx.check(&check, outcome.is_pass(), || match outcome {
                        AssertionOutcome::Fail(reason) => reason,
                        AssertionOutcome::Pass => String::new(),
                    });
                }
                Err(reason) => ctx.record(Failure::Panicked {
                    stage: Stage::FieldAssertion(field.clone()),
                    reason,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{equals, not_empty};
    use apitest_domain::{Headers, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn response(status: StatusCode, body: &str) -> CapturedResponse {
        CapturedResponse::new(status, Headers::new(), body.as_bytes().to_vec())
    }

    fn run(case: &Case, response: &CapturedResponse) -> TestContext {
        let mut ctx = TestContext::new(&case.name);
        ResponseValidator::default().validate(&mut ctx, case, response);
        ctx
    }

    #[test]
    fn only_status_is_checked_by_default() {
        let ctx = run(&Case::new("plain", 200), &response(StatusCode::OK, "anything"));
        assert!(!ctx.is_failed());
        assert_eq!(ctx.checks(), 1);
    }

    #[test]
    fn empty_expected_body_skips_equality() {
        let case = Case::new("relaxed", 200).expect_body("");
        let ctx = run(&case, &response(StatusCode::OK, "not empty"));
        assert!(!ctx.is_failed());
        assert_eq!(ctx.checks(), 1);
    }

    #[test]
    fn body_mismatch_is_reported_alongside_status() {
        let case = Case::new("both", 201).expect_body("created");
        let ctx = run(&case, &response(StatusCode::OK, "ok"));
        assert_eq!(ctx.failures().len(), 2);
        assert_eq!(
            ctx.failures()[1].to_string(),
            r#"body: expected "created", got "ok""#
        );
    }

    #[test]
    fn body_mismatch_preview_is_truncated() {
        let case = Case::new("long", 200).expect_body("short");
        let mut ctx = TestContext::new(&case.name);
        let settings = RunnerSettings::default().with_body_preview_limit(4);
        ResponseValidator::new(&settings).validate(
            &mut ctx,
            &case,
            &response(StatusCode::OK, "a much longer body"),
        );
        assert_eq!(
            ctx.failures()[0].to_string(),
            r#"body: expected "shor...", got "a mu...""#
        );
    }

    #[test]
    fn error_shape_passes_for_matching_error() {
        let case = Case::new("missing", 404)
            .expect_error()
            .expect_error_message("not found");
        let ctx = run(
            &case,
            &response(StatusCode::NOT_FOUND, r#"{"code":404,"message":"not found: widget"}"#),
        );
        assert!(!ctx.is_failed(), "{:?}", ctx.failures());
        assert_eq!(ctx.checks(), 4);
    }

    #[test]
    fn non_json_error_body_stops_error_checks() {
        let case = Case::new("plain text", 404).expect_error();
        let ctx = run(&case, &response(StatusCode::NOT_FOUND, "not found"));

        assert_eq!(ctx.failures().len(), 1);
        assert!(matches!(
            ctx.failures()[0],
            Failure::Decode {
                target: DecodeTarget::ErrorBody,
                ..
            }
        ));
        assert_eq!(ctx.checks(), 1);
    }

    #[test]
    fn error_code_and_message_are_checked() {
        let case = Case::new("wrong", 404)
            .expect_error()
            .expect_error_message("widget");
        let ctx = run(&case, &response(StatusCode::NOT_FOUND, r#"{"code":400,"message":""}"#));
        let messages: Vec<_> = ctx.failures().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "error code: expected 404, got 400".to_string(),
                "error message: should not be empty".to_string(),
                r#"error message: "" does not contain "widget""#.to_string(),
            ]
        );
    }

    #[test]
    fn missing_field_does_not_stop_siblings() {
        let case = Case::new("fields", 200)
            .assert_field("id", not_empty())
            .assert_field("missing_field", not_empty())
            .assert_field("name", equals("y"));
        let ctx = run(&case, &response(StatusCode::OK, r#"{"id":"abc","name":"x"}"#));

        let messages: Vec<_> = ctx.failures().iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("'missing_field' does not exist"));
        assert_eq!(messages[1], r#"field 'name' equals "y": expected "y", got "x""#);
    }

    #[test]
    fn assertion_not_called_for_missing_field() {
        let case = Case::new("absent", 200).assert_field("gone", |_: &Value| -> AssertionOutcome {
            panic!("must not be called")
        });
        let ctx = run(&case, &response(StatusCode::OK, "{}"));
        assert!(matches!(ctx.failures(), [Failure::MissingField { .. }]));
    }

    #[test]
    fn non_object_body_fails_field_decoding() {
        let case = Case::new("array", 200).assert_field("id", not_empty());
        let ctx = run(&case, &response(StatusCode::OK, "[1]"));
        assert_eq!(
            ctx.failures()[0].to_string(),
            "failed to decode body as JSON object: expected a JSON object, found an array"
        );
    }

    #[test]
    fn panicking_assertion_is_reported() {
        let case = Case::new("boom", 200).assert_field("id", |_: &Value| -> AssertionOutcome {
            panic!("assertion exploded")
        });
        let ctx = run(&case, &response(StatusCode::OK, r#"{"id":1}"#));
        assert_eq!(
            ctx.failures()[0].to_string(),
            "field assertion for 'id' panicked: assertion exploded"
        );
    }
}
