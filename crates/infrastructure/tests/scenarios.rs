//! End-to-end runs of suites against small in-process handlers.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use apitest_application::{ResponseWriter, respond};
use apitest_domain::{
    AssertionOutcome, Case, CaseStatus, ComparisonOperator, DecodeTarget, Failure, HttpMethod,
    RequestSpec, RunnerSettings, StatusCode,
};
use apitest_infrastructure::init_test_tracing;
use apitest_infrastructure::testing::{Suite, compare, equals, not_empty};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn create_widget(w: &mut dyn ResponseWriter, _r: &RequestSpec) {
    respond::write_json(w, StatusCode::CREATED, &json!({"id": "abc", "name": "x"}));
}

fn missing_widget(w: &mut dyn ResponseWriter, _r: &RequestSpec) {
    respond::write_error(w, StatusCode::NOT_FOUND, "not found: widget");
}

fn plain_ok(w: &mut dyn ResponseWriter, _r: &RequestSpec) {
    w.write_header(StatusCode::OK);
    w.write(b"ok");
}

#[test]
fn field_assertions_pass_for_created_widget() {
    init_test_tracing();
    let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget).unwrap();

    let report = suite.assert_handler_tests(&[
        Case::new("creates widget", 201)
            .content(r#"{"name":"x"}"#)
            .assert_field("id", not_empty())
            .assert_field("name", equals("x")),
    ]);

    assert_eq!(report.passed, 1);
    assert_eq!(report.cases[0].checks, 3);
}

#[test]
fn error_shape_with_message_substring_passes() {
    init_test_tracing();
    let suite = Suite::new(HttpMethod::Get, "/widgets/42", missing_widget).unwrap();

    suite.assert_handler_tests(&[
        Case::new("missing widget", 404)
            .expect_error()
            .expect_error_message("not found"),
    ]);
}

#[test]
fn unaccepted_status_and_status_check_both_fail() {
    init_test_tracing();
    let suite = Suite::new(HttpMethod::Post, "/widgets", plain_ok).unwrap();

    let report = suite.run_handler_tests(&[Case::new("expects created", 201)]);
    let case = &report.cases[0];

    assert_eq!(case.status, CaseStatus::Failed);
    assert_eq!(case.failures.len(), 2);
    assert!(
        case.failures[0]
            .to_string()
            .contains("resulted in an unacceptable 200 status:\nok")
    );
    assert_eq!(case.failures[1].to_string(), "status code: expected 201, got 200");
}

#[test]
fn missing_field_is_reported_and_siblings_still_checked() {
    init_test_tracing();
    let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget).unwrap();

    let report = suite.run_handler_tests(&[
        Case::new("partial", 201)
            .assert_field("id", not_empty())
            .assert_field("missing_field", not_empty())
            .assert_field("name", equals("y")),
    ]);
    let failures = &report.cases[0].failures;

    assert_eq!(failures.len(), 2);
    assert_eq!(
        failures[0],
        Failure::MissingField {
            field: "missing_field".to_string()
        }
    );
    assert!(failures[1].to_string().starts_with("field 'name' equals \"y\""));
}

#[test]
fn empty_expected_body_is_not_checked() {
    init_test_tracing();
    let suite = Suite::new(HttpMethod::Get, "/", plain_ok).unwrap();

    suite.assert_handler_tests(&[
        Case::new("no body expectation", 200),
        Case::new("empty body expectation", 200).expect_body(""),
        Case::new("exact body", 200).expect_body("ok"),
    ]);
}

#[test]
fn harness_with_empty_accepted_set_ignores_status() {
    let suite = Suite::new(HttpMethod::Delete, "/widgets/1", missing_widget).unwrap();

    let invocation = suite.request().send("", &[]);

    assert!(invocation.is_ok());
    assert_eq!(invocation.response.status, StatusCode::NOT_FOUND);
    assert!(invocation.response.is_json());
}

#[test]
fn non_json_error_body_never_passes_message_check() {
    init_test_tracing();
    let bad_request = |w: &mut dyn ResponseWriter, _: &RequestSpec| {
        w.write_header(StatusCode::BAD_REQUEST);
        w.write(b"bad request");
    };
    let suite = Suite::new(HttpMethod::Get, "/", bad_request).unwrap();

    let report = suite.run_handler_tests(&[Case::new("plain text error", 400).expect_error()]);
    let case = &report.cases[0];

    assert_eq!(case.status, CaseStatus::Failed);
    assert!(matches!(
        case.failures.as_slice(),
        [Failure::Decode {
            target: DecodeTarget::ErrorBody,
            ..
        }]
    ));
    assert_eq!(case.checks, 1);
}

#[test]
fn hooks_share_a_fixture_with_the_handler() {
    init_test_tracing();
    let store: Arc<Mutex<BTreeMap<String, String>>> = Arc::new(Mutex::new(BTreeMap::new()));

    let handler = {
        let store = Arc::clone(&store);
        move |w: &mut dyn ResponseWriter, r: &RequestSpec| {
            let id = r.route.query_param("id").unwrap_or_default();
            match store.lock().unwrap().get(&id) {
                Some(name) => {
                    respond::write_json(w, StatusCode::OK, &json!({"id": id, "name": name}));
                }
                None => {
                    let message = format!("widget {id} not found");
                    respond::write_error(w, StatusCode::NOT_FOUND, &message);
                }
            }
        }
    };
    let seed = Arc::clone(&store);
    let reset = Arc::clone(&store);
    let suite = Suite::new(HttpMethod::Get, "/widgets?id=7", handler)
        .unwrap()
        .before_each(move |_| {
            seed.lock().unwrap().insert("7".to_string(), "sprocket".to_string());
        })
        .after_each(move |_| reset.lock().unwrap().clear());

    let report = suite.run_handler_tests(&[
        Case::new("seeded widget is found", 200)
            .assert_field("name", equals("sprocket"))
            .assert_field("id", compare(ComparisonOperator::Matches, r"^\d+$")),
        Case::new("unseeded widget is missing", 404)
            .skip_suite_before()
            .expect_error_message("not found"),
    ]);

    assert!(report.all_passed(), "{report}");
    assert!(store.lock().unwrap().is_empty());
}

#[test]
fn closures_work_as_field_assertions() {
    let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget).unwrap();
    let short = |value: &Value| {
        AssertionOutcome::check(value.as_str().is_some_and(|s| s.len() <= 3), || {
            format!("{value} is longer than 3 characters")
        })
    };

    suite.assert_handler_tests(&[Case::new("short id", 201).assert_field("id", short)]);
}

#[test]
fn running_twice_is_idempotent() {
    let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget).unwrap();
    let cases = [
        Case::new("passes", 201).assert_field("name", equals("x")),
        Case::new("fails", 200).expect_body("nope"),
    ];

    let first = suite.run_handler_tests(&cases);
    let second = suite.run_handler_tests(&cases);

    let outcome = |r: &apitest_domain::SuiteReport| {
        r.cases
            .iter()
            .map(|c| (c.name.clone(), c.status, c.failures.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(outcome(&first), outcome(&second));
    assert_ne!(first.run_id, second.run_id);
}

#[test]
fn stop_on_failure_skips_the_rest() {
    let suite = Suite::new(HttpMethod::Post, "/widgets", create_widget)
        .unwrap()
        .with_settings(RunnerSettings::default().with_stop_on_failure(true));

    let report = suite.run_handler_tests(&[
        Case::new("first", 201),
        Case::new("second fails", 500),
        Case::new("third", 201),
    ]);

    let states: Vec<_> = report.cases.iter().map(|c| c.status).collect();
    assert_eq!(
        states,
        vec![CaseStatus::Passed, CaseStatus::Failed, CaseStatus::Skipped]
    );
}

#[test]
#[should_panic(expected = "1 of 1 cases failed")]
fn assert_handler_tests_panics_on_failure() {
    let suite = Suite::new(HttpMethod::Get, "/", plain_ok).unwrap();
    suite.assert_handler_tests(&[Case::new("wrong", 204)]);
}

#[test]
fn custom_method_reaches_the_handler() {
    init_test_tracing();
    let purge = |w: &mut dyn ResponseWriter, r: &RequestSpec| {
        if r.method.as_str() == "PURGE" {
            w.write_header(StatusCode::NO_CONTENT);
        } else {
            respond::write_error(w, StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        }
    };
    let method: HttpMethod = "PURGE".parse().unwrap();
    let suite = Suite::new(method, "/cache/widgets", purge).unwrap();

    let report = suite.assert_handler_tests(&[Case::new("purges cache", 204)]);
    assert_eq!(report.method.to_string(), "PURGE");
    assert!(report.to_string().starts_with("PURGE /cache/widgets"));
}
