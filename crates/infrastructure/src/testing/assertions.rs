//! Built-in field assertions.

use apitest_domain::{AssertionOutcome, ComparisonOperator, FieldAssertion};
use regex::Regex;
use serde_json::{Number, Value};

/// Passes when the field equals the expected value.
///
/// Numbers compare numerically, so `5` equals `5.0`; everything else
/// compares structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct Equals(Value);

/// Builds an [`Equals`] assertion.
#[must_use]
pub fn equals(expected: impl Into<Value>) -> Equals {
    Equals(expected.into())
}

impl FieldAssertion for Equals {
    fn assert(&self, value: &Value) -> AssertionOutcome {
        AssertionOutcome::check(values_equal(&self.0, value), || {
            format!("expected {}, got {value}", self.0)
        })
    }

    fn description(&self) -> String {
        format!("equals {}", self.0)
    }
}

/// Passes unless the field is null, `""`, `false`, `0`, `[]` or `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEmpty;

/// Builds a [`NotEmpty`] assertion.
#[must_use]
pub const fn not_empty() -> NotEmpty {
    NotEmpty
}

impl FieldAssertion for NotEmpty {
    fn assert(&self, value: &Value) -> AssertionOutcome {
        AssertionOutcome::check(!is_empty_value(value), || {
            format!("should not be empty, but was {value}")
        })
    }

    fn description(&self) -> String {
        "is not empty".to_string()
    }
}

/// Passes when `field <operator> value` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    operator: ComparisonOperator,
    value: Value,
}

/// Builds a [`Compare`] assertion.
#[must_use]
pub fn compare(operator: ComparisonOperator, value: impl Into<Value>) -> Compare {
    Compare {
        operator,
        value: value.into(),
    }
}

impl FieldAssertion for Compare {
    fn assert(&self, value: &Value) -> AssertionOutcome {
        match compare_json_values(value, self.operator, &self.value) {
            Ok(true) => AssertionOutcome::Pass,
            Ok(false) => AssertionOutcome::fail(format!(
                "comparison failed: {value} {} {}",
                self.operator, self.value
            )),
            Err(reason) => AssertionOutcome::Fail(reason),
        }
    }

    fn description(&self) -> String {
        format!("{} {}", self.operator, self.value)
    }
}

fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => expected == actual,
    }
}

// Integers compare exactly; a float on either side compares as f64.
#[allow(clippy::float_cmp)]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if !(a.is_f64() || b.is_f64()) {
        return false;
    }
    matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Compare two JSON values using the given operator.
fn compare_json_values(
    actual: &Value,
    operator: ComparisonOperator,
    expected: &Value,
) -> Result<bool, String> {
    let ok = match operator {
        ComparisonOperator::Equals => values_equal(expected, actual),
        ComparisonOperator::NotEquals => !values_equal(expected, actual),
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b)?,
        ComparisonOperator::GreaterThanOrEqual => {
            compare_numeric(actual, expected, |a, b| a >= b)?
        }
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b)?,
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b)?,
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(arr), _) => arr.iter().any(|v| values_equal(expected, v)),
            (Value::Object(map), Value::String(key)) => map.contains_key(key),
            _ => false,
        },
        ComparisonOperator::Matches => match (actual, expected) {
            (Value::String(s), Value::String(pattern)) => Regex::new(pattern)
                .map_err(|e| format!("invalid regex pattern '{pattern}': {e}"))?
                .is_match(s),
            _ => false,
        },
    };
    Ok(ok)
}

/// Compare numeric values.
fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> Result<bool, String>
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => Ok(cmp(a, b)),
        _ => Err(format!("cannot compare {actual} and {expected} numerically")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn equals_compares_numbers_numerically() {
        assert!(equals(5).assert(&json!(5.0)).is_pass());
        assert!(
            equals(json!([1, {"a": 2}]))
                .assert(&json!([1.0, {"a": 2}]))
                .is_pass()
        );
        assert_eq!(
            equals("x").assert(&json!("y")),
            AssertionOutcome::fail(r#"expected "x", got "y""#)
        );
        assert!(!equals(1).assert(&json!("1")).is_pass());
    }

    #[test]
    fn equals_is_exact_for_large_integers_and_tiny_floats() {
        assert!(
            !equals(9_007_199_254_740_993_u64)
                .assert(&json!(9_007_199_254_740_992_u64))
                .is_pass()
        );
        assert!(equals(u64::MAX).assert(&json!(u64::MAX)).is_pass());
        assert!(!equals(-1).assert(&json!(u64::MAX)).is_pass());
        assert!(!equals(1e-17).assert(&json!(2e-17)).is_pass());
        assert!(equals(0.1).assert(&json!(0.1)).is_pass());
    }

    #[test]
    fn not_empty_follows_zero_values() {
        let empties = [json!(null), json!(""), json!(false), json!(0), json!([]), json!({})];
        for empty in empties {
            assert!(!not_empty().assert(&empty).is_pass(), "{empty} should be empty");
        }
        let full = [json!("abc"), json!(true), json!(-1), json!([0]), json!({"a": null})];
        for value in full {
            assert!(not_empty().assert(&value).is_pass(), "{value} should not be empty");
        }
    }

    #[test]
    fn compare_operators() {
        use ComparisonOperator::{Contains, GreaterThan, LessThan, Matches};

        assert!(compare(GreaterThan, 5).assert(&json!(10)).is_pass());
        assert!(!compare(LessThan, 5).assert(&json!(10)).is_pass());
        assert!(
            compare(Contains, "found")
                .assert(&json!("not found: widget"))
                .is_pass()
        );
        assert!(compare(Contains, 2).assert(&json!([1, 2, 3])).is_pass());
        assert!(compare(Contains, "id").assert(&json!({"id": 1})).is_pass());
        assert!(
            compare(Matches, r"^[a-f0-9]{3}$")
                .assert(&json!("abc"))
                .is_pass()
        );
    }

    #[test]
    fn compare_reports_unusable_operands() {
        assert_eq!(
            compare(ComparisonOperator::GreaterThan, 1).assert(&json!("a")),
            AssertionOutcome::fail(r#"cannot compare "a" and 1 numerically"#)
        );
        let outcome = compare(ComparisonOperator::Matches, "(").assert(&json!("a"));
        assert!(matches!(
            outcome,
            AssertionOutcome::Fail(ref m) if m.starts_with("invalid regex pattern '('")
        ));
    }

    #[test]
    fn descriptions() {
        assert_eq!(equals("x").description(), r#"equals "x""#);
        assert_eq!(not_empty().description(), "is not empty");
        assert_eq!(
            compare(ComparisonOperator::LessThanOrEqual, 3).description(),
            "<= 3"
        );
    }
}
