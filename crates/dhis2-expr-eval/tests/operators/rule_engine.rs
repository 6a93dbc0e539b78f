//! Rule Engine Function Tests
//!
//! Tests for the `d2:*` functions: dates, rounding, text, program rule
//! variables, numeric helpers and growth z-scores

use super::{call_numbers, call_strings, evaluate, evaluate_with};
use chrono::NaiveDate;
use dhis2_expr_ast::{AstBuilder, ValueType};
use dhis2_expr_eval::{EvalError, ExpressionData, Value, VariableValue};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(raw: &str) -> Value {
    Value::Date(NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap())
}

/// `function('text', n, ...)`
fn text_and_numbers<'a>(
    function: &'a str,
    text: &'a str,
    numbers: &'a [&'a str],
) -> impl FnOnce(&mut AstBuilder) + 'a {
    move |b| {
        b.start_function(function)
            .start_argument(0)
            .string(text)
            .finish_node();
        for (index, number) in numbers.iter().enumerate() {
            b.start_argument(index + 1).number(number).finish_node();
        }
        b.finish_node();
    }
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_add_days() {
    let value = evaluate(text_and_numbers("d2:addDays", "2020-02-27", &["3"]));
    assert_eq!(value, date("2020-03-01"));
}

#[test]
fn test_add_days_to_date_literal() {
    let value = evaluate(|b| {
        b.start_function("d2:addDays")
            .start_argument(0)
            .date("2021-01-10")
            .finish_node()
            .start_argument(1)
            .number("-10")
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, date("2020-12-31"));
}

#[rstest]
#[case("1e18")]
#[case("-1e18")]
#[case("1e300")]
#[case("100000000")]
fn test_add_days_out_of_range_is_null(#[case] days: &str) {
    let value = evaluate(text_and_numbers("d2:addDays", "2020-01-01", &[days]));
    assert_eq!(value, Value::Null);
}

#[rstest]
#[case("d2:daysBetween", "2020-01-01", "2020-01-31", 30.0)]
#[case("d2:weeksBetween", "2020-01-01", "2020-01-31", 4.0)]
#[case("d2:monthsBetween", "2020-01-15", "2020-03-15", 2.0)]
#[case("d2:monthsBetween", "2020-01-15", "2020-03-14", 1.0)]
#[case("d2:yearsBetween", "2018-05-01", "2020-04-30", 1.0)]
#[case("d2:yearsBetween", "2018-05-01", "2020-05-01", 2.0)]
#[case("d2:daysBetween", "2020-01-31", "2020-01-01", -30.0)]
fn test_between(
    #[case] function: &str,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: f64,
) {
    assert_eq!(call_strings(function, &[start, end]), Ok(Value::Number(expected)));
}

#[test]
fn test_invalid_date_text() {
    let result = call_strings("d2:daysBetween", &["2020-13-01", "2020-01-01"]);
    assert!(matches!(result, Err(EvalError::Expr(_))));
}

// ============================================================================
// Rounding
// ============================================================================

#[rstest]
#[case("d2:ceil", &["1.2"], 2.0)]
#[case("d2:floor", &["1.8"], 1.0)]
#[case("d2:floor", &["-1.2"], -2.0)]
#[case("d2:round", &["2.5"], 3.0)]
#[case("d2:round", &["-2.5"], -3.0)]
#[case("d2:round", &["1.2345", "2"], 1.23)]
fn test_rounding(#[case] function: &str, #[case] args: &[&str], #[case] expected: f64) {
    assert_eq!(call_numbers(function, args), Value::Number(expected));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_concatenate_skips_nulls() {
    let value = evaluate(|b| {
        b.start_function("d2:concatenate")
            .start_argument(0)
            .string("a")
            .finish_node()
            .start_argument(1)
            .null()
            .finish_node()
            .start_argument(2)
            .number("1")
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::from("a1"));
}

#[rstest]
#[case("d2:left", "hello", &["2"], "he")]
#[case("d2:left", "hi", &["10"], "hi")]
#[case("d2:right", "hello", &["3"], "llo")]
#[case("d2:right", "hello", &["-1"], "")]
#[case("d2:substring", "hello", &["1", "3"], "el")]
#[case("d2:substring", "hello", &["3", "1"], "")]
#[case("d2:substring", "héllo", &["1", "2"], "é")]
fn test_text_slices(
    #[case] function: &str,
    #[case] text: &str,
    #[case] numbers: &[&str],
    #[case] expected: &str,
) {
    let value = evaluate(text_and_numbers(function, text, numbers));
    assert_eq!(value, Value::from(expected));
}

#[test]
fn test_length_counts_characters() {
    assert_eq!(call_strings("d2:length", &["héllo"]), Ok(Value::Number(5.0)));
}

#[rstest]
#[case("123", "[0-9]+", true)]
#[case("a123", "[0-9]+", false)]
#[case("ab", "a|ab", true)]
fn test_validate_pattern(#[case] text: &str, #[case] pattern: &str, #[case] expected: bool) {
    assert_eq!(
        call_strings("d2:validatePattern", &[text, pattern]),
        Ok(Value::Boolean(expected))
    );
}

#[test]
fn test_validate_pattern_invalid_regex() {
    let result = call_strings("d2:validatePattern", &["a", "("]);
    assert_eq!(result, Err(EvalError::invalid_regex("(")));
}

// ============================================================================
// Program Rule Variables
// ============================================================================

fn rule_data() -> ExpressionData {
    ExpressionData::new()
        .with_program_rule_variable(
            "visits",
            VariableValue::new(ValueType::Number, "3").with_candidates(vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
            ]),
        )
        .with_program_rule_variable("empty", VariableValue::empty(ValueType::String))
}

#[rstest]
#[case("d2:count", "visits", Value::Number(3.0))]
#[case("d2:count", "empty", Value::Number(0.0))]
#[case("d2:count", "unknown", Value::Number(0.0))]
#[case("d2:hasValue", "visits", Value::Boolean(true))]
#[case("d2:hasValue", "empty", Value::Boolean(false))]
#[case("d2:hasValue", "unknown", Value::Boolean(false))]
fn test_variable_functions(#[case] function: &str, #[case] name: &str, #[case] expected: Value) {
    // function(#{name})
    let hash = evaluate_with(&rule_data(), |b| {
        b.start_function(function)
            .start_argument(0)
            .rule_variable("#", name)
            .finish_node()
            .finish_node();
    });
    assert_eq!(hash, Ok(expected.clone()));

    // function('name')
    let quoted = evaluate_with(&rule_data(), |b| {
        b.start_function(function)
            .start_argument(0)
            .start_variable("")
            .string(name)
            .finish_node()
            .finish_node()
            .finish_node();
    });
    assert_eq!(quoted, Ok(expected));
}

#[test]
fn test_count_requires_a_variable() {
    let result = evaluate_with(&rule_data(), |b| {
        b.start_function("d2:count")
            .start_argument(0)
            .number("1")
            .finish_node()
            .finish_node();
    });
    assert!(matches!(result, Err(EvalError::InvalidOperand { .. })));
}

// ============================================================================
// Numeric Helpers
// ============================================================================

#[rstest]
#[case("d2:modulus", &["7", "3"], Value::Number(1.0))]
#[case("d2:modulus", &["1", "0"], Value::Null)]
#[case("d2:oizp", &["-1"], Value::Number(0.0))]
#[case("d2:oizp", &["0"], Value::Number(1.0))]
#[case("d2:zing", &["-3"], Value::Number(0.0))]
#[case("d2:zing", &["2"], Value::Number(2.0))]
#[case("d2:zpvc", &["1", "-1", "0"], Value::Number(2.0))]
fn test_numeric_helpers(#[case] function: &str, #[case] args: &[&str], #[case] expected: Value) {
    assert_eq!(call_numbers(function, args), expected);
}

#[test]
fn test_oizp_of_null_is_zero() {
    let value = evaluate(|b| {
        b.start_function("d2:oizp")
            .start_argument(0)
            .null()
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::Number(0.0));
}

// ============================================================================
// Growth Z-Scores
// ============================================================================

/// `function(parameter, measurement, 'gender')`
fn z_score(function: &str, parameter: &str, measurement: &str, gender: &str) -> Value {
    evaluate(|b| {
        b.start_function(function)
            .start_argument(0)
            .number(parameter)
            .finish_node()
            .start_argument(1)
            .number(measurement)
            .finish_node()
            .start_argument(2)
            .string(gender)
            .finish_node()
            .finish_node();
    })
}

#[rstest]
#[case("d2:zScoreHFA", "12", "75.7", "male", Value::Number(0.0))]
#[case("d2:zScoreHFA", "12", "72.2", "M", Value::Number(-1.5))]
#[case("d2:zScoreWFA", "6", "7.9", "boy", Value::Number(0.0))]
#[case("d2:zScoreWFA", "6", "7.9", "female", Value::Number(0.67))]
#[case("d2:zScoreWFA", "6", "20", "female", Value::Number(3.5))]
#[case("d2:zScoreWFH", "80.3", "11.7", "female", Value::Number(1.45))]
#[case("d2:zScoreWFA", "28", "12", "male", Value::Null)]
#[case("d2:zScoreWFA", "72", "12", "female", Value::Null)]
fn test_z_scores(
    #[case] function: &str,
    #[case] parameter: &str,
    #[case] measurement: &str,
    #[case] gender: &str,
    #[case] expected: Value,
) {
    assert_eq!(z_score(function, parameter, measurement, gender), expected);
}

#[test]
fn test_z_score_of_null_measurement_is_null() {
    let value = evaluate(|b| {
        b.start_function("d2:zScoreWFA")
            .start_argument(0)
            .number("6")
            .finish_node()
            .start_argument(1)
            .null()
            .finish_node()
            .start_argument(2)
            .string("male")
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::Null);
}
