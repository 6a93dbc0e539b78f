//! Arithmetic and Comparison Operator Tests
//!
//! Tests for: +, -, *, /, %, ^, unary -, <, >, <=, >=, ==, !=

use super::{evaluate, evaluate_with};
use dhis2_expr_ast::AstBuilder;
use dhis2_expr_eval::{EvalError, ExpressionData, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn binary<'a>(op: &'a str, left: &'a str, right: &'a str) -> impl FnOnce(&mut AstBuilder) + 'a {
    move |b| {
        b.start_binary(op).number(left).number(right).finish_node();
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

#[rstest]
#[case("+", "1", "2", 3.0)]
#[case("-", "1", "2", -1.0)]
#[case("*", "4", "2.5", 10.0)]
#[case("/", "7", "2", 3.5)]
#[case("%", "7", "3", 1.0)]
#[case("^", "2", "3", 8.0)]
fn test_arithmetic(#[case] op: &str, #[case] left: &str, #[case] right: &str, #[case] expected: f64) {
    assert_eq!(evaluate(binary(op, left, right)), Value::Number(expected));
}

#[test]
fn test_nested_arithmetic() {
    // 1 + 2 * 3
    let value = evaluate(|b| {
        b.start_binary("+")
            .number("1")
            .start_binary("*")
            .number("2")
            .number("3")
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::Number(7.0));
}

#[test]
fn test_division_by_zero_is_null() {
    assert_eq!(evaluate(binary("/", "1", "0")), Value::Null);
    assert_eq!(evaluate(binary("%", "1", "0")), Value::Null);
}

#[test]
fn test_null_propagates() {
    let value = evaluate(|b| {
        b.start_binary("*").null().number("2").finish_node();
    });
    assert_eq!(value, Value::Null);
}

#[test]
fn test_unary_minus() {
    let value = evaluate(|b| {
        b.start_unary("-").number("4").finish_node();
    });
    assert_eq!(value, Value::Number(-4.0));
}

#[test]
fn test_integer_literals_are_numbers() {
    let value = evaluate(|b| {
        b.start_binary("+").integer("2").number("0.5").finish_node();
    });
    assert_eq!(value, Value::Number(2.5));
}

#[test]
fn test_string_operand_is_rejected() {
    let result = evaluate_with(&ExpressionData::new(), |b| {
        b.start_binary("+").string("a").number("1").finish_node();
    });
    assert!(matches!(result, Err(EvalError::InvalidOperand { .. })));
}

// ============================================================================
// Comparison
// ============================================================================

#[rstest]
#[case("<", "1", "2", true)]
#[case(">", "1", "2", false)]
#[case("<=", "2", "2", true)]
#[case(">=", "1", "2", false)]
#[case("==", "2", "2.0", true)]
#[case("!=", "2", "2", false)]
fn test_comparison(#[case] op: &str, #[case] left: &str, #[case] right: &str, #[case] expected: bool) {
    assert_eq!(evaluate(binary(op, left, right)), Value::Boolean(expected));
}

#[test]
fn test_string_comparison() {
    let value = evaluate(|b| {
        b.start_binary("<").string("abc").string("abd").finish_node();
    });
    assert_eq!(value, Value::Boolean(true));
}

#[test]
fn test_date_comparison() {
    let value = evaluate(|b| {
        b.start_binary(">").date("2021-01-01").date("2020-12-31").finish_node();
    });
    assert_eq!(value, Value::Boolean(true));
}

#[test]
fn test_comparison_with_null() {
    let value = evaluate(|b| {
        b.start_binary("==").null().number("1").finish_node();
    });
    assert_eq!(value, Value::Null);
}

#[test]
fn test_comparison_type_mismatch() {
    let result = evaluate_with(&ExpressionData::new(), |b| {
        b.start_binary("==").string("1").number("1").finish_node();
    });
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}
