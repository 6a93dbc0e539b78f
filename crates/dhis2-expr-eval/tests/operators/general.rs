//! General Function Tests
//!
//! Tests for: firstNonNull, greatest, least, if, isNull, isNotNull, log,
//! log10, removeZeros, subExpression and value references

use super::{Arg, assert_close, call, call_numbers, evaluate, evaluate_with};
use dhis2_expr_ast::{AstBuilder, NamedValue, ProgramVariable, ValueType};
use dhis2_expr_eval::{EvalError, ExpressionData, Value, VariableValue};
use pretty_assertions::assert_eq;

fn null(b: &mut AstBuilder) {
    b.null();
}

fn one(b: &mut AstBuilder) {
    b.number("1");
}

fn two(b: &mut AstBuilder) {
    b.number("2");
}

// ============================================================================
// Null Handling
// ============================================================================

#[test]
fn test_first_non_null() {
    let value = evaluate(|b| call(b, "firstNonNull", &[&null, &two, &one]));
    assert_eq!(value, Value::Number(2.0));
    let value = evaluate(|b| call(b, "firstNonNull", &[&null, &null]));
    assert_eq!(value, Value::Null);
}

#[test]
fn test_is_null() {
    assert_eq!(evaluate(|b| call(b, "isNull", &[&null])), Value::Boolean(true));
    assert_eq!(evaluate(|b| call(b, "isNull", &[&one])), Value::Boolean(false));
    assert_eq!(evaluate(|b| call(b, "isNotNull", &[&one])), Value::Boolean(true));
}

#[test]
fn test_wrong_argument_count() {
    let result = evaluate_with(&ExpressionData::new(), |b| call(b, "isNull", &[&one, &two]));
    assert!(matches!(result, Err(EvalError::ArgumentCount { found: 2, .. })));
}

// ============================================================================
// Greatest / Least
// ============================================================================

#[test]
fn test_greatest_and_least_ignore_nulls() {
    let args: [Arg<'_>; 3] = [&one, &null, &two];
    assert_eq!(evaluate(|b| call(b, "greatest", &args)), Value::Number(2.0));
    assert_eq!(evaluate(|b| call(b, "least", &args)), Value::Number(1.0));
    assert_eq!(evaluate(|b| call(b, "least", &[&null])), Value::Null);
}

// ============================================================================
// If
// ============================================================================

#[test]
fn test_if() {
    let yes = |b: &mut AstBuilder| {
        b.boolean("true");
    };
    let no = |b: &mut AstBuilder| {
        b.boolean("false");
    };
    assert_eq!(evaluate(|b| call(b, "if", &[&yes, &one, &two])), Value::Number(1.0));
    assert_eq!(evaluate(|b| call(b, "if", &[&no, &one, &two])), Value::Number(2.0));
    assert_eq!(evaluate(|b| call(b, "if", &[&null, &one, &two])), Value::Null);
}

#[test]
fn test_if_requires_boolean_condition() {
    let result = evaluate_with(&ExpressionData::new(), |b| call(b, "if", &[&one, &one, &two]));
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

// ============================================================================
// Logarithms And Zeros
// ============================================================================

#[test]
fn test_log() {
    assert_close(call_numbers("log", &["1"]), 0.0);
    assert_close(call_numbers("log", &["8", "2"]), 3.0);
    assert_close(call_numbers("log10", &["100"]), 2.0);
}

#[test]
fn test_remove_zeros() {
    assert_eq!(call_numbers("removeZeros", &["0"]), Value::Null);
    assert_eq!(call_numbers("removeZeros", &["4"]), Value::Number(4.0));
}

#[test]
fn test_sub_expression_evaluates_its_argument() {
    let value = evaluate(|b| {
        b.start_function("subExpression")
            .start_argument(0)
            .start_binary("+")
            .number("1")
            .number("2")
            .finish_node()
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::Number(3.0));
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_named_value() {
    let data = ExpressionData::new().with_named_value(NamedValue::Days, 31.0);
    let value = evaluate_with(&data, |b| {
        b.named_value("days");
    });
    assert_eq!(value, Ok(Value::Number(31.0)));
}

#[test]
fn test_program_variable() {
    let data = ExpressionData::new().with_program_variable(ProgramVariable::EventCount, 4.0);
    let value = evaluate_with(&data, |b| {
        b.program_variable("event_count");
    });
    assert_eq!(value, Ok(Value::Number(4.0)));

    let missing = evaluate_with(&ExpressionData::new(), |b| {
        b.program_variable("event_count");
    });
    assert_eq!(missing, Ok(Value::Null));
}

#[test]
fn test_program_rule_variable_is_typed() {
    let data = ExpressionData::new()
        .with_program_rule_variable("weight", VariableValue::new(ValueType::Number, "72.5"))
        .with_program_rule_variable("smoker", VariableValue::new(ValueType::Boolean, "true"))
        .with_program_rule_variable("name", VariableValue::empty(ValueType::String));
    let weight = evaluate_with(&data, |b| {
        b.rule_variable("#", "weight");
    });
    assert_eq!(weight, Ok(Value::Number(72.5)));
    let smoker = evaluate_with(&data, |b| {
        b.rule_variable("A", "smoker");
    });
    assert_eq!(smoker, Ok(Value::Boolean(true)));
    let name = evaluate_with(&data, |b| {
        b.rule_variable("#", "name");
    });
    assert_eq!(name, Ok(Value::Null));
}
