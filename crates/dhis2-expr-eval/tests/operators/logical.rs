//! Logical Operator Tests
//!
//! Tests for: and, or, not with three-valued logic

use super::evaluate;
use dhis2_expr_ast::AstBuilder;
use dhis2_expr_eval::Value;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn operand(builder: &mut AstBuilder, value: Option<bool>) {
    match value {
        Some(b) => builder.boolean(if b { "true" } else { "false" }),
        None => builder.null(),
    };
}

fn logical(op: &str, left: Option<bool>, right: Option<bool>) -> Value {
    evaluate(|b| {
        b.start_binary(op);
        operand(b, left);
        operand(b, right);
        b.finish_node();
    })
}

fn expected(value: Option<bool>) -> Value {
    value.into()
}

// ============================================================================
// And / Or Truth Table
// ============================================================================

#[rstest]
#[case(Some(true), Some(true), Some(true), Some(true))]
#[case(Some(true), Some(false), Some(false), Some(true))]
#[case(Some(false), Some(false), Some(false), Some(false))]
#[case(Some(true), None, None, Some(true))]
#[case(None, Some(true), None, Some(true))]
#[case(Some(false), None, Some(false), None)]
#[case(None, Some(false), Some(false), None)]
#[case(None, None, None, None)]
fn test_truth_table(
    #[case] left: Option<bool>,
    #[case] right: Option<bool>,
    #[case] and: Option<bool>,
    #[case] or: Option<bool>,
) {
    assert_eq!(logical("&&", left, right), expected(and));
    assert_eq!(logical("and", left, right), expected(and));
    assert_eq!(logical("||", left, right), expected(or));
    assert_eq!(logical("or", left, right), expected(or));
}

#[test]
fn test_short_circuit_skips_invalid_right_operand() {
    // false && ('a' + 1) never evaluates the right side
    let value = evaluate(|b| {
        b.start_binary("&&")
            .boolean("false")
            .start_binary("+")
            .string("a")
            .number("1")
            .finish_node()
            .finish_node();
    });
    assert_eq!(value, Value::Boolean(false));
}

// ============================================================================
// Not
// ============================================================================

#[rstest]
#[case("!", Some(true), Some(false))]
#[case("not", Some(false), Some(true))]
#[case("!", None, None)]
fn test_not(#[case] op: &str, #[case] value: Option<bool>, #[case] result: Option<bool>) {
    let actual = evaluate(|b| {
        b.start_unary(op);
        operand(b, value);
        b.finish_node();
    });
    assert_eq!(actual, expected(result));
}
