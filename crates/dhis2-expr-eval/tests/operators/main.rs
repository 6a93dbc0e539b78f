//! Operator integration tests for expression evaluation
//!
//! These tests verify operator and function behavior including:
//! - Correct computation for the supported value types
//! - Null propagation
//! - Three-valued logic for logical operators
//! - Element-wise arithmetic over period series

mod aggregate;
mod arithmetic;
mod general;
mod logical;
mod rule_engine;

use dhis2_expr_ast::AstBuilder;
use dhis2_expr_eval::{EvalResult, Expression, ExpressionData, Value};

// ============================================================================
// Test Helpers
// ============================================================================

/// A prepared expression built under the root node
pub fn expression(build: impl FnOnce(&mut AstBuilder)) -> Expression {
    let mut builder = AstBuilder::new();
    build(&mut builder);
    Expression::new(builder.build().unwrap())
}

pub fn evaluate_with(data: &ExpressionData, build: impl FnOnce(&mut AstBuilder)) -> EvalResult<Value> {
    expression(build).evaluate(data)
}

pub fn evaluate(build: impl FnOnce(&mut AstBuilder)) -> Value {
    evaluate_with(&ExpressionData::new(), build).unwrap()
}

/// An argument built by a closure
pub type Arg<'a> = &'a dyn Fn(&mut AstBuilder);

/// `name(args...)`
pub fn call(builder: &mut AstBuilder, name: &str, args: &[Arg<'_>]) {
    builder.start_function(name);
    for (index, arg) in args.iter().enumerate() {
        builder.start_argument(index);
        arg(builder);
        builder.finish_node();
    }
    builder.finish_node();
}

/// `name(n, ...)` with number literal arguments
pub fn call_numbers(name: &str, numbers: &[&str]) -> Value {
    evaluate(|b| {
        b.start_function(name);
        for (index, number) in numbers.iter().enumerate() {
            b.start_argument(index).number(number).finish_node();
        }
        b.finish_node();
    })
}

/// `name('text', ...)` with string literal arguments
pub fn call_strings(name: &str, strings: &[&str]) -> EvalResult<Value> {
    evaluate_with(&ExpressionData::new(), |b| {
        b.start_function(name);
        for (index, text) in strings.iter().enumerate() {
            b.start_argument(index).string(text).finish_node();
        }
        b.finish_node();
    })
}

pub fn assert_close(value: Value, expected: f64) {
    match value {
        Value::Number(n) => assert!((n - expected).abs() < 1e-9, "{n} != {expected}"),
        other => panic!("expected a number, found {other:?}"),
    }
}
