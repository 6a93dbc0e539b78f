//! Comparison operators
//!
//! Implements: `<`, `>`, `<=`, `>=`, `==`, `!=`.
//! Operands of the same type compare by value, a null operand yields null.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::BinaryOperator;
use std::cmp::Ordering;

/// Apply a comparison operator to two values
pub fn compare(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Null, _) | (_, Value::Null) => return Ok(Value::Null),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        _ => {
            return Err(EvalError::type_mismatch(
                left.type_name(),
                right.type_name(),
            ));
        }
    };
    let Some(ordering) = ordering else {
        return Ok(Value::Null);
    };
    let result = match op {
        BinaryOperator::Lt => ordering == Ordering::Less,
        BinaryOperator::Gt => ordering == Ordering::Greater,
        BinaryOperator::Le => ordering != Ordering::Greater,
        BinaryOperator::Ge => ordering != Ordering::Less,
        BinaryOperator::Eq => ordering == Ordering::Equal,
        BinaryOperator::Neq => ordering != Ordering::Equal,
        other => {
            return Err(EvalError::invalid_operand(
                other.symbol(),
                "not a comparison operator",
            ));
        }
    };
    Ok(Value::Boolean(result))
}
