//! Logical operators
//!
//! Implements: `&&`/`and`, `||`/`or`, `!`/`not` with three-valued logic.

use crate::engine::Evaluator;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::{BinaryOperator, NodeId};

impl Evaluator<'_> {
    /// Evaluate `and`/`or`
    ///
    /// Truth table:
    /// | A     | B     | A and B | A or B |
    /// |-------|-------|---------|--------|
    /// | true  | null  | null    | true   |
    /// | false | null  | false   | null   |
    /// | null  | null  | null    | null   |
    ///
    /// The right operand is not evaluated when the left one decides.
    pub(crate) fn eval_logical(&self, id: NodeId, op: BinaryOperator) -> EvalResult<Value> {
        let (Some(left), Some(right)) = (self.ast.child(id, 0), self.ast.child(id, 1)) else {
            return Err(EvalError::invalid_operand(op.symbol(), "expected two operands"));
        };
        let is_and = matches!(op, BinaryOperator::And | BinaryOperator::AndWord);
        // false decides `and`, true decides `or`
        let decisive = !is_and;

        let left = as_logical(op, self.evaluate(left)?)?;
        if left == Some(decisive) {
            return Ok(Value::Boolean(decisive));
        }
        let right = as_logical(op, self.evaluate(right)?)?;
        Ok(match (left, right) {
            (_, Some(b)) if b == decisive => Value::Boolean(decisive),
            (Some(_), Some(_)) => Value::Boolean(!decisive),
            _ => Value::Null,
        })
    }

    /// Evaluate `not`
    pub(crate) fn eval_not(operand: Value) -> EvalResult<Value> {
        match operand {
            Value::Null => Ok(Value::Null),
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(EvalError::type_mismatch("Boolean", other.type_name())),
        }
    }
}

fn as_logical(op: BinaryOperator, value: Value) -> EvalResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Boolean(b) => Ok(Some(b)),
        other => Err(EvalError::invalid_operand(
            op.symbol(),
            format!("expected a boolean, found {}", other.type_name()),
        )),
    }
}
