//! Arithmetic operators
//!
//! Implements: `+`, `-`, `*`, `/`, `%`, `^` and unary `+`/`-`.
//! A null operand yields null. Period series combine element-wise with each
//! other and with scalars; positions without a defined result hold `NaN`.

use crate::engine::{Evaluator, to_number};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::{BinaryOperator, NodeId, UnaryOperator};

impl Evaluator<'_> {
    /// Evaluate a unary operator
    pub(crate) fn eval_unary(&self, id: NodeId, op: UnaryOperator) -> EvalResult<Value> {
        let operand = match self.ast.child(id, 0) {
            Some(child) => self.evaluate(child)?,
            None => return Err(EvalError::invalid_operand(op.symbol(), "missing operand")),
        };
        match op {
            UnaryOperator::Not | UnaryOperator::NotWord => Self::eval_not(operand),
            UnaryOperator::Plus => match operand {
                Value::Numbers(_) => Ok(operand),
                other => Ok(to_number(op.symbol(), &other)?.into()),
            },
            UnaryOperator::Minus => match operand {
                Value::Numbers(values) => Ok(Value::Numbers(values.into_iter().map(|n| -n).collect())),
                other => Ok(to_number(op.symbol(), &other)?.map(|n| -n).into()),
            },
        }
    }

    /// Evaluate a binary operator
    pub(crate) fn eval_binary(&self, id: NodeId, op: BinaryOperator) -> EvalResult<Value> {
        if op.is_logical() {
            return self.eval_logical(id, op);
        }
        let (left, right) = self.eval_binary_operands(id, op)?;
        if op.is_arithmetic() {
            arithmetic(op, &left, &right)
        } else {
            super::compare(op, &left, &right)
        }
    }

    pub(crate) fn eval_binary_operands(
        &self,
        id: NodeId,
        op: BinaryOperator,
    ) -> EvalResult<(Value, Value)> {
        match (self.ast.child(id, 0), self.ast.child(id, 1)) {
            (Some(left), Some(right)) => Ok((self.evaluate(left)?, self.evaluate(right)?)),
            _ => Err(EvalError::invalid_operand(op.symbol(), "expected two operands")),
        }
    }
}

/// Apply an arithmetic operator to two values
pub fn arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let apply = |a: f64, b: f64| apply_number(op, a, b);
    match (left, right) {
        (Value::Numbers(a), Value::Numbers(b)) => {
            if a.len() != b.len() {
                return Err(EvalError::invalid_operand(
                    op.symbol(),
                    format!("series of length {} and {} differ", a.len(), b.len()),
                ));
            }
            Ok(Value::Numbers(
                a.iter()
                    .zip(b)
                    .map(|(&a, &b)| apply(a, b).unwrap_or(f64::NAN))
                    .collect(),
            ))
        }
        (Value::Numbers(series), scalar) => match to_number(op.symbol(), scalar)? {
            Some(b) => Ok(Value::Numbers(
                series.iter().map(|&a| apply(a, b).unwrap_or(f64::NAN)).collect(),
            )),
            None => Ok(Value::Null),
        },
        (scalar, Value::Numbers(series)) => match to_number(op.symbol(), scalar)? {
            Some(a) => Ok(Value::Numbers(
                series.iter().map(|&b| apply(a, b).unwrap_or(f64::NAN)).collect(),
            )),
            None => Ok(Value::Null),
        },
        _ => {
            let (a, b) = (to_number(op.symbol(), left)?, to_number(op.symbol(), right)?);
            Ok(a.zip(b).and_then(|(a, b)| apply(a, b)).into())
        }
    }
}

/// `None` where the operation is undefined, such as division by zero
fn apply_number(op: BinaryOperator, a: f64, b: f64) -> Option<f64> {
    match op {
        BinaryOperator::Add => Some(a + b),
        BinaryOperator::Sub => Some(a - b),
        BinaryOperator::Mul => Some(a * b),
        BinaryOperator::Div => (b != 0.0).then(|| a / b),
        BinaryOperator::Mod => (b != 0.0).then(|| a % b),
        BinaryOperator::Exp => Some(a.powf(b)).filter(|n| n.is_finite()),
        _ => None,
    }
}
