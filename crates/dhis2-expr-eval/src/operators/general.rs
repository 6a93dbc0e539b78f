//! General functions
//!
//! Implements: `firstNonNull`, `greatest`, `least`, `if`, `isNull`,
//! `isNotNull`, `log`, `log10`, `removeZeros` and the `orgUnit.*` checks.

use crate::context::{ORG_UNIT_ANCESTOR, ORG_UNIT_DATASET, ORG_UNIT_GROUP, ORG_UNIT_PROGRAM};
use crate::engine::{Evaluator, to_number};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::{Ast, NamedFunction, NodeId, NodeType};

impl Evaluator<'_> {
    /// The first argument that is not null
    pub(crate) fn eval_first_non_null(&self, args: &[NodeId]) -> EvalResult<Value> {
        for &arg in args {
            let value = self.evaluate(arg)?;
            if !value.is_null() {
                return Ok(value);
            }
        }
        Ok(Value::Null)
    }

    /// `greatest`/`least`: null arguments are ignored, null when all are
    pub(crate) fn eval_extreme(
        &self,
        function: NamedFunction,
        args: &[NodeId],
        pick: fn(f64, f64) -> f64,
    ) -> EvalResult<Value> {
        self.expect_args(function, args, 1, None)?;
        let mut result: Option<f64> = None;
        for value in self.eval_args(args)? {
            if let Some(n) = to_number(function.symbol(), &value)? {
                result = Some(result.map_or(n, |r| pick(r, n)));
            }
        }
        Ok(result.into())
    }

    /// `if(condition, then, else)`, null when the condition is null
    pub(crate) fn eval_if(&self, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(NamedFunction::If, args, 3, Some(3))?;
        match self.evaluate(args[0])? {
            Value::Null => Ok(Value::Null),
            Value::Boolean(true) => self.evaluate(args[1]),
            Value::Boolean(false) => self.evaluate(args[2]),
            other => Err(EvalError::type_mismatch("Boolean", other.type_name())),
        }
    }

    pub(crate) fn eval_is_null(
        &self,
        function: NamedFunction,
        args: &[NodeId],
        expect_null: bool,
    ) -> EvalResult<Value> {
        let value = self.eval_single(function, args)?;
        Ok(Value::Boolean(value.is_null() == expect_null))
    }

    /// Natural logarithm, or logarithm to the base of the second argument
    pub(crate) fn eval_log(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::Log;
        self.expect_args(function, args, 1, Some(2))?;
        let values = self.eval_args(args)?;
        let Some(x) = to_number(function.symbol(), &values[0])? else {
            return Ok(Value::Null);
        };
        match values.get(1) {
            None => Ok(Value::Number(x.ln())),
            Some(base) => Ok(to_number(function.symbol(), base)?
                .map(|base| x.log(base))
                .into()),
        }
    }

    pub(crate) fn eval_log10(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::Log10;
        let value = self.eval_single(function, args)?;
        Ok(to_number(function.symbol(), &value)?.map(f64::log10).into())
    }

    /// Zero becomes null, series drop their zero entries
    pub(crate) fn eval_remove_zeros(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::RemoveZeros;
        match self.eval_single(function, args)? {
            Value::Numbers(values) => Ok(Value::Numbers(
                values
                    .into_iter()
                    .map(|n| if n == 0.0 { f64::NAN } else { n })
                    .collect(),
            )),
            value => Ok(to_number(function.symbol(), &value)?
                .filter(|&n| n != 0.0)
                .into()),
        }
    }

    /// `orgUnit.*`: whether any of the UID arguments matches the
    /// supplementary values of the current organisation unit
    pub(crate) fn eval_org_unit(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(function, args, 1, None)?;
        let uids = argument_uids(self.ast, args);
        let found = match function {
            NamedFunction::OrgUnitAncestor => {
                let path = self
                    .data
                    .supplementary(ORG_UNIT_ANCESTOR)
                    .first()
                    .map(String::as_str)
                    .unwrap_or_default();
                path.split('/').any(|ancestor| uids.contains(&ancestor))
            }
            _ => {
                let key = match function {
                    NamedFunction::OrgUnitDataSet => ORG_UNIT_DATASET,
                    NamedFunction::OrgUnitGroup => ORG_UNIT_GROUP,
                    _ => ORG_UNIT_PROGRAM,
                };
                self.data
                    .supplementary(key)
                    .iter()
                    .any(|uid| uids.contains(&uid.as_str()))
            }
        };
        Ok(Value::Boolean(found))
    }
}

/// The raw UIDs passed as arguments of a function call
pub(crate) fn argument_uids<'a>(ast: &'a Ast, args: &[NodeId]) -> Vec<&'a str> {
    args.iter()
        .flat_map(|&arg| ast.collect(arg, |node| node.node_type() == NodeType::Uid))
        .map(|uid| ast[uid].raw_value())
        .collect()
}
