//! Expression evaluation engine
//!
//! The [`Evaluator`] walks a transformed tree and produces a [`Value`]. Node
//! dispatch lives here; operators and named functions are implemented in the
//! [`operators`](crate::operators) modules as further `impl Evaluator` blocks.

use crate::context::{ExpressionData, VariableValue};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::literal::{parse_boolean, parse_date, parse_number};
use dhis2_expr_ast::{Ast, NamedFunction, NodeId, NodeType, NodeValue, ValueType};
use log::{debug, trace};

/// Evaluates the nodes of one tree against one set of data
pub struct Evaluator<'a> {
    pub(crate) ast: &'a Ast,
    pub(crate) data: &'a ExpressionData,
}

impl<'a> Evaluator<'a> {
    pub fn new(ast: &'a Ast, data: &'a ExpressionData) -> Self {
        Self { ast, data }
    }

    /// Evaluate the whole tree
    pub fn evaluate_root(&self) -> EvalResult<Value> {
        self.evaluate(self.ast.root())
    }

    /// Main node evaluation dispatcher
    pub fn evaluate(&self, id: NodeId) -> EvalResult<Value> {
        let node = &self.ast[id];
        trace!("evaluating {:?} '{}'", node.kind(), node.raw_value());
        match node.value() {
            // === Structure ===
            NodeValue::Parentheses | NodeValue::Argument(_) => self.eval_first_child(id),
            NodeValue::Function(function) => self.eval_function(id, *function),
            NodeValue::UnaryOperator(op) => self.eval_unary(id, *op),
            NodeValue::BinaryOperator(op) => self.eval_binary(id, *op),
            NodeValue::Modifier(modifier) => Err(EvalError::unsupported_node(format!(
                "modifier '{modifier}' outside of a data item"
            ))),

            // === References ===
            NodeValue::DataItem(_) => self.eval_data_item(id),
            NodeValue::Variable(_) => self.eval_variable(id),
            NodeValue::NamedValue(name) => Ok(self
                .data
                .named_values
                .get(name)
                .cloned()
                .unwrap_or(Value::Null)),

            // === Literals ===
            NodeValue::Constant => Ok(Value::Null),
            NodeValue::Boolean(b) => Ok(Value::Boolean(*b)),
            NodeValue::Number(n) => Ok(Value::Number(*n)),
            NodeValue::Integer(i) => Ok(Value::Number(f64::from(*i))),
            NodeValue::Date(d) => Ok(Value::Date(*d)),
            NodeValue::Text(s) | NodeValue::Utf8String(s) => Ok(Value::String(s.clone())),
            NodeValue::ReportingRateType(_)
            | NodeValue::ProgramVariable(_)
            | NodeValue::Tag(_)
            | NodeValue::AggregationType(_) => Ok(Value::String(node.raw_value().to_string())),
        }
    }

    fn eval_first_child(&self, id: NodeId) -> EvalResult<Value> {
        match self.ast.child(id, 0) {
            Some(child) => self.evaluate(child),
            None => Ok(Value::Null),
        }
    }

    fn eval_data_item(&self, id: NodeId) -> EvalResult<Value> {
        let item = self.ast.to_data_item(id)?;
        match self.data.data_item_values.get(item) {
            Some(value) => Ok(value.clone()),
            None => {
                debug!("no value for data item {}", item.uid0);
                Ok(Value::Null)
            }
        }
    }

    fn eval_variable(&self, id: NodeId) -> EvalResult<Value> {
        if let Some(variable) = self.ast.to_variable(id)? {
            return Ok(self
                .data
                .program_variable_values
                .get(&variable.variable)
                .cloned()
                .unwrap_or(Value::Null));
        }
        match self.rule_variable(id)? {
            Some(value) => variable_value(value),
            None => Ok(Value::Null),
        }
    }

    /// The data of the program rule variable referenced by a `Variable`
    /// node, or by the `Variable` node inside an argument
    pub(crate) fn rule_variable(&self, id: NodeId) -> EvalResult<Option<&'a VariableValue>> {
        let variable = match self.ast[id].node_type() {
            NodeType::Argument => self.ast.child(id, 0),
            _ => Some(id),
        };
        let name = variable.and_then(|variable| variable_name(self.ast, variable));
        match name {
            Some(name) => Ok(self.data.program_rule_variable_values.get(name)),
            None => Err(EvalError::invalid_operand(
                "program rule variable",
                format!("'{}' is not a variable", self.ast[id].raw_value()),
            )),
        }
    }

    fn eval_function(&self, id: NodeId, function: NamedFunction) -> EvalResult<Value> {
        let args = self.ast[id].children();
        debug!("calling {function} with {} argument(s)", args.len());
        match function {
            // === General ===
            NamedFunction::FirstNonNull => self.eval_first_non_null(args),
            NamedFunction::Greatest => self.eval_extreme(function, args, f64::max),
            NamedFunction::Least => self.eval_extreme(function, args, f64::min),
            NamedFunction::If => self.eval_if(args),
            NamedFunction::IsNull => self.eval_is_null(function, args, true),
            NamedFunction::IsNotNull => self.eval_is_null(function, args, false),
            NamedFunction::Log => self.eval_log(args),
            NamedFunction::Log10 => self.eval_log10(args),
            NamedFunction::RemoveZeros => self.eval_remove_zeros(args),
            NamedFunction::SubExpression => self.eval_single(function, args),
            NamedFunction::OrgUnitAncestor
            | NamedFunction::OrgUnitDataSet
            | NamedFunction::OrgUnitGroup
            | NamedFunction::OrgUnitProgram => self.eval_org_unit(function, args),

            // === Aggregation over periods ===
            NamedFunction::Avg
            | NamedFunction::Count
            | NamedFunction::Max
            | NamedFunction::Median
            | NamedFunction::Min
            | NamedFunction::Stddev
            | NamedFunction::StddevPop
            | NamedFunction::StddevSamp
            | NamedFunction::Sum
            | NamedFunction::Variance => self.eval_aggregate(function, args),
            NamedFunction::PercentileCont => self.eval_percentile_cont(args),

            // === Rule engine ===
            NamedFunction::D2AddDays => self.eval_d2_add_days(args),
            NamedFunction::D2Ceil => self.eval_d2_rounding(function, args, f64::ceil),
            NamedFunction::D2Floor => self.eval_d2_rounding(function, args, f64::floor),
            NamedFunction::D2Round => self.eval_d2_round(args),
            NamedFunction::D2Concatenate => self.eval_d2_concatenate(args),
            NamedFunction::D2Count => self.eval_d2_count(args),
            NamedFunction::D2HasValue => self.eval_d2_has_value(args),
            NamedFunction::D2DaysBetween
            | NamedFunction::D2WeeksBetween
            | NamedFunction::D2MonthsBetween
            | NamedFunction::D2YearsBetween => self.eval_d2_between(function, args),
            NamedFunction::D2Left | NamedFunction::D2Right => self.eval_d2_left_right(function, args),
            NamedFunction::D2Substring => self.eval_d2_substring(args),
            NamedFunction::D2Length => self.eval_d2_length(args),
            NamedFunction::D2Modulus => self.eval_d2_modulus(args),
            NamedFunction::D2Oizp => self.eval_d2_oizp(args),
            NamedFunction::D2Zing => self.eval_d2_zing(args),
            NamedFunction::D2Zpvc => self.eval_d2_zpvc(args),
            NamedFunction::D2ValidatePattern => self.eval_d2_validate_pattern(args),
            NamedFunction::D2ZScoreWfa | NamedFunction::D2ZScoreHfa | NamedFunction::D2ZScoreWfh => {
                self.eval_d2_z_score(function, args)
            }
        }
    }

    /// Check the argument count of a function call
    pub(crate) fn expect_args(
        &self,
        function: NamedFunction,
        args: &[NodeId],
        min: usize,
        max: Option<usize>,
    ) -> EvalResult<()> {
        let count = args.len();
        if count >= min && max.is_none_or(|max| count <= max) {
            return Ok(());
        }
        let expected = match max {
            Some(max) if max == min => min.to_string(),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        Err(EvalError::argument_count(function.symbol(), expected, count))
    }

    /// Evaluate every argument in order
    pub(crate) fn eval_args(&self, args: &[NodeId]) -> EvalResult<Vec<Value>> {
        args.iter().map(|&arg| self.evaluate(arg)).collect()
    }

    /// Evaluate the argument of a one-argument function
    pub(crate) fn eval_single(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(function, args, 1, Some(1))?;
        self.evaluate(args[0])
    }
}

/// The name of the program rule variable a `Variable` node refers to
pub(crate) fn variable_name(ast: &Ast, id: NodeId) -> Option<&str> {
    match ast[id].value() {
        NodeValue::Variable(variable_type) if variable_type.is_program_rule() => {
            let name = &ast[ast.child(id, 0)?];
            Some(name.value().as_str().unwrap_or(name.raw_value()))
        }
        _ => None,
    }
}

/// Interpret the text value of a program rule variable per its type
fn variable_value(variable: &VariableValue) -> EvalResult<Value> {
    let Some(raw) = variable.value.as_deref() else {
        return Ok(Value::Null);
    };
    Ok(match variable.value_type {
        ValueType::Number => Value::Number(parse_number(raw)?),
        ValueType::Boolean => Value::Boolean(parse_boolean(raw)?),
        ValueType::Date => Value::Date(parse_date(raw)?),
        ValueType::String | ValueType::Mixed | ValueType::Same => Value::String(raw.to_string()),
    })
}

/// Numeric operand, with booleans counting as 1 and 0
pub(crate) fn to_number(operator: &str, value: &Value) -> EvalResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(Some(*n)),
        Value::Boolean(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        other => Err(EvalError::invalid_operand(
            operator,
            format!("expected a number, found {}", other.type_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_value_follows_type() {
        let date = VariableValue::new(ValueType::Date, "2020-01-31");
        assert_eq!(
            variable_value(&date),
            Ok(Value::Date(parse_date("2020-01-31").unwrap()))
        );
        let text = VariableValue::new(ValueType::String, "12");
        assert_eq!(variable_value(&text), Ok(Value::from("12")));
        let bad = VariableValue::new(ValueType::Number, "twelve");
        assert!(matches!(variable_value(&bad), Err(EvalError::Expr(_))));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number("+", &Value::Boolean(true)), Ok(Some(1.0)));
        assert_eq!(to_number("+", &Value::Null), Ok(None));
        assert!(to_number("+", &Value::from("1")).is_err());
    }
}
