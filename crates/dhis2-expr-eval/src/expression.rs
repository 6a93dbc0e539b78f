//! Parsed expressions ready for inspection and evaluation

use crate::context::ExpressionData;
use crate::describe::Describer;
use crate::engine::{Evaluator, variable_name};
use crate::error::EvalResult;
use crate::operators::general::argument_uids;
use crate::value::Value;
use dhis2_expr_ast::{
    Ast, DataItem, Id, NamedFunction, NodeValue, ProgramVariable, TagGenerator, ValueType,
    propagate_modifiers, supply_sub_expression_tags,
};
use dhis2_expr_diagnostics::Result;
use indexmap::IndexSet;
use log::debug;
use std::collections::HashMap;

/// An expression tree with its modifiers resolved.
///
/// Construction runs the tree passes once: sub-expression tagging first, then
/// modifier propagation. Everything afterwards only reads the tree.
///
/// # Example
///
/// ```
/// use dhis2_expr_ast::AstBuilder;
/// use dhis2_expr_eval::{Expression, ExpressionData, Value};
///
/// let mut builder = AstBuilder::new();
/// builder.start_binary("+").number("1").number("2").finish_node();
/// let expression = Expression::new(builder.build().unwrap());
///
/// let value = expression.evaluate(&ExpressionData::new()).unwrap();
/// assert_eq!(value, Value::Number(3.0));
/// assert_eq!(expression.normalise().unwrap(), "1 + 2");
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    ast: Ast,
}

impl Expression {
    /// Prepare a freshly built tree, tagging sub-expressions with a
    /// generator of its own
    pub fn new(ast: Ast) -> Self {
        Self::with_tags(ast, &mut TagGenerator::new())
    }

    /// Prepare a freshly built tree, drawing sub-expression tags from `tags`
    pub fn with_tags(mut ast: Ast, tags: &mut TagGenerator) -> Self {
        supply_sub_expression_tags(&mut ast, tags);
        propagate_modifiers(&mut ast);
        debug!("prepared expression with {} node(s)", ast.len());
        Self { ast }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The static type of the whole expression
    pub fn value_type(&self) -> ValueType {
        self.ast.value_type(self.ast.root())
    }

    /// Evaluate against `data`
    pub fn evaluate(&self, data: &ExpressionData) -> EvalResult<Value> {
        Evaluator::new(&self.ast, data).evaluate_root()
    }

    /// Names of the program rule variables referenced, in document order
    pub fn collect_program_rule_variable_names(&self) -> IndexSet<String> {
        self.ast
            .descendants(self.ast.root())
            .filter_map(|id| variable_name(&self.ast, id))
            .map(str::to_string)
            .collect()
    }

    /// The program variables referenced, in document order
    pub fn collect_program_variables(&self) -> Result<IndexSet<ProgramVariable>> {
        let mut variables = IndexSet::new();
        for id in self.ast.descendants(self.ast.root()) {
            if !matches!(self.ast[id].value(), NodeValue::Variable(_)) {
                continue;
            }
            if let Some(variable) = self.ast.to_variable(id)? {
                variables.insert(variable.variable);
            }
        }
        Ok(variables)
    }

    /// The data items referenced, in document order
    pub fn collect_data_items(&self) -> Result<IndexSet<DataItem>> {
        self.ast
            .descendants(self.ast.root())
            .filter(|&id| self.ast[id].is_data_item())
            .map(|id| self.ast.to_data_item(id).cloned())
            .collect()
    }

    /// Every typed identifier referenced, by data items and by functions
    /// taking UIDs as arguments
    pub fn collect_uids(&self) -> Result<IndexSet<Id>> {
        let mut uids: IndexSet<Id> = self
            .collect_data_items()?
            .iter()
            .flat_map(DataItem::ids)
            .cloned()
            .collect();
        for function in NamedFunction::ALL {
            uids.extend(self.collect_function_uids(*function));
        }
        Ok(uids)
    }

    /// The identifiers passed to all calls of `function`, typed by what the
    /// function expects. Empty for functions that take values.
    pub fn collect_function_uids(&self, function: NamedFunction) -> IndexSet<Id> {
        let Some(id_type) = function.uid_type() else {
            return IndexSet::new();
        };
        self.ast
            .descendants(self.ast.root())
            .filter(|&id| self.ast[id].value().as_function() == Some(function))
            .flat_map(|id| argument_uids(&self.ast, self.ast[id].children()))
            .map(|uid| Id::new(id_type, uid))
            .collect()
    }

    /// The expression text with canonical whitespace where none was recorded
    pub fn normalise(&self) -> Result<String> {
        Describer::new(&self.ast).describe()
    }

    /// The expression text with UIDs and variable names replaced by their
    /// display names
    pub fn describe(&self, display_names: &HashMap<String, String>) -> Result<String> {
        Describer::new(&self.ast)
            .with_display_names(display_names)
            .describe()
    }

    /// The expression text with data items replaced by their values
    pub fn substitute(&self, data_item_values: &HashMap<DataItem, Value>) -> Result<String> {
        Describer::new(&self.ast)
            .with_data_item_values(data_item_values)
            .describe()
    }
}

impl From<Ast> for Expression {
    fn from(ast: Ast) -> Self {
        Self::new(ast)
    }
}
