//! Values plugged into an expression during evaluation

use crate::Value;
use dhis2_expr_ast::{DataItem, NamedValue, ProgramVariable, ValueType};
use std::collections::HashMap;

/// Key of [`ExpressionData::supplementary_values`] holding the path of the
/// current organisation unit
pub const ORG_UNIT_ANCESTOR: &str = "orgUnit.ancestor";

/// Key of [`ExpressionData::supplementary_values`] holding the UIDs of the
/// data sets named by `orgUnit.dataSet` that have the current organisation
/// unit as a source
pub const ORG_UNIT_DATASET: &str = "orgUnit.dataSet";

/// Key of [`ExpressionData::supplementary_values`] holding the UIDs of the
/// groups named by `orgUnit.group` that have the current organisation unit as
/// a member
pub const ORG_UNIT_GROUP: &str = "orgUnit.group";

/// Key of [`ExpressionData::supplementary_values`] holding the UIDs of the
/// programs named by `orgUnit.program` that are connected to the current
/// organisation unit
pub const ORG_UNIT_PROGRAM: &str = "orgUnit.program";

/// The value of a program rule variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValue {
    /// The current value in text form, `None` when the variable has no value
    pub value: Option<String>,
    /// How `value` is interpreted
    pub value_type: ValueType,
    /// All values seen for the variable, used by `d2:count`
    pub candidates: Vec<String>,
}

impl VariableValue {
    pub fn new(value_type: ValueType, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            candidates: vec![value.clone()],
            value: Some(value),
            value_type,
        }
    }

    /// A variable without a value
    pub fn empty(value_type: ValueType) -> Self {
        Self {
            value: None,
            value_type,
            candidates: Vec::new(),
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }
}

/// The values used during expression evaluation
#[derive(Debug, Clone, Default)]
pub struct ExpressionData {
    /// Program rule variable values by variable name
    pub program_rule_variable_values: HashMap<String, VariableValue>,
    /// Program variable values
    pub program_variable_values: HashMap<ProgramVariable, Value>,
    /// Lists of UIDs under the `ORG_UNIT_*` keys
    pub supplementary_values: HashMap<String, Vec<String>>,
    /// Data item values. Items under period aggregation map to
    /// [`Value::Numbers`].
    pub data_item_values: HashMap<DataItem, Value>,
    /// Values of `[name]` references
    pub named_values: HashMap<NamedValue, Value>,
}

impl ExpressionData {
    /// Create empty expression data
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a program rule variable value
    pub fn with_program_rule_variable(
        mut self,
        name: impl Into<String>,
        value: VariableValue,
    ) -> Self {
        self.program_rule_variable_values.insert(name.into(), value);
        self
    }

    /// Set a program variable value
    pub fn with_program_variable(mut self, variable: ProgramVariable, value: impl Into<Value>) -> Self {
        self.program_variable_values.insert(variable, value.into());
        self
    }

    /// Set a supplementary value list
    pub fn with_supplementary_values(
        mut self,
        key: impl Into<String>,
        uids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.supplementary_values
            .insert(key.into(), uids.into_iter().map(Into::into).collect());
        self
    }

    /// Set a data item value
    pub fn with_data_item(mut self, item: DataItem, value: impl Into<Value>) -> Self {
        self.data_item_values.insert(item, value.into());
        self
    }

    /// Set a named value
    pub fn with_named_value(mut self, name: NamedValue, value: impl Into<Value>) -> Self {
        self.named_values.insert(name, value.into());
        self
    }

    /// Get a supplementary value list, empty when not set
    pub fn supplementary(&self, key: &str) -> &[String] {
        self.supplementary_values
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
