//! Data item modifiers ("dot functions") and their folded settings

use crate::{AggregationType, ValueType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

symbol_enum! {
    /// Modifiers written as `.name(...)` after a data item or variable
    pub enum DataItemModifier {
        AggregationType = "aggregationType",
        MaxDate = "maxDate",
        MinDate = "minDate",
        PeriodOffset = "periodOffset",
        StageOffset = "stageOffset",
        YearToDate = "yearToDate",
        PeriodAggregation = "periodAggregation",
        SubExpression = "subExpression",
    }
}

impl DataItemModifier {
    /// Modifiers qualify the node they are attached to, they have no value
    /// of their own
    pub const fn value_type(&self) -> ValueType {
        ValueType::Same
    }

    pub const fn parameter_types(&self) -> &'static [ValueType] {
        match self {
            Self::AggregationType | Self::SubExpression => &[ValueType::String],
            Self::MaxDate | Self::MinDate => &[ValueType::Date],
            Self::PeriodOffset | Self::StageOffset => &[ValueType::Number],
            Self::YearToDate | Self::PeriodAggregation => &[],
        }
    }

    /// Modifiers only ever added by tree transformations
    pub const fn is_synthetic(&self) -> bool {
        matches!(self, Self::PeriodAggregation | Self::SubExpression)
    }
}

/// The effective modifiers of one data item or variable.
///
/// `QueryModifiers::default()` is the identity of the fold over a modifier
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryModifiers {
    pub aggregation_type: Option<AggregationType>,
    pub max_date: Option<NaiveDate>,
    pub min_date: Option<NaiveDate>,
    pub period_offset: Option<i32>,
    pub stage_offset: Option<i32>,
    pub year_to_date: bool,
    pub period_aggregation: bool,
    /// Correlation tag shared by all data items of one `subExpression` call
    pub sub_expression: Option<String>,
}

impl QueryModifiers {
    pub fn with_aggregation_type(mut self, aggregation_type: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation_type);
        self
    }

    pub fn with_max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    /// Offsets accumulate, `None` when the sum leaves the `i32` range
    pub fn with_period_offset(mut self, offset: i32) -> Option<Self> {
        self.period_offset = Some(self.period_offset.unwrap_or(0).checked_add(offset)?);
        Some(self)
    }

    /// Offsets accumulate, `None` when the sum leaves the `i32` range
    pub fn with_stage_offset(mut self, offset: i32) -> Option<Self> {
        self.stage_offset = Some(self.stage_offset.unwrap_or(0).checked_add(offset)?);
        Some(self)
    }

    pub fn with_year_to_date(mut self) -> Self {
        self.year_to_date = true;
        self
    }

    pub fn with_period_aggregation(mut self) -> Self {
        self.period_aggregation = true;
        self
    }

    pub fn with_sub_expression(mut self, tag: impl Into<String>) -> Self {
        self.sub_expression = Some(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
