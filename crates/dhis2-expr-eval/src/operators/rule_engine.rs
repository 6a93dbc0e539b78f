//! Rule engine functions (`d2:*`)
//!
//! Dates may be passed as date literals or as text in `yyyy-MM-dd` form.
//! String positions count characters, not bytes, and are clamped to the
//! bounds of the text.

use crate::engine::{Evaluator, to_number};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use crate::zscore::{Gender, GrowthIndicator, z_score};
use chrono::{Datelike, NaiveDate, TimeDelta};
use dhis2_expr_ast::literal::parse_date;
use dhis2_expr_ast::{NamedFunction, NodeId};
use regex::Regex;

impl Evaluator<'_> {
    pub(crate) fn eval_d2_add_days(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2AddDays;
        self.expect_args(function, args, 2, Some(2))?;
        let values = self.eval_args(args)?;
        let date = to_date(function, &values[0])?;
        let days = to_number(function.symbol(), &values[1])?;
        Ok(date
            .zip(days)
            .and_then(|(date, days)| {
                TimeDelta::try_days(days as i64).and_then(|delta| date.checked_add_signed(delta))
            })
            .into())
    }

    /// `d2:daysBetween`, `d2:weeksBetween`, `d2:monthsBetween` and
    /// `d2:yearsBetween`, counting whole units from the first date to the
    /// second
    pub(crate) fn eval_d2_between(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(function, args, 2, Some(2))?;
        let values = self.eval_args(args)?;
        let (Some(start), Some(end)) = (to_date(function, &values[0])?, to_date(function, &values[1])?)
        else {
            return Ok(Value::Null);
        };
        let days = (end - start).num_days();
        let result = match function {
            NamedFunction::D2DaysBetween => days,
            NamedFunction::D2WeeksBetween => days / 7,
            NamedFunction::D2MonthsBetween => months_between(start, end),
            _ => months_between(start, end) / 12,
        };
        Ok(Value::Number(result as f64))
    }

    /// `d2:ceil` and `d2:floor`
    pub(crate) fn eval_d2_rounding(
        &self,
        function: NamedFunction,
        args: &[NodeId],
        round: fn(f64) -> f64,
    ) -> EvalResult<Value> {
        let value = self.eval_single(function, args)?;
        Ok(to_number(function.symbol(), &value)?.map(round).into())
    }

    /// `d2:round(x[, decimals])`, halves round away from zero
    pub(crate) fn eval_d2_round(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Round;
        self.expect_args(function, args, 1, Some(2))?;
        let values = self.eval_args(args)?;
        let Some(x) = to_number(function.symbol(), &values[0])? else {
            return Ok(Value::Null);
        };
        let decimals = match values.get(1) {
            Some(decimals) => to_number(function.symbol(), decimals)?.unwrap_or_default(),
            None => 0.0,
        };
        let scale = 10f64.powi(decimals as i32);
        Ok(Value::Number((x * scale).round() / scale))
    }

    /// Joins the text of all arguments, skipping nulls
    pub(crate) fn eval_d2_concatenate(&self, args: &[NodeId]) -> EvalResult<Value> {
        let text: String = self
            .eval_args(args)?
            .iter()
            .filter_map(to_text)
            .collect();
        Ok(Value::String(text))
    }

    /// The number of values seen for a program rule variable
    pub(crate) fn eval_d2_count(&self, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(NamedFunction::D2Count, args, 1, Some(1))?;
        let count = self
            .rule_variable(args[0])?
            .map_or(0, |variable| variable.candidates.len());
        Ok(Value::Number(count as f64))
    }

    pub(crate) fn eval_d2_has_value(&self, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(NamedFunction::D2HasValue, args, 1, Some(1))?;
        let has_value = self
            .rule_variable(args[0])?
            .is_some_and(|variable| variable.value.is_some());
        Ok(Value::Boolean(has_value))
    }

    /// `d2:left(text, n)` and `d2:right(text, n)`
    pub(crate) fn eval_d2_left_right(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(function, args, 2, Some(2))?;
        let values = self.eval_args(args)?;
        let Some(text) = to_text(&values[0]) else {
            return Ok(Value::Null);
        };
        let chars: Vec<char> = text.chars().collect();
        let n = clamp(to_number(function.symbol(), &values[1])?, chars.len());
        let slice = match function {
            NamedFunction::D2Left => &chars[..n],
            _ => &chars[chars.len() - n..],
        };
        Ok(Value::String(slice.iter().collect()))
    }

    /// `d2:substring(text, start, end)`, end exclusive
    pub(crate) fn eval_d2_substring(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Substring;
        self.expect_args(function, args, 3, Some(3))?;
        let values = self.eval_args(args)?;
        let Some(text) = to_text(&values[0]) else {
            return Ok(Value::Null);
        };
        let chars: Vec<char> = text.chars().collect();
        let start = clamp(to_number(function.symbol(), &values[1])?, chars.len());
        let end = clamp(to_number(function.symbol(), &values[2])?, chars.len()).max(start);
        Ok(Value::String(chars[start..end].iter().collect()))
    }

    pub(crate) fn eval_d2_length(&self, args: &[NodeId]) -> EvalResult<Value> {
        let value = self.eval_single(NamedFunction::D2Length, args)?;
        Ok(to_text(&value)
            .map(|text| text.chars().count() as f64)
            .into())
    }

    pub(crate) fn eval_d2_modulus(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Modulus;
        self.expect_args(function, args, 2, Some(2))?;
        let values = self.eval_args(args)?;
        let a = to_number(function.symbol(), &values[0])?;
        let b = to_number(function.symbol(), &values[1])?;
        Ok(a.zip(b)
            .filter(|&(_, b)| b != 0.0)
            .map(|(a, b)| a % b)
            .into())
    }

    /// One if zero or positive, zero otherwise
    pub(crate) fn eval_d2_oizp(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Oizp;
        let value = self.eval_single(function, args)?;
        let positive = to_number(function.symbol(), &value)?.is_some_and(|n| n >= 0.0);
        Ok(Value::Number(if positive { 1.0 } else { 0.0 }))
    }

    /// Zero if negative, the value otherwise
    pub(crate) fn eval_d2_zing(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Zing;
        let value = self.eval_single(function, args)?;
        Ok(to_number(function.symbol(), &value)?.map(|n| n.max(0.0)).into())
    }

    /// The number of zero or positive arguments
    pub(crate) fn eval_d2_zpvc(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::D2Zpvc;
        self.expect_args(function, args, 1, None)?;
        let mut count = 0;
        for value in self.eval_args(args)? {
            if to_number(function.symbol(), &value)?.is_some_and(|n| n >= 0.0) {
                count += 1;
            }
        }
        Ok(Value::Number(f64::from(count)))
    }

    /// `d2:zScoreWFA`, `d2:zScoreHFA` and `d2:zScoreWFH`, null when the
    /// growth tables have no row for the age or height
    pub(crate) fn eval_d2_z_score(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(function, args, 3, Some(3))?;
        let values = self.eval_args(args)?;
        let parameter = to_number(function.symbol(), &values[0])?;
        let measurement = to_number(function.symbol(), &values[1])?;
        let (Some(parameter), Some(measurement), Some(gender)) =
            (parameter, measurement, to_text(&values[2]))
        else {
            return Ok(Value::Null);
        };
        let indicator = match function {
            NamedFunction::D2ZScoreWfa => GrowthIndicator::WeightForAge,
            NamedFunction::D2ZScoreHfa => GrowthIndicator::HeightForAge,
            _ => GrowthIndicator::WeightForHeight,
        };
        Ok(z_score(indicator, Gender::from_code(&gender), parameter, measurement).into())
    }

    /// Whether the whole text matches the pattern
    pub(crate) fn eval_d2_validate_pattern(&self, args: &[NodeId]) -> EvalResult<Value> {
        self.expect_args(NamedFunction::D2ValidatePattern, args, 2, Some(2))?;
        let values = self.eval_args(args)?;
        let (Some(text), Some(pattern)) = (to_text(&values[0]), to_text(&values[1])) else {
            return Ok(Value::Null);
        };
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|_| EvalError::invalid_regex(pattern.as_str()))?;
        Ok(Value::Boolean(regex.is_match(&text)))
    }
}

fn to_date(function: NamedFunction, value: &Value) -> EvalResult<Option<NaiveDate>> {
    match value {
        Value::Null => Ok(None),
        Value::Date(date) => Ok(Some(*date)),
        Value::String(text) => Ok(Some(parse_date(text)?)),
        other => Err(EvalError::invalid_operand(
            function.symbol(),
            format!("expected a date, found {}", other.type_name()),
        )),
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// A character position within `0..=len`
fn clamp(position: Option<f64>, len: usize) -> usize {
    position.map_or(0, |n| (n.max(0.0) as usize).min(len))
}

/// Whole months from `start` to `end`, negative when `end` is earlier
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12
        + i64::from(end.month()) - i64::from(start.month());
    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    #[rstest]
    #[case("2020-01-15", "2020-03-15", 2)]
    #[case("2020-01-15", "2020-03-14", 1)]
    #[case("2020-03-15", "2020-01-16", -1)]
    #[case("2019-06-01", "2021-06-01", 24)]
    fn test_months_between(#[case] start: &str, #[case] end: &str, #[case] expected: i64) {
        assert_eq!(months_between(date(start), date(end)), expected);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(Some(-2.0), 5), 0);
        assert_eq!(clamp(Some(9.0), 5), 5);
        assert_eq!(clamp(None, 5), 0);
    }

    #[test]
    fn test_date_from_text() {
        let value = Value::from("2021-02-03");
        assert_eq!(to_date(NamedFunction::D2AddDays, &value), Ok(Some(date("2021-02-03"))));
        assert!(to_date(NamedFunction::D2AddDays, &Value::Number(1.0)).is_err());
    }
}
