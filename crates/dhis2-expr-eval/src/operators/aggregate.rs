//! Aggregating functions
//!
//! Their data items carry the `periodAggregation` modifier and evaluate to a
//! series with one number per period. Undefined entries (`NaN`) are skipped.

use crate::engine::{Evaluator, to_number};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use dhis2_expr_ast::{NamedFunction, NodeId};

impl Evaluator<'_> {
    pub(crate) fn eval_aggregate(&self, function: NamedFunction, args: &[NodeId]) -> EvalResult<Value> {
        let values = series(function, self.eval_single(function, args)?)?;
        let result = match function {
            NamedFunction::Count => Some(values.len() as f64),
            NamedFunction::Sum => (!values.is_empty()).then(|| values.iter().sum()),
            NamedFunction::Avg => mean(&values),
            NamedFunction::Max => values.iter().copied().reduce(f64::max),
            NamedFunction::Min => values.iter().copied().reduce(f64::min),
            NamedFunction::Median => percentile(values, 0.5),
            NamedFunction::StddevPop => variance(&values, 0).map(f64::sqrt),
            NamedFunction::Stddev | NamedFunction::StddevSamp => {
                variance(&values, 1).map(f64::sqrt)
            }
            NamedFunction::Variance => variance(&values, 1),
            other => {
                return Err(EvalError::unsupported_node(format!(
                    "'{other}' is not an aggregating function"
                )));
            }
        };
        Ok(result.into())
    }

    /// `percentileCont(fraction, series)` with linear interpolation
    pub(crate) fn eval_percentile_cont(&self, args: &[NodeId]) -> EvalResult<Value> {
        let function = NamedFunction::PercentileCont;
        self.expect_args(function, args, 2, Some(2))?;
        let Some(fraction) = to_number(function.symbol(), &self.evaluate(args[0])?)? else {
            return Ok(Value::Null);
        };
        if !(0.0..=1.0).contains(&fraction) {
            return Err(EvalError::invalid_operand(
                function.symbol(),
                format!("fraction {fraction} is not between 0 and 1"),
            ));
        }
        let values = series(function, self.evaluate(args[1])?)?;
        Ok(percentile(values, fraction).into())
    }
}

/// The defined entries of an aggregated value
fn series(function: NamedFunction, value: Value) -> EvalResult<Vec<f64>> {
    match value {
        Value::Numbers(values) => Ok(values.into_iter().filter(|n| !n.is_nan()).collect()),
        other => Ok(to_number(function.symbol(), &other)?.into_iter().collect()),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Variance with `ddof` delta degrees of freedom
fn variance(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|n| (n - mean).powi(2)).sum();
    Some(squares / (values.len() - ddof) as f64)
}

fn percentile(mut values: Vec<f64>, fraction: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let rank = fraction * (values.len() - 1) as f64;
    let (lower, upper) = (rank.floor() as usize, rank.ceil() as usize);
    Some(values[lower] + (values[upper] - values[lower]) * (rank - lower as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALUES: [f64; 5] = [0.0, 10.0, 5.0, 3.0, 7.0];

    #[test]
    fn test_percentile_interpolates() {
        assert_eq!(percentile(VALUES.to_vec(), 0.5), Some(5.0));
        assert_eq!(percentile(VALUES.to_vec(), 0.0), Some(0.0));
        assert_eq!(percentile(VALUES.to_vec(), 1.0), Some(10.0));
        assert_eq!(percentile(vec![1.0, 2.0], 0.5), Some(1.5));
        assert_eq!(percentile(Vec::new(), 0.5), None);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[2.0, 4.0], 0), Some(1.0));
        assert_eq!(variance(&[2.0, 4.0], 1), Some(2.0));
        assert_eq!(variance(&[2.0], 1), None);
    }

    #[test]
    fn test_series_skips_undefined_entries() {
        let values = series(NamedFunction::Sum, Value::Numbers(vec![1.0, f64::NAN, 2.0]));
        assert_eq!(values, Ok(vec![1.0, 2.0]));
        assert_eq!(series(NamedFunction::Sum, Value::Null), Ok(Vec::new()));
    }
}
