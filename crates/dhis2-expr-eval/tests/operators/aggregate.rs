//! Aggregate Function Tests
//!
//! Tests for: avg, count, max, median, min, percentileCont, stddev,
//! stddevPop, stddevSamp, sum, variance

use super::{assert_close, evaluate_with, expression};
use dhis2_expr_ast::{AstBuilder, DataItem, DataItemType, Id, IdType, QueryModifiers};
use dhis2_expr_eval::{EvalError, ExpressionData, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

const U: &str = "u1234567890";
const V: &str = "v1234567890";

/// `#{uid}` as seen inside an aggregating function
fn de_item(uid: &str) -> DataItem {
    DataItem::new(DataItemType::DataElement, Id::new(IdType::DataElementUid, uid))
        .with_query_mods(QueryModifiers::default().with_period_aggregation())
}

fn data() -> ExpressionData {
    ExpressionData::new()
        .with_data_item(de_item(U), vec![0.0, 10.0, 5.0, 3.0, 7.0])
        .with_data_item(de_item(V), vec![0.0, 10.0, 5.0, 3.0, 7.0])
}

/// `function(#{u1234567890})`
fn aggregate(function: &str) -> impl FnOnce(&mut AstBuilder) + '_ {
    move |b| {
        b.start_function(function)
            .start_argument(0)
            .data_item("#", &[&[U]])
            .finish_node()
            .finish_node();
    }
}

// ============================================================================
// Basic Aggregates
// ============================================================================

#[rstest]
#[case("avg", 5.0)]
#[case("sum", 25.0)]
#[case("min", 0.0)]
#[case("max", 10.0)]
#[case("count", 5.0)]
#[case("median", 5.0)]
#[case("variance", 14.5)]
fn test_aggregate(#[case] function: &str, #[case] expected: f64) {
    assert_eq!(evaluate_with(&data(), aggregate(function)), Ok(Value::Number(expected)));
}

#[test]
fn test_avg_of_sum() {
    // avg(#{u} + #{v})
    let result = evaluate_with(&data(), |b| {
        b.start_function("avg")
            .start_argument(0)
            .start_binary("+")
            .data_item("#", &[&[U]])
            .data_item("#", &[&[V]])
            .finish_node()
            .finish_node()
            .finish_node();
    });
    assert_eq!(result, Ok(Value::Number(10.0)));
}

#[test]
fn test_data_items_are_marked_for_period_aggregation() {
    let expression = expression(aggregate("sum"));
    let items: Vec<_> = expression.collect_data_items().unwrap().into_iter().collect();
    assert_eq!(items, vec![de_item(U)]);
}

// ============================================================================
// Standard Deviation
// ============================================================================

#[test]
fn test_stddev_variants() {
    let sample = (58.0_f64 / 4.0).sqrt();
    assert_close(evaluate_with(&data(), aggregate("stddev")).unwrap(), sample);
    assert_close(evaluate_with(&data(), aggregate("stddevSamp")).unwrap(), sample);
    assert_close(
        evaluate_with(&data(), aggregate("stddevPop")).unwrap(),
        (58.0_f64 / 5.0).sqrt(),
    );
}

#[test]
fn test_sample_variance_needs_two_values() {
    let data = ExpressionData::new().with_data_item(de_item(U), vec![4.0]);
    assert_eq!(evaluate_with(&data, aggregate("variance")), Ok(Value::Null));
    assert_eq!(evaluate_with(&data, aggregate("stddevPop")), Ok(Value::Number(0.0)));
}

// ============================================================================
// Missing And Undefined Values
// ============================================================================

#[test]
fn test_missing_data_item() {
    let empty = ExpressionData::new();
    assert_eq!(evaluate_with(&empty, aggregate("avg")), Ok(Value::Null));
    assert_eq!(evaluate_with(&empty, aggregate("count")), Ok(Value::Number(0.0)));
}

#[test]
fn test_undefined_entries_are_skipped() {
    let data = ExpressionData::new().with_data_item(de_item(U), vec![1.0, f64::NAN, 3.0]);
    assert_eq!(evaluate_with(&data, aggregate("avg")), Ok(Value::Number(2.0)));
    assert_eq!(evaluate_with(&data, aggregate("count")), Ok(Value::Number(2.0)));
}

#[test]
fn test_remove_zeros_inside_aggregate() {
    // avg(removeZeros(#{u}))
    let result = evaluate_with(&data(), |b| {
        b.start_function("avg")
            .start_argument(0)
            .start_function("removeZeros")
            .start_argument(0)
            .data_item("#", &[&[U]])
            .finish_node()
            .finish_node()
            .finish_node()
            .finish_node();
    });
    assert_eq!(result, Ok(Value::Number(6.25)));
}

// ============================================================================
// Percentile
// ============================================================================

fn percentile(fraction: &str) -> impl FnOnce(&mut AstBuilder) + '_ {
    move |b| {
        b.start_function("percentileCont")
            .start_argument(0)
            .number(fraction)
            .finish_node()
            .start_argument(1)
            .data_item("#", &[&[U]])
            .finish_node()
            .finish_node();
    }
}

#[rstest]
#[case("0", 0.0)]
#[case("0.5", 5.0)]
#[case("0.25", 3.0)]
#[case("1", 10.0)]
fn test_percentile_cont(#[case] fraction: &str, #[case] expected: f64) {
    assert_eq!(evaluate_with(&data(), percentile(fraction)), Ok(Value::Number(expected)));
}

#[test]
fn test_percentile_fraction_out_of_range() {
    let result = evaluate_with(&data(), percentile("1.5"));
    assert!(matches!(result, Err(EvalError::InvalidOperand { .. })));
}
