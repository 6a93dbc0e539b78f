//! Tests for collecting the references of an expression

use dhis2_expr_ast::{
    AstBuilder, DataItem, DataItemType, Id, IdType, ProgramVariable, ValueType,
};
use dhis2_expr_eval::Expression;
use indexmap::IndexSet;
use pretty_assertions::assert_eq;

fn expression(build: impl FnOnce(&mut AstBuilder)) -> Expression {
    let mut builder = AstBuilder::new();
    build(&mut builder);
    Expression::new(builder.build().unwrap())
}

fn names(expression: &Expression) -> Vec<String> {
    expression
        .collect_program_rule_variable_names()
        .into_iter()
        .collect()
}

// ============================================================================
// Program Rule Variables
// ============================================================================

#[test]
fn test_quoted_variable_name() {
    // d2:count('var1')
    let expression = expression(|b| {
        b.start_function("d2:count")
            .start_argument(0)
            .start_variable("")
            .string("var1")
            .finish_node()
            .finish_node()
            .finish_node();
    });
    assert_eq!(names(&expression), ["var1"]);
}

#[test]
fn test_hash_variable_name() {
    let expression = expression(|b| {
        b.rule_variable("#", "var1");
    });
    assert_eq!(names(&expression), ["var1"]);
}

#[test]
fn test_attribute_variable_name() {
    let expression = expression(|b| {
        b.rule_variable("A", "var1");
    });
    assert_eq!(names(&expression), ["var1"]);
}

#[test]
fn test_variable_names_are_distinct_and_ordered() {
    // #{b} + #{a} + A{b}
    let expression = expression(|b| {
        b.start_binary("+")
            .start_binary("+")
            .rule_variable("#", "b")
            .rule_variable("#", "a")
            .finish_node()
            .rule_variable("A", "b")
            .finish_node();
    });
    assert_eq!(names(&expression), ["b", "a"]);
}

#[test]
fn test_program_variables_are_not_rule_variables() {
    let expression = expression(|b| {
        b.start_binary("+")
            .program_variable("event_count")
            .program_variable("tei_count")
            .finish_node();
    });
    assert!(names(&expression).is_empty());
    let variables: Vec<_> = expression
        .collect_program_variables()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(variables, [ProgramVariable::EventCount, ProgramVariable::TeiCount]);
}

// ============================================================================
// Data Items And UIDs
// ============================================================================

fn de(uid: &str) -> DataItem {
    DataItem::new(DataItemType::DataElement, Id::new(IdType::DataElementUid, uid))
}

#[test]
fn test_data_items_are_distinct_and_ordered() {
    // #{b} + #{a} + #{b}
    let expression = expression(|b| {
        b.start_binary("+")
            .start_binary("+")
            .data_item("#", &[&["b1234567890"]])
            .data_item("#", &[&["a1234567890"]])
            .finish_node()
            .data_item("#", &[&["b1234567890"]])
            .finish_node();
    });
    let items: Vec<_> = expression.collect_data_items().unwrap().into_iter().collect();
    assert_eq!(items, [de("b1234567890"), de("a1234567890")]);
}

#[test]
fn test_uids_of_data_items() {
    // #{de.coc}
    let expression = expression(|b| {
        b.data_item("#", &[&["d1234567890"], &["c1234567890"]]);
    });
    let expected: IndexSet<Id> = [
        Id::new(IdType::DataElementUid, "d1234567890"),
        Id::new(IdType::CategoryOptionComboUid, "c1234567890"),
    ]
    .into_iter()
    .collect();
    assert_eq!(expression.collect_uids().unwrap(), expected);
}

#[test]
fn test_sub_expression_items_share_a_tag() {
    // subExpression(#{a} + #{b}) + #{c}
    let expression = expression(|b| {
        b.start_binary("+")
            .start_function("subExpression")
            .start_argument(0)
            .start_binary("+")
            .data_item("#", &[&["a1234567890"]])
            .data_item("#", &[&["b1234567890"]])
            .finish_node()
            .finish_node()
            .finish_node()
            .data_item("#", &[&["c1234567890"]])
            .finish_node();
    });
    let items: Vec<_> = expression.collect_data_items().unwrap().into_iter().collect();
    let tags: Vec<_> = items.iter().map(|item| item.query_mods.sub_expression.clone()).collect();
    assert!(tags[0].is_some());
    assert_eq!(tags[0], tags[1]);
    assert_eq!(tags[2], None);
}

#[test]
fn test_expression_value_type() {
    let comparison = expression(|b| {
        b.start_binary("<").number("1").number("2").finish_node();
    });
    assert_eq!(comparison.value_type(), ValueType::Boolean);

    let choice = expression(|b| {
        b.start_function("if")
            .start_argument(0)
            .boolean("true")
            .finish_node()
            .start_argument(1)
            .string("yes")
            .finish_node()
            .start_argument(2)
            .string("no")
            .finish_node()
            .finish_node();
    });
    assert_eq!(choice.value_type(), ValueType::String);
}
