//! Static value types and literal decoding

use dhis2_expr_ast::literal::decode;
use dhis2_expr_ast::*;
use proptest::prelude::*;
use rstest::rstest;

fn type_of(f: impl FnOnce(&mut AstBuilder)) -> ValueType {
    let mut builder = AstBuilder::new();
    f(&mut builder);
    let ast = builder.build().unwrap();
    let first = ast.child(ast.root(), 0).unwrap();
    ast.value_type(first)
}

#[rstest]
#[case::number(ValueType::Number, |b: &mut AstBuilder| { b.number("1.5"); })]
#[case::integer(ValueType::Number, |b: &mut AstBuilder| { b.integer("3"); })]
#[case::boolean(ValueType::Boolean, |b: &mut AstBuilder| { b.boolean("false"); })]
#[case::date(ValueType::Date, |b: &mut AstBuilder| { b.date("2024-02-29"); })]
#[case::string(ValueType::String, |b: &mut AstBuilder| { b.string("abc"); })]
#[case::named_value(ValueType::String, |b: &mut AstBuilder| { b.named_value("days"); })]
#[case::null(ValueType::Same, |b: &mut AstBuilder| { b.null(); })]
#[case::data_item(ValueType::Mixed, |b: &mut AstBuilder| { b.data_item("#", &[&["a"]]); })]
#[case::comparison(ValueType::Boolean, |b: &mut AstBuilder| {
    b.start_binary("<").number("1").number("2").finish_node();
})]
#[case::arithmetic(ValueType::Number, |b: &mut AstBuilder| {
    b.start_binary("+").boolean("true").number("2").finish_node();
})]
#[case::negation(ValueType::Number, |b: &mut AstBuilder| {
    b.start_unary("-").boolean("true").finish_node();
})]
#[case::plus_forwards(ValueType::Date, |b: &mut AstBuilder| {
    b.start_unary("+").date("2020-01-01").finish_node();
})]
#[case::not(ValueType::Boolean, |b: &mut AstBuilder| {
    b.start_unary("not").number("1").finish_node();
})]
#[case::parentheses(ValueType::String, |b: &mut AstBuilder| {
    b.start_par().string("x").finish_node();
})]
#[case::if_takes_branch_type(ValueType::Date, |b: &mut AstBuilder| {
    b.start_function("if")
        .start_argument(0).boolean("true").finish_node()
        .start_argument(1).date("2020-01-01").finish_node()
        .start_argument(2).date("2020-01-02").finish_node()
        .finish_node();
})]
#[case::first_non_null(ValueType::String, |b: &mut AstBuilder| {
    b.start_function("firstNonNull")
        .start_argument(0).string("a").finish_node()
        .finish_node();
})]
#[case::first_non_null_without_arguments(ValueType::Mixed, |b: &mut AstBuilder| {
    b.start_function("firstNonNull").finish_node();
})]
#[case::declared_function_type(ValueType::Boolean, |b: &mut AstBuilder| {
    b.start_function("isNull").finish_node();
})]
#[case::argument_with_many_children(ValueType::Mixed, |b: &mut AstBuilder| {
    b.start_argument(0).number("1").number("2").finish_node();
})]
#[case::modifier(ValueType::Same, |b: &mut AstBuilder| {
    b.start_modifier("yearToDate").finish_node();
})]
fn test_value_types(#[case] expected: ValueType, #[case] build: fn(&mut AstBuilder)) {
    assert_eq!(type_of(build), expected);
}

#[test]
fn test_variable_type_is_supplied_later() {
    let mut builder = AstBuilder::new();
    builder.rule_variable("#", "weight");
    let mut ast = builder.build().unwrap();
    let variable = ast.child(ast.root(), 0).unwrap();
    assert_eq!(ast.value_type(variable), ValueType::Mixed);
    ast.set_actual_value_type(variable, ValueType::Number).unwrap();
    assert_eq!(ast.value_type(ast.root()), ValueType::Number);
}

#[test]
fn test_invalid_literal_fails_construction() {
    let mut builder = AstBuilder::new();
    builder.date("2021-02-30");
    let err = builder.build().unwrap_err();
    assert_eq!(err.code().to_string(), "EXP0005");
}

proptest! {
    #[test]
    fn decode_is_identity_without_backslash(raw in "[^\\\\]*") {
        let decoded = decode(&raw).unwrap();
        prop_assert_eq!(&*decoded, raw.as_str());
    }

    #[test]
    fn escaped_plain_characters_decode_to_themselves(c in "[a-zA-Z&&[^bftnru]]") {
        let raw = format!("\\{c}");
        let decoded = decode(&raw).unwrap();
        prop_assert_eq!(&*decoded, c.as_str());
    }
}
