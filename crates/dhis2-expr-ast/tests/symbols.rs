//! Symbol tables of the closed option domains

use dhis2_expr_ast::*;
use dhis2_expr_diagnostics::EXP0001;
use std::collections::HashSet;

/// The options listed in an invalid option message
fn listed_options(message: &str) -> Vec<String> {
    let start = message.find('[').expect("option list start") + 1;
    let end = message.rfind(']').expect("option list end");
    message[start..end].split(", ").map(str::to_string).collect()
}

macro_rules! check_domain {
    ($($domain:ty),+ $(,)?) => {
        $({
            let err = <$domain>::from_symbol("__unknown__").unwrap_err();
            assert_eq!(err.code(), EXP0001);
            assert!(
                err.message().starts_with(concat!("Invalid ", stringify!($domain), " option: '__unknown__'")),
                "{}",
                err.message()
            );
            let listed = listed_options(err.message());
            let expected: Vec<String> =
                <$domain>::SYMBOLS.iter().map(|s| s.to_string()).collect();
            assert_eq!(listed, expected, "options of {}", stringify!($domain));
            let distinct: HashSet<_> = listed.iter().collect();
            assert_eq!(distinct.len(), listed.len(), "duplicate options of {}", stringify!($domain));

            for option in <$domain>::ALL {
                assert_eq!(<$domain>::from_symbol(option.symbol()).as_ref(), Ok(option));
                assert_eq!(option.to_string(), option.symbol());
            }
        })+
    };
}

#[test]
fn test_every_domain_lists_each_option_once() {
    check_domain!(
        NamedFunction,
        DataItemModifier,
        DataItemType,
        VariableType,
        UnaryOperator,
        BinaryOperator,
        ReportingRateType,
        ProgramVariable,
        NamedValue,
        Tag,
        AggregationType,
        IdType,
    );
}

#[test]
fn test_variable_type_listing_includes_empty_symbol() {
    let err = VariableType::from_symbol("X").unwrap_err();
    assert!(err.message().ends_with("options are: [V, #, A, ]"));
}

#[test]
fn test_symbols_parse_via_from_str() {
    let op: BinaryOperator = "<=".parse().unwrap();
    assert_eq!(op, BinaryOperator::Le);
    assert!("<>".parse::<BinaryOperator>().is_err());
}
