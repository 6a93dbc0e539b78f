//! DHIS2 expression abstract syntax tree
//!
//! This crate provides the tree representation of parsed DHIS2 expressions:
//! - [`Node`] and the [`Ast`] arena that owns it
//! - Closed option domains ([`NamedFunction`], [`DataItemType`], ...) with
//!   their symbol tables
//! - Static value types ([`ValueType`])
//! - The post-parse transformations [`supply_sub_expression_tags`] and
//!   [`propagate_modifiers`]
//! - Assembly of [`DataItem`] and [`Variable`] descriptors

#[macro_use]
mod symbol;

pub mod builder;
pub mod data_item;
pub mod domain;
pub mod function;
pub mod literal;
pub mod modifier;
pub mod node;
pub mod operator;
pub mod transform;
pub mod tree;
pub mod value_type;

pub use builder::AstBuilder;
pub use data_item::{DataItem, Id, Variable};
pub use domain::{
    AggregationType, DataItemType, IdType, NamedValue, ProgramVariable, ReportingRateType, Tag,
    VariableType,
};
pub use function::NamedFunction;
pub use modifier::{DataItemModifier, QueryModifiers};
pub use node::{Node, NodeId, NodeKind, NodeList, NodeType, NodeValue, Whitespace};
pub use operator::{BinaryOperator, UnaryOperator};
pub use transform::{TagGenerator, propagate_modifiers, supply_sub_expression_tags};
pub use tree::{Ast, Descendants};
pub use value_type::ValueType;
