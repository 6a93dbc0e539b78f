//! DHIS2 Expression Evaluation Engine
//!
//! This crate evaluates prepared expression trees against in-memory data and
//! renders them back into text:
//!
//! - **Arithmetic Operators**: `+`, `-`, `*`, `/`, `%`, `^`, element-wise over
//!   period series
//! - **Comparison Operators**: `<`, `>`, `<=`, `>=`, `==`, `!=`
//! - **Logical Operators**: `&&`, `||`, `!` and their word forms
//! - **General Functions**: `if`, `firstNonNull`, `greatest`, `log`, ...
//! - **Aggregate Functions**: `avg`, `sum`, `median`, `percentileCont`, ...
//! - **Rule Engine Functions**: `d2:addDays`, `d2:count`, `d2:round`, ...
//!   and the WHO growth z-scores in [`zscore`]
//! - **Validation Rule Functions**: `orgUnit.ancestor`, `orgUnit.group`, ...
//!
//! # Example
//!
//! ```
//! use dhis2_expr_ast::AstBuilder;
//! use dhis2_expr_eval::{Expression, ExpressionData, Value};
//!
//! let mut builder = AstBuilder::new();
//! builder.start_function("d2:zing").start_argument(0).number("-3").finish_node().finish_node();
//! let expression = Expression::new(builder.build().unwrap());
//!
//! assert_eq!(expression.evaluate(&ExpressionData::new()), Ok(Value::Number(0.0)));
//! ```
//!
//! # Architecture
//!
//! - [`Expression`]: runs the tree passes once and exposes evaluation,
//!   collection and rendering
//! - [`Evaluator`]: dispatches nodes to the operator implementations
//! - [`ExpressionData`]: the values plugged in during evaluation
//! - [`Describer`]: renders a tree back into text
//!
//! # Three-Valued Logic
//!
//! Operations can return true, false, or null:
//!
//! - `and`: false dominates (null and false = false)
//! - `or`: true dominates (null or true = true)
//! - `if` with a null condition is null

pub mod context;
pub mod describe;
pub mod engine;
pub mod error;
pub mod expression;
pub mod operators;
pub mod value;
pub mod zscore;

// Re-export main types
pub use context::{
    ExpressionData, ORG_UNIT_ANCESTOR, ORG_UNIT_DATASET, ORG_UNIT_GROUP, ORG_UNIT_PROGRAM,
    VariableValue,
};
pub use describe::Describer;
pub use engine::Evaluator;
pub use error::{EvalError, EvalResult};
pub use expression::Expression;
pub use value::Value;
