//! DHIS2 expression language core for Rust
//!
//! This crate bundles the pieces needed to work with parsed DHIS2
//! expressions:
//! - The expression tree, its value types and the closed option domains
//! - The tree passes that resolve data item modifiers and sub-expressions
//! - Data item and query modifier assembly
//! - Evaluation against in-memory data, and rendering back into text
//!
//! # Example
//!
//! ```
//! use dhis2_expr::{AstBuilder, Expression, ExpressionData, Value};
//!
//! // 2 * #{u1234567890}
//! let mut builder = AstBuilder::new();
//! builder
//!     .start_binary("*")
//!     .number("2")
//!     .data_item("#", &[&["u1234567890"]])
//!     .finish_node();
//! let expression = Expression::new(builder.build()?);
//!
//! let item = expression.collect_data_items()?[0].clone();
//! let data = ExpressionData::new().with_data_item(item, 21.0);
//! assert_eq!(expression.evaluate(&data), Ok(Value::Number(42.0)));
//! # Ok::<(), dhis2_expr::ExprError>(())
//! ```

// Re-export all public APIs from internal crates
pub use dhis2_expr_ast as ast;
pub use dhis2_expr_diagnostics as diagnostics;
pub use dhis2_expr_eval as eval;

// Convenience re-exports
pub use dhis2_expr_ast::{Ast, AstBuilder, DataItem, Id, QueryModifiers, TagGenerator, ValueType};
pub use dhis2_expr_diagnostics::{ExprError, Result};
pub use dhis2_expr_eval::{EvalError, EvalResult, Expression, ExpressionData, Value, VariableValue};
