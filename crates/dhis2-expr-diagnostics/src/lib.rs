//! Diagnostics for DHIS2 expressions
//!
//! This crate provides the error handling infrastructure shared by the AST and
//! evaluation crates: error codes, the [`ExprError`] type and source spans.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for expression operations
pub type Result<T> = std::result::Result<T, ExprError>;
