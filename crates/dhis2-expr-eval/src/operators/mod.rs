//! Operator and function implementations
//!
//! Organized by category:
//! - Arithmetic operators, element-wise over period series
//! - Comparison operators
//! - Logical operators with three-valued logic
//! - General functions (`if`, `firstNonNull`, `orgUnit.*`, ...)
//! - Aggregating functions (`avg`, `sum`, `percentileCont`, ...)
//! - Rule engine functions (`d2:*`)

pub mod aggregate;
pub mod arithmetic;
pub mod comparison;
pub mod general;
pub mod logical;
pub mod rule_engine;

pub use arithmetic::arithmetic;
pub use comparison::compare;
