//! Evaluation errors

use dhis2_expr_diagnostics::ExprError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while evaluating an expression
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// The tree is malformed or a literal failed to decode
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// Type mismatch error
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Invalid operand error
    #[error("Invalid operand for {operator}: {message}")]
    InvalidOperand { operator: String, message: String },

    /// Wrong number of function arguments
    #[error("Function {function} expects {expected} argument(s), found {found}")]
    ArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {pattern}")]
    InvalidRegex { pattern: String },

    /// Unsupported node in an evaluation position
    #[error("Unsupported expression node: {node}")]
    UnsupportedNode { node: String },
}

impl EvalError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid operand error
    pub fn invalid_operand(operator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operator: operator.into(),
            message: message.into(),
        }
    }

    /// Create an argument count error
    pub fn argument_count(
        function: impl Into<String>,
        expected: impl Into<String>,
        found: usize,
    ) -> Self {
        Self::ArgumentCount {
            function: function.into(),
            expected: expected.into(),
            found,
        }
    }

    /// Create an invalid regex error
    pub fn invalid_regex(pattern: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
        }
    }

    /// Create an unsupported node error
    pub fn unsupported_node(node: impl Into<String>) -> Self {
        Self::UnsupportedNode { node: node.into() }
    }
}
