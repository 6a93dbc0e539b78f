//! Expression error types

use crate::{EXP0001, ErrorCode, SourceLocation, Span};
use thiserror::Error;

/// Main expression error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The raw text of a node is not a valid literal for its node variant
    #[error("{code}: {message}")]
    Literal {
        code: ErrorCode,
        message: String,
        raw: String,
        span: Option<Span>,
    },

    /// A node or subtree does not have the shape an operation requires
    #[error("{code}: {message}")]
    Structure {
        code: ErrorCode,
        message: String,
        span: Option<Span>,
    },
}

impl ExprError {
    /// Create a literal error
    pub fn literal(code: ErrorCode, message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Literal {
            code,
            message: message.into(),
            raw: raw.into(),
            span: None,
        }
    }

    /// Create an error for a raw value that is not one of the options of a
    /// closed domain. The message lists every option in declaration order.
    pub fn invalid_option(domain: &str, raw: &str, options: &[&'static str]) -> Self {
        let message = format!(
            "Invalid {domain} option: '{raw}'\n\toptions are: [{}]",
            options.join(", ")
        );
        Self::literal(EXP0001, message, raw)
    }

    /// Create a structure error
    pub fn structure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Structure {
            code,
            message: message.into(),
            span: None,
        }
    }

    /// Attach the span of the offending node
    pub fn with_span(mut self, at: Span) -> Self {
        match &mut self {
            Self::Literal { span, .. } | Self::Structure { span, .. } => *span = Some(at),
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Literal { code, .. } | Self::Structure { code, .. } => *code,
        }
    }

    /// Get the human-readable message without the code prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Literal { message, .. } | Self::Structure { message, .. } => message,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Literal { span, .. } | Self::Structure { span, .. } => *span,
        }
    }

    /// Resolve the span against the expression text it was parsed from
    pub fn location(&self, source: &str) -> Option<SourceLocation> {
        self.span().map(|span| SourceLocation::from_span(span, source))
    }

    /// General advice for errors of this code
    pub fn help(&self) -> Option<&'static str> {
        self.code().info().help
    }

    /// Multi-line report of the error against the expression text: the
    /// message, its location when the span is known and the help text
    pub fn report(&self, source: &str) -> String {
        let mut out = self.to_string();
        if let Some(location) = self.location(source) {
            out.push_str(&format!(" at {location}"));
        }
        if let Some(help) = self.help() {
            out.push_str(&format!("\n  help: {help}"));
        }
        out
    }
}
