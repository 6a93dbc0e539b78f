//! Expression error codes following a structured numbering system
//!
//! Error code ranges:
//! - EXP0001-EXP0099: Literal errors (a node's raw text cannot be decoded)
//! - EXP0100-EXP0199: Structure errors (a decoded tree has an unexpected shape)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a literal error (0001-0099)
    pub const fn is_literal_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a structure error (0100-0199)
    pub const fn is_structure_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXP{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Literal errors (0001-0099)
    map.insert(
        1,
        ErrorInfo::new("Invalid option").with_help("The error message lists all valid options"),
    );
    map.insert(2, ErrorInfo::new("Invalid boolean literal"));
    map.insert(3, ErrorInfo::new("Invalid number literal"));
    map.insert(4, ErrorInfo::new("Invalid integer literal"));
    map.insert(5, ErrorInfo::new("Invalid date literal").with_help("Dates use the YYYY-MM-DD format"));
    map.insert(6, ErrorInfo::new("Invalid string escape sequence"));

    // Structure errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Invalid data item")
            .with_help("The first identifier group of a data item must name exactly one identifier"),
    );
    map.insert(101, ErrorInfo::new("Invalid modifier argument"));
    map.insert(102, ErrorInfo::new("Unexpected node"));
    map.insert(
        103,
        ErrorInfo::new("Modifier offset out of range")
            .with_help("Chained offsets must add up to a 32-bit integer"),
    );

    map
});

// Literal errors
pub const EXP0001: ErrorCode = ErrorCode::new(1);
pub const EXP0002: ErrorCode = ErrorCode::new(2);
pub const EXP0003: ErrorCode = ErrorCode::new(3);
pub const EXP0004: ErrorCode = ErrorCode::new(4);
pub const EXP0005: ErrorCode = ErrorCode::new(5);
pub const EXP0006: ErrorCode = ErrorCode::new(6);

// Structure errors
pub const EXP0100: ErrorCode = ErrorCode::new(100);
pub const EXP0101: ErrorCode = ErrorCode::new(101);
pub const EXP0102: ErrorCode = ErrorCode::new(102);
pub const EXP0103: ErrorCode = ErrorCode::new(103);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(EXP0001.to_string(), "EXP0001");
        assert_eq!(EXP0100.to_string(), "EXP0100");
    }

    #[test]
    fn test_error_categories() {
        assert!(EXP0001.is_literal_error());
        assert!(!EXP0001.is_structure_error());

        assert!(EXP0100.is_structure_error());
        assert!(!EXP0100.is_literal_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(EXP0005.info().description, "Invalid date literal");
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
