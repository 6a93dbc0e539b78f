//! Static value types of expression nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type a node evaluates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    Boolean,
    Date,
    String,
    /// Only known at evaluation time
    Mixed,
    /// Placeholder meaning "the type of the enclosing context"
    Same,
}

impl ValueType {
    pub const fn is_same(&self) -> bool {
        matches!(self, Self::Same)
    }

    pub const fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::String => "STRING",
            Self::Mixed => "MIXED",
            Self::Same => "SAME",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
