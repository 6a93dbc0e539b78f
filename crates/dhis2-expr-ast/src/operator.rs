//! Unary and binary operators

use crate::ValueType;

symbol_enum! {
    /// Prefix operators
    pub enum UnaryOperator {
        /// Numeric identity
        Plus = "+",
        /// Numeric negation
        Minus = "-",
        /// Logical not
        Not = "!",
        /// Logical not, word form
        NotWord = "not",
    }
}

impl UnaryOperator {
    /// The declared result type; `Same` forwards the operand type
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Plus => ValueType::Same,
            Self::Minus => ValueType::Number,
            Self::Not | Self::NotWord => ValueType::Boolean,
        }
    }
}

symbol_enum! {
    /// Infix operators, listed from highest to lowest precedence
    pub enum BinaryOperator {
        /// Power/exponentiation
        Exp = "^",
        Mul = "*",
        Div = "/",
        Mod = "%",
        Add = "+",
        Sub = "-",
        Lt = "<",
        Gt = ">",
        Le = "<=",
        Ge = ">=",
        Eq = "==",
        Neq = "!=",
        And = "&&",
        /// Logical and, word form
        AndWord = "and",
        Or = "||",
        /// Logical or, word form
        OrWord = "or",
    }
}

impl BinaryOperator {
    /// Get the precedence level (higher binds tighter)
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Exp => 6,
            Self::Mul | Self::Div | Self::Mod => 5,
            Self::Add | Self::Sub => 4,
            Self::Lt | Self::Gt | Self::Le | Self::Ge => 3,
            Self::Eq | Self::Neq => 2,
            Self::And | Self::AndWord => 1,
            Self::Or | Self::OrWord => 0,
        }
    }

    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Exp | Self::Mul | Self::Div | Self::Mod | Self::Add | Self::Sub
        )
    }

    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq | Self::Neq
        )
    }

    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::AndWord | Self::Or | Self::OrWord)
    }

    /// The declared result type
    pub const fn value_type(&self) -> ValueType {
        if self.is_arithmetic() {
            ValueType::Number
        } else {
            ValueType::Boolean
        }
    }
}
