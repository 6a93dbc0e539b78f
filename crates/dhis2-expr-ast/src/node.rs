//! Expression tree nodes
//!
//! A [`Node`] combines the syntactic role assigned by the parser
//! ([`NodeType`]) with a decoded, typed value ([`NodeValue`]). The variant of
//! the value ([`NodeKind`]) is chosen by the parser and decides how the raw
//! source text is decoded.

use crate::literal::{decode, parse_boolean, parse_date, parse_index, parse_integer, parse_number};
use crate::{
    AggregationType, BinaryOperator, DataItem, DataItemModifier, DataItemType, NamedFunction,
    NamedValue, ProgramVariable, ReportingRateType, Tag, UnaryOperator, ValueType, VariableType,
};
use chrono::NaiveDate;
use dhis2_expr_diagnostics::{Result, Span};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Handle of a node in an [`Ast`](crate::Ast)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered list of node handles, used for children and modifiers
pub type NodeList = SmallVec<[NodeId; 4]>;

/// The syntactic role of a node, as assigned by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Par,
    Argument,
    Function,
    Modifier,
    DataItem,
    Variable,
    UnaryOperator,
    BinaryOperator,
    Boolean,
    Number,
    Integer,
    String,
    Date,
    Null,
    Uid,
    Identifier,
    NamedValue,
}

/// The node variant, which selects how raw text is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Parentheses,
    Argument,
    Function,
    Modifier,
    DataItem,
    Variable,
    Text,
    Utf8String,
    UnaryOperator,
    BinaryOperator,
    Boolean,
    Number,
    Integer,
    Date,
    Constant,
    ReportingRateType,
    ProgramVariable,
    NamedValue,
    Tag,
    AggregationType,
}

impl NodeKind {
    /// Whether nodes of this kind carry a modifier list that passes populate
    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::DataItem | Self::Variable)
    }
}

/// The decoded value of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Parentheses,
    /// Position of the argument
    Argument(usize),
    Function(NamedFunction),
    Modifier(DataItemModifier),
    DataItem(DataItemType),
    Variable(VariableType),
    Text(String),
    /// Quoted text with escapes decoded
    Utf8String(String),
    UnaryOperator(UnaryOperator),
    BinaryOperator(BinaryOperator),
    Boolean(bool),
    Number(f64),
    Integer(i32),
    Date(NaiveDate),
    /// `null`
    Constant,
    ReportingRateType(ReportingRateType),
    ProgramVariable(ProgramVariable),
    NamedValue(NamedValue),
    Tag(Tag),
    AggregationType(AggregationType),
}

impl NodeValue {
    /// Decode raw source text as a value of the given kind
    pub fn decode(kind: NodeKind, raw: &str) -> Result<Self> {
        Ok(match kind {
            NodeKind::Parentheses => Self::Parentheses,
            NodeKind::Argument => Self::Argument(parse_index(raw)?),
            NodeKind::Function => Self::Function(NamedFunction::from_symbol(raw)?),
            NodeKind::Modifier => Self::Modifier(DataItemModifier::from_symbol(raw)?),
            NodeKind::DataItem => Self::DataItem(DataItemType::from_symbol(raw)?),
            NodeKind::Variable => Self::Variable(VariableType::from_symbol(raw)?),
            NodeKind::Text => Self::Text(raw.to_string()),
            NodeKind::Utf8String => Self::Utf8String(decode(raw)?.into_owned()),
            NodeKind::UnaryOperator => Self::UnaryOperator(UnaryOperator::from_symbol(raw)?),
            NodeKind::BinaryOperator => Self::BinaryOperator(BinaryOperator::from_symbol(raw)?),
            NodeKind::Boolean => Self::Boolean(parse_boolean(raw)?),
            NodeKind::Number => Self::Number(parse_number(raw)?),
            NodeKind::Integer => Self::Integer(parse_integer(raw)?),
            NodeKind::Date => Self::Date(parse_date(raw)?),
            NodeKind::Constant => Self::Constant,
            NodeKind::ReportingRateType => {
                Self::ReportingRateType(ReportingRateType::from_symbol(raw)?)
            }
            NodeKind::ProgramVariable => Self::ProgramVariable(ProgramVariable::from_symbol(raw)?),
            NodeKind::NamedValue => Self::NamedValue(NamedValue::from_symbol(raw)?),
            NodeKind::Tag => Self::Tag(Tag::from_symbol(raw)?),
            NodeKind::AggregationType => Self::AggregationType(AggregationType::from_symbol(raw)?),
        })
    }

    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Parentheses => NodeKind::Parentheses,
            Self::Argument(_) => NodeKind::Argument,
            Self::Function(_) => NodeKind::Function,
            Self::Modifier(_) => NodeKind::Modifier,
            Self::DataItem(_) => NodeKind::DataItem,
            Self::Variable(_) => NodeKind::Variable,
            Self::Text(_) => NodeKind::Text,
            Self::Utf8String(_) => NodeKind::Utf8String,
            Self::UnaryOperator(_) => NodeKind::UnaryOperator,
            Self::BinaryOperator(_) => NodeKind::BinaryOperator,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Number(_) => NodeKind::Number,
            Self::Integer(_) => NodeKind::Integer,
            Self::Date(_) => NodeKind::Date,
            Self::Constant => NodeKind::Constant,
            Self::ReportingRateType(_) => NodeKind::ReportingRateType,
            Self::ProgramVariable(_) => NodeKind::ProgramVariable,
            Self::NamedValue(_) => NodeKind::NamedValue,
            Self::Tag(_) => NodeKind::Tag,
            Self::AggregationType(_) => NodeKind::AggregationType,
        }
    }

    pub const fn as_function(&self) -> Option<NamedFunction> {
        match self {
            Self::Function(function) => Some(*function),
            _ => None,
        }
    }

    pub const fn as_modifier(&self) -> Option<DataItemModifier> {
        match self {
            Self::Modifier(modifier) => Some(*modifier),
            _ => None,
        }
    }

    /// The text of `Text` and `Utf8String` values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Utf8String(text) => Some(text),
            _ => None,
        }
    }
}

/// Whitespace found around a node in the source.
///
/// `None` means the parser recorded nothing, in which case renderers use
/// their own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitespace {
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Whitespace {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: Some(before.into()),
            after: Some(after.into()),
        }
    }

    pub fn before_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.before.as_deref().unwrap_or(default)
    }

    pub fn after_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.after.as_deref().unwrap_or(default)
    }
}

/// A node of the expression tree.
///
/// Children and modifiers are handles into the owning [`Ast`](crate::Ast).
#[derive(Debug, Clone)]
pub struct Node {
    node_type: NodeType,
    raw: String,
    value: NodeValue,
    span: Span,
    whitespace: Whitespace,
    pub(crate) children: NodeList,
    pub(crate) modifiers: NodeList,
    /// Variable type supplied after construction
    pub(crate) actual_value_type: Option<ValueType>,
    /// Assembled on first request, see [`Ast::to_data_item`](crate::Ast::to_data_item)
    pub(crate) data_item: OnceCell<DataItem>,
}

impl Node {
    /// Create a node, decoding `raw` according to `kind`.
    ///
    /// Fails without creating a node if `raw` is not a valid literal of the
    /// kind.
    pub fn new(node_type: NodeType, kind: NodeKind, raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let value = NodeValue::decode(kind, &raw)?;
        Ok(Self::with_value(node_type, raw, value))
    }

    fn with_value(node_type: NodeType, raw: String, value: NodeValue) -> Self {
        Self {
            node_type,
            raw,
            value,
            span: Span::default(),
            whitespace: Whitespace::default(),
            children: NodeList::new(),
            modifiers: NodeList::new(),
            actual_value_type: None,
            data_item: OnceCell::new(),
        }
    }

    /// A parentheses node, also used as the tree root
    pub fn parentheses() -> Self {
        Self::with_value(NodeType::Par, String::new(), NodeValue::Parentheses)
    }

    /// A modifier node for a known modifier
    pub fn modifier(modifier: DataItemModifier) -> Self {
        Self::with_value(
            NodeType::Modifier,
            modifier.symbol().to_string(),
            NodeValue::Modifier(modifier),
        )
    }

    /// An argument node for a known position
    pub fn argument(index: usize) -> Self {
        Self::with_value(NodeType::Argument, index.to_string(), NodeValue::Argument(index))
    }

    /// A text node, its raw value is taken verbatim
    pub fn text(node_type: NodeType, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_value(node_type, text.clone(), NodeValue::Text(text))
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn set_whitespace(&mut self, whitespace: Whitespace) {
        self.whitespace = whitespace;
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    /// The source text the value was decoded from
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn whitespace(&self) -> &Whitespace {
        &self.whitespace
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn size(&self) -> usize {
        self.children.len()
    }

    /// Modifiers attached by [`propagate_modifiers`](crate::propagate_modifiers)
    /// and [`supply_sub_expression_tags`](crate::supply_sub_expression_tags)
    pub fn modifiers(&self) -> &[NodeId] {
        &self.modifiers
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self.value, NodeValue::Modifier(_))
    }

    pub fn is_data_item(&self) -> bool {
        matches!(self.value, NodeValue::DataItem(_))
    }

    /// A `V{...}` variable
    pub fn is_program_variable(&self) -> bool {
        matches!(self.value, NodeValue::Variable(t) if t.is_program())
    }
}
