//! Incremental tree construction
//!
//! [`AstBuilder`] keeps a stack of open nodes: `start_*` methods add a node
//! under the innermost open node and open it, leaf methods add a node without
//! opening it, and [`AstBuilder::finish_node`] closes the innermost open node.
//! The first decoding failure is kept and reported by [`AstBuilder::build`];
//! later calls are ignored.
//!
//! ```
//! use dhis2_expr_ast::{AstBuilder, ValueType};
//!
//! // avg(#{u1234567890})
//! let mut builder = AstBuilder::new();
//! builder
//!     .start_function("avg")
//!     .start_argument(0)
//!     .data_item("#", &[&["u1234567890"]])
//!     .finish_node()
//!     .finish_node();
//! let ast = builder.build().unwrap();
//! assert_eq!(ast.value_type(ast.root()), ValueType::Number);
//! ```

use crate::{Ast, Node, NodeId, NodeKind, NodeType, Whitespace};
use dhis2_expr_diagnostics::{ExprError, Result, Span};

/// Builds an [`Ast`] under a parentheses root node
#[derive(Debug)]
pub struct AstBuilder {
    ast: Ast,
    open: Vec<NodeId>,
    last: Option<NodeId>,
    error: Option<ExprError>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::with_root(Node::parentheses())
    }

    pub fn with_root(root: Node) -> Self {
        let ast = Ast::new(root);
        let open = vec![ast.root()];
        Self {
            ast,
            open,
            last: None,
            error: None,
        }
    }

    fn push(&mut self, node: Result<Node>, start: bool) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match node {
            Ok(node) => {
                let parent = self.current();
                let id = self.ast.add_child(parent, node);
                self.last = Some(id);
                if start {
                    self.open.push(id);
                }
            }
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// The innermost open node
    pub fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.ast.root())
    }

    /// Add a node and open it
    pub fn start_node(&mut self, node_type: NodeType, kind: NodeKind, raw: &str) -> &mut Self {
        self.push(Node::new(node_type, kind, raw), true)
    }

    /// Add an already constructed node and open it
    pub fn start(&mut self, node: Node) -> &mut Self {
        self.push(Ok(node), true)
    }

    /// Add a node without opening it
    pub fn leaf_node(&mut self, node_type: NodeType, kind: NodeKind, raw: &str) -> &mut Self {
        self.push(Node::new(node_type, kind, raw), false)
    }

    /// Add an already constructed node without opening it
    pub fn leaf(&mut self, node: Node) -> &mut Self {
        self.push(Ok(node), false)
    }

    /// Close the innermost open node. The root is never closed.
    pub fn finish_node(&mut self) -> &mut Self {
        if self.open.len() > 1 {
            self.open.pop();
        }
        self
    }

    /// Finish building, reporting the first decoding failure
    pub fn build(self) -> Result<Ast> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.ast),
        }
    }

    pub fn start_par(&mut self) -> &mut Self {
        self.start_node(NodeType::Par, NodeKind::Parentheses, "")
    }

    pub fn start_function(&mut self, name: &str) -> &mut Self {
        self.start_node(NodeType::Function, NodeKind::Function, name)
    }

    pub fn start_argument(&mut self, index: usize) -> &mut Self {
        self.start(Node::argument(index))
    }

    pub fn start_modifier(&mut self, name: &str) -> &mut Self {
        self.start_node(NodeType::Modifier, NodeKind::Modifier, name)
    }

    pub fn start_data_item(&mut self, symbol: &str) -> &mut Self {
        self.start_node(NodeType::DataItem, NodeKind::DataItem, symbol)
    }

    pub fn start_variable(&mut self, symbol: &str) -> &mut Self {
        self.start_node(NodeType::Variable, NodeKind::Variable, symbol)
    }

    pub fn start_unary(&mut self, operator: &str) -> &mut Self {
        self.start_node(NodeType::UnaryOperator, NodeKind::UnaryOperator, operator)
    }

    /// Binary operators are written with a single space on both sides
    pub fn start_binary(&mut self, operator: &str) -> &mut Self {
        let node = Node::new(NodeType::BinaryOperator, NodeKind::BinaryOperator, operator)
            .map(|node| node.with_whitespace(Whitespace::new(" ", " ")));
        self.push(node, true)
    }

    pub fn number(&mut self, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::Number, NodeKind::Number, raw)
    }

    pub fn integer(&mut self, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::Integer, NodeKind::Integer, raw)
    }

    pub fn boolean(&mut self, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::Boolean, NodeKind::Boolean, raw)
    }

    /// A quoted string, `raw` is the text between the quotes
    pub fn string(&mut self, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::String, NodeKind::Utf8String, raw)
    }

    pub fn date(&mut self, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::Date, NodeKind::Date, raw)
    }

    pub fn null(&mut self) -> &mut Self {
        self.leaf_node(NodeType::Null, NodeKind::Constant, "null")
    }

    pub fn uid(&mut self, raw: &str) -> &mut Self {
        self.leaf(Node::text(NodeType::Uid, raw))
    }

    pub fn identifier(&mut self, kind: NodeKind, raw: &str) -> &mut Self {
        self.leaf_node(NodeType::Identifier, kind, raw)
    }

    /// `[name]`
    pub fn named_value(&mut self, name: &str) -> &mut Self {
        self.leaf_node(NodeType::NamedValue, NodeKind::NamedValue, name)
    }

    /// A data item whose id groups hold plain UIDs, e.g. `#{de.coc}` as
    /// `data_item("#", &[&["de"], &["coc"]])`
    pub fn data_item(&mut self, symbol: &str, groups: &[&[&str]]) -> &mut Self {
        self.start_data_item(symbol);
        for (index, uids) in groups.iter().enumerate() {
            self.start_argument(index);
            for uid in *uids {
                self.uid(uid);
            }
            self.finish_node();
        }
        self.finish_node()
    }

    /// `V{name}`
    pub fn program_variable(&mut self, name: &str) -> &mut Self {
        self.start_variable("V")
            .identifier(NodeKind::ProgramVariable, name)
            .finish_node()
    }

    /// A program rule variable reference such as `#{name}` or `A{name}`
    pub fn rule_variable(&mut self, symbol: &str, name: &str) -> &mut Self {
        self.start_variable(symbol)
            .leaf(Node::text(NodeType::Identifier, name))
            .finish_node()
    }

    /// Attach `span` to the most recently added node
    pub fn with_span(&mut self, span: Span) -> &mut Self {
        if let Some(last) = self.last {
            self.ast.node_mut(last).set_span(span);
        }
        self
    }

    /// Attach `whitespace` to the most recently added node
    pub fn with_whitespace(&mut self, whitespace: Whitespace) -> &mut Self {
        if let Some(last) = self.last {
            self.ast.node_mut(last).set_whitespace(whitespace);
        }
        self
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}
