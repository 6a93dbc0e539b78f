//! The expression tree arena
//!
//! Nodes live in one `Vec` owned by [`Ast`] and refer to each other through
//! [`NodeId`] handles. A node may be attached as modifier to several data
//! items, which handles express without shared ownership.

use crate::{Node, NodeId, NodeList, NodeValue, ValueType};
use dhis2_expr_diagnostics::{EXP0102, ExprError, Result};
use std::ops::Index;

/// An expression tree
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Create a tree consisting of its root node
    pub fn new(root: Node) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including detached ones
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Add a node without attaching it anywhere
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: Node) -> NodeId {
        let id = self.add(child);
        self.attach(parent, id);
        id
    }

    /// Append an existing node to the children of `parent`
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }

    /// Append an existing modifier node to the modifier list of `target`
    pub fn add_modifier(&mut self, target: NodeId, modifier: NodeId) {
        self.nodes[target.index()].modifiers.push(modifier);
    }

    /// The child of `id` at `index`
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self[id].children.get(index).copied()
    }

    /// Supply the value type of a variable, known only once its definition
    /// is resolved
    pub fn set_actual_value_type(&mut self, id: NodeId, value_type: ValueType) -> Result<()> {
        let node = &mut self.nodes[id.index()];
        if !matches!(node.value(), NodeValue::Variable(_)) {
            return Err(ExprError::structure(
                EXP0102,
                format!("Only variables have an actual value type, found {:?}", node.kind()),
            )
            .with_span(node.span()));
        }
        node.actual_value_type = Some(value_type);
        Ok(())
    }

    /// Pre-order iteration over `start` and its descendants, children in
    /// order. Modifier lists are not descended into.
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            ast: self,
            stack: vec![start],
        }
    }

    /// Apply `action` to every node in the subtree of `start` that matches
    /// `filter`, in document order
    pub fn visit<F, A>(&self, start: NodeId, filter: F, mut action: A)
    where
        F: Fn(&Node) -> bool,
        A: FnMut(NodeId, &Node),
    {
        for id in self.descendants(start) {
            let node = &self[id];
            if filter(node) {
                action(id, node);
            }
        }
    }

    /// The first node in document order matching `filter`
    pub fn find(&self, start: NodeId, filter: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.descendants(start).find(|&id| filter(&self[id]))
    }

    pub fn exists(&self, start: NodeId, filter: impl Fn(&Node) -> bool) -> bool {
        self.find(start, filter).is_some()
    }

    /// All nodes in document order matching `filter`
    pub fn collect(&self, start: NodeId, filter: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.descendants(start).filter(|&id| filter(&self[id])).collect()
    }

    /// Rewrite child lists top-down.
    ///
    /// `rewriter` receives a node and its current children and returns the
    /// replacement child list. The replacement children are rewritten after
    /// their parent, in document order.
    pub fn rewrite<F>(&mut self, start: NodeId, rewriter: &mut F)
    where
        F: FnMut(&mut Ast, NodeId, NodeList) -> NodeList,
    {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let children = std::mem::take(&mut self.nodes[id.index()].children);
            let rewritten = rewriter(self, id, children);
            stack.extend(rewritten.iter().rev().copied());
            self.nodes[id.index()].children = rewritten;
        }
    }

    /// The static value type of a node
    pub fn value_type(&self, id: NodeId) -> ValueType {
        let node = &self[id];
        let first = || {
            node.children
                .first()
                .map_or(ValueType::Mixed, |&child| self.value_type(child))
        };
        match node.value() {
            NodeValue::Boolean(_) => ValueType::Boolean,
            NodeValue::Number(_) | NodeValue::Integer(_) => ValueType::Number,
            NodeValue::Date(_) => ValueType::Date,
            NodeValue::Text(_)
            | NodeValue::Utf8String(_)
            | NodeValue::ReportingRateType(_)
            | NodeValue::ProgramVariable(_)
            | NodeValue::NamedValue(_)
            | NodeValue::Tag(_)
            | NodeValue::AggregationType(_) => ValueType::String,
            NodeValue::Constant => ValueType::Same,
            NodeValue::Parentheses => first(),
            NodeValue::Argument(_) if node.size() == 1 => first(),
            NodeValue::Argument(_) | NodeValue::DataItem(_) => ValueType::Mixed,
            NodeValue::Variable(_) => node.actual_value_type.unwrap_or(ValueType::Mixed),
            NodeValue::Modifier(modifier) => modifier.value_type(),
            NodeValue::BinaryOperator(op) => op.value_type(),
            NodeValue::UnaryOperator(op) => match op.value_type() {
                ValueType::Same => first(),
                other => other,
            },
            NodeValue::Function(function) => match function.value_type() {
                ValueType::Same => function
                    .parameter_types()
                    .iter()
                    .position(ValueType::is_same)
                    .and_then(|index| node.children.get(index))
                    .map_or(ValueType::Mixed, |&child| self.value_type(child)),
                other => other,
            },
        }
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator returned by [`Ast::descendants`]
pub struct Descendants<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.ast[id].children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, NodeType};

    fn node(node_type: NodeType, kind: NodeKind, raw: &str) -> Node {
        Node::new(node_type, kind, raw).unwrap()
    }

    /// `1 + 2 * 3`
    fn arithmetic() -> Ast {
        let mut ast = Ast::new(node(NodeType::Par, NodeKind::Parentheses, ""));
        let add = ast.add_child(ast.root(), node(NodeType::BinaryOperator, NodeKind::BinaryOperator, "+"));
        ast.add_child(add, node(NodeType::Number, NodeKind::Number, "1"));
        let mul = ast.add_child(add, node(NodeType::BinaryOperator, NodeKind::BinaryOperator, "*"));
        ast.add_child(mul, node(NodeType::Number, NodeKind::Number, "2"));
        ast.add_child(mul, node(NodeType::Number, NodeKind::Number, "3"));
        ast
    }

    #[test]
    fn test_descendants_in_document_order() {
        let ast = arithmetic();
        let raws: Vec<_> = ast
            .descendants(ast.root())
            .map(|id| ast[id].raw_value().to_string())
            .collect();
        assert_eq!(raws, ["", "+", "1", "*", "2", "3"]);
    }

    #[test]
    fn test_find_and_collect() {
        let ast = arithmetic();
        let is_number = |n: &Node| n.node_type() == NodeType::Number;
        let first = ast.find(ast.root(), is_number).unwrap();
        assert_eq!(ast[first].raw_value(), "1");
        assert_eq!(ast.collect(ast.root(), is_number).len(), 3);
        assert!(!ast.exists(ast.root(), |n| n.is_data_item()));
    }

    #[test]
    fn test_rewrite_parents_before_children() {
        let mut ast = arithmetic();
        let mut seen = Vec::new();
        ast.rewrite(ast.root(), &mut |ast, id, children| {
            seen.push(ast[id].raw_value().to_string());
            children
        });
        assert_eq!(seen, ["", "+", "1", "*", "2", "3"]);
    }

    #[test]
    fn test_value_type_of_parentheses_follows_content() {
        let ast = arithmetic();
        assert_eq!(ast.value_type(ast.root()), ValueType::Number);
    }

    #[test]
    fn test_actual_value_type_only_for_variables() {
        let mut ast = arithmetic();
        let err = ast.set_actual_value_type(ast.root(), ValueType::Date).unwrap_err();
        assert_eq!(err.code(), EXP0102);

        let var = ast.add_child(ast.root(), node(NodeType::Variable, NodeKind::Variable, "#"));
        assert_eq!(ast.value_type(var), ValueType::Mixed);
        ast.set_actual_value_type(var, ValueType::Date).unwrap();
        assert_eq!(ast.value_type(var), ValueType::Date);
    }
}
