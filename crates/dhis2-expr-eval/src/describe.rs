//! Rendering a tree back into expression text
//!
//! Three renderings share one walker:
//! - the normalised form, with whitespace as parsed or canonical defaults
//! - the display form, with UIDs and variable names replaced by display names
//! - the value form, with data items replaced by their values

use crate::value::Value;
use dhis2_expr_ast::{Ast, DataItem, NodeId, NodeType, NodeValue, Tag};
use dhis2_expr_diagnostics::Result;
use std::collections::HashMap;

/// Walks a tree and appends its text form
pub struct Describer<'a> {
    ast: &'a Ast,
    data_item_values: Option<&'a HashMap<DataItem, Value>>,
    display_names: Option<&'a HashMap<String, String>>,
    out: String,
}

impl<'a> Describer<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            data_item_values: None,
            display_names: None,
            out: String::new(),
        }
    }

    /// Render data items that have a value as that value
    pub fn with_data_item_values(mut self, values: &'a HashMap<DataItem, Value>) -> Self {
        self.data_item_values = Some(values);
        self
    }

    /// Render UIDs and variable names that have a display name as that name
    pub fn with_display_names(mut self, names: &'a HashMap<String, String>) -> Self {
        self.display_names = Some(names);
        self
    }

    /// Render the whole tree
    pub fn describe(mut self) -> Result<String> {
        let ast = self.ast;
        let root = ast.root();
        let whitespace = ast[root].whitespace();
        self.out.push_str(whitespace.before_or(""));
        self.children(root, "")?;
        self.out.push_str(whitespace.after_or(""));
        Ok(self.out)
    }

    fn node(&mut self, id: NodeId) -> Result<()> {
        let ast = self.ast;
        let node = &ast[id];
        let whitespace = node.whitespace();
        match node.node_type() {
            NodeType::Par => {
                self.out.push_str(whitespace.before_or(""));
                self.out.push('(');
                self.children(id, "")?;
                self.out.push(')');
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::Argument => {
                self.out.push_str(whitespace.before_or(""));
                let mut previous: Option<NodeType> = None;
                for &child in node.children() {
                    let current = ast[child].node_type();
                    if previous == Some(NodeType::Uid) && current == NodeType::Uid {
                        self.out.push('&');
                    }
                    self.node(child)?;
                    previous = Some(current);
                }
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::BinaryOperator => {
                self.optional_child(id, 0)?;
                self.out.push_str(whitespace.before_or(" "));
                self.out.push_str(node.raw_value());
                self.out.push_str(whitespace.after_or(" "));
                self.optional_child(id, 1)?;
            }
            NodeType::UnaryOperator => {
                let raw = node.raw_value();
                let default = if raw.starts_with(char::is_alphabetic) { " " } else { "" };
                self.out.push_str(whitespace.before_or(default));
                self.out.push_str(raw);
                self.out.push_str(whitespace.after_or(default));
                self.optional_child(id, 0)?;
            }
            NodeType::Function => {
                self.out.push_str(whitespace.before_or(""));
                if let Some(function) = node.value().as_function() {
                    self.out.push_str(function.symbol());
                }
                self.out.push('(');
                self.children(id, ",")?;
                self.out.push(')');
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::Modifier => {
                self.out.push_str(whitespace.before_or(""));
                self.out.push('.');
                if let Some(modifier) = node.value().as_modifier() {
                    self.out.push_str(modifier.symbol());
                }
                self.out.push('(');
                self.children(id, ",")?;
                self.out.push(')');
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::DataItem => {
                self.out.push_str(whitespace.before_or(""));
                let item = ast.to_data_item(id)?;
                match self.data_item_values.and_then(|values| values.get(item)) {
                    Some(value) => self.out.push_str(&value.to_string()),
                    None => self.data_item(id)?,
                }
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::Variable => {
                self.out.push_str(whitespace.before_or(""));
                self.variable(id)?;
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::NamedValue => {
                self.value(id, &format!("[{}]", node.raw_value()));
            }
            NodeType::String => {
                self.value(id, &format!("'{}'", node.raw_value()));
            }
            NodeType::Null => self.value(id, "null"),
            NodeType::Boolean | NodeType::Number | NodeType::Integer | NodeType::Date => {
                self.value(id, node.raw_value());
            }
            NodeType::Identifier => {
                self.out.push_str(whitespace.before_or(""));
                self.out.push_str(node.raw_value());
                if matches!(node.value(), NodeValue::Tag(_)) {
                    self.out.push(':');
                }
                self.out.push_str(whitespace.after_or(""));
            }
            NodeType::Uid => {
                let uid = node.value().as_str().unwrap_or(node.raw_value());
                let uid = self.display_name(uid).unwrap_or(uid);
                self.value(id, uid);
            }
        }
        Ok(())
    }

    fn children(&mut self, id: NodeId, separator: &str) -> Result<()> {
        let ast = self.ast;
        for (i, &child) in ast[id].children().iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.node(child)?;
        }
        Ok(())
    }

    fn optional_child(&mut self, id: NodeId, index: usize) -> Result<()> {
        match self.ast.child(id, index) {
            Some(child) => self.node(child),
            None => Ok(()),
        }
    }

    fn value(&mut self, id: NodeId, text: &str) {
        let ast = self.ast;
        let whitespace = ast[id].whitespace();
        self.out.push_str(whitespace.before_or(""));
        self.out.push_str(text);
        self.out.push_str(whitespace.after_or(""));
    }

    fn data_item(&mut self, id: NodeId) -> Result<()> {
        let ast = self.ast;
        let node = &ast[id];
        let event_date = ast
            .child(id, 0)
            .and_then(|slot| ast.child(slot, 0))
            .is_some_and(|first| matches!(ast[first].value(), NodeValue::Tag(Tag::PsEventDate)));
        if !event_date {
            self.out.push_str(node.raw_value());
            self.out.push('{');
        }
        self.children(id, ".")?;
        if !event_date {
            self.out.push('}');
        }
        self.modifiers(id)
    }

    fn variable(&mut self, id: NodeId) -> Result<()> {
        let ast = self.ast;
        if let Some(name) = ast
            .child(id, 0)
            .and_then(|name| self.display_name(ast[name].raw_value()))
        {
            self.out.push_str(name);
            return Ok(());
        }
        let symbol = ast[id].raw_value();
        if !symbol.is_empty() {
            self.out.push_str(symbol);
            self.out.push('{');
        }
        self.optional_child(id, 0)?;
        if !symbol.is_empty() {
            self.out.push('}');
        }
        self.modifiers(id)
    }

    /// Modifiers written in the source; those added by the tree passes are
    /// skipped
    fn modifiers(&mut self, id: NodeId) -> Result<()> {
        let ast = self.ast;
        for &modifier in ast[id].modifiers() {
            let synthetic = ast[modifier]
                .value()
                .as_modifier()
                .is_some_and(|modifier| modifier.is_synthetic());
            if !synthetic {
                self.node(modifier)?;
            }
        }
        Ok(())
    }

    fn display_name(&self, key: &str) -> Option<&'a str> {
        self.display_names
            .and_then(|names| names.get(key))
            .map(String::as_str)
    }
}
