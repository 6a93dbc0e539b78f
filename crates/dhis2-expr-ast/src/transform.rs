//! Tree transformations run once after parsing
//!
//! [`supply_sub_expression_tags`] runs before [`propagate_modifiers`]: the
//! tags it attaches are ordinary modifiers and fold like any other.

use crate::{Ast, DataItemModifier, NamedFunction, Node, NodeId, NodeList, NodeType};
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};

static SESSIONS: AtomicU64 = AtomicU64::new(1);

/// Source of sub-expression correlation tags.
///
/// Tags are unique within the process: every generator draws a fresh
/// session number and numbers its tags within that session.
#[derive(Debug)]
pub struct TagGenerator {
    session: u64,
    issued: u64,
}

impl TagGenerator {
    pub fn new() -> Self {
        Self {
            session: SESSIONS.fetch_add(1, Ordering::Relaxed),
            issued: 0,
        }
    }

    pub fn next_tag(&mut self) -> String {
        self.issued += 1;
        format!("@{}.{}", self.session, self.issued)
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tag the data items inside every `subExpression(...)` call.
///
/// All data items of one call share one tag and distinct calls get distinct
/// tags. The tag is attached as a synthetic `subExpression` modifier.
pub fn supply_sub_expression_tags(ast: &mut Ast, tags: &mut TagGenerator) {
    let root = ast.root();
    ast.rewrite(root, &mut |ast, id, children| {
        if ast[id].value().as_function() != Some(NamedFunction::SubExpression) {
            return children;
        }
        let items: Vec<NodeId> = children
            .iter()
            .flat_map(|&child| ast.collect(child, Node::is_data_item))
            .collect();
        if items.is_empty() {
            return children;
        }
        let tag = tags.next_tag();
        debug!("tagging {} data item(s) of sub-expression with {tag}", items.len());
        let modifier = sub_expression_modifier(ast, tag);
        for item in items {
            ast.add_modifier(item, modifier);
        }
        children
    });
}

/// A `subExpression("<tag>")` modifier node
fn sub_expression_modifier(ast: &mut Ast, tag: String) -> NodeId {
    let modifier = ast.add(Node::modifier(DataItemModifier::SubExpression));
    let arg = ast.add_child(modifier, Node::argument(0));
    ast.add_child(arg, Node::text(NodeType::String, tag));
    modifier
}

/// Move modifiers onto the data items and program variables they qualify.
///
/// Works top-down over every child list. A modifier qualifies the nearest
/// preceding sibling that is not itself a modifier, and is attached to every
/// data item and program variable in that sibling's subtree, in order. The
/// modifier nodes are then removed from the child list. A modifier with no
/// such sibling is dropped.
///
/// Data items inside aggregating functions additionally receive a synthetic
/// `periodAggregation` modifier.
pub fn propagate_modifiers(ast: &mut Ast) {
    let root = ast.root();
    ast.rewrite(root, &mut |ast, id, children| {
        if ast[id].value().as_function().is_some_and(|f| f.is_aggregating()) {
            mark_period_aggregation(ast, &children);
        }
        if !children.iter().any(|&child| ast[child].is_modifier()) {
            return children;
        }
        for (index, &modifier) in children.iter().enumerate() {
            if !ast[modifier].is_modifier() {
                continue;
            }
            let target = children[..index]
                .iter()
                .rev()
                .find(|&&sibling| !ast[sibling].is_modifier());
            let Some(&target) = target else {
                debug!(
                    "dropping modifier '{}' with no preceding operand",
                    ast[modifier].raw_value()
                );
                continue;
            };
            let qualified = ast.collect(target, |node| {
                node.is_data_item() || node.is_program_variable()
            });
            trace!(
                "attaching '{}' to {} node(s)",
                ast[modifier].raw_value(),
                qualified.len()
            );
            for node in qualified {
                ast.add_modifier(node, modifier);
            }
        }
        children
            .into_iter()
            .filter(|&child| !ast[child].is_modifier())
            .collect::<NodeList>()
    });
}

fn mark_period_aggregation(ast: &mut Ast, children: &[NodeId]) {
    let items: Vec<NodeId> = children
        .iter()
        .flat_map(|&child| ast.collect(child, Node::is_data_item))
        .collect();
    if items.is_empty() {
        return;
    }
    let modifier = ast.add(Node::modifier(DataItemModifier::PeriodAggregation));
    for item in items {
        ast.add_modifier(item, modifier);
    }
}
