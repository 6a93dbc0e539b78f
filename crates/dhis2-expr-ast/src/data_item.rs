//! Assembly of data item and variable descriptors from the tree

use crate::{
    Ast, DataItemModifier, DataItemType, IdType, NodeId, NodeType, NodeValue, ProgramVariable,
    QueryModifiers,
};
use dhis2_expr_diagnostics::{EXP0100, EXP0101, EXP0102, EXP0103, ExprError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id {
    pub id_type: IdType,
    pub value: String,
}

impl Id {
    pub fn new(id_type: IdType, value: impl Into<String>) -> Self {
        Self {
            id_type,
            value: value.into(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A data item reference with its effective modifiers.
///
/// Two references are the same data item exactly when all fields are equal,
/// so `DataItem` is suitable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataItem {
    pub item_type: DataItemType,
    /// The primary identifier
    pub uid0: Id,
    /// Identifiers of the second id group
    pub uid1: Vec<Id>,
    /// Identifiers of the third id group
    pub uid2: Vec<Id>,
    pub query_mods: QueryModifiers,
}

impl DataItem {
    pub fn new(item_type: DataItemType, uid0: Id) -> Self {
        Self {
            item_type,
            uid0,
            uid1: Vec::new(),
            uid2: Vec::new(),
            query_mods: QueryModifiers::default(),
        }
    }

    pub fn with_uid1(mut self, ids: Vec<Id>) -> Self {
        self.uid1 = ids;
        self
    }

    pub fn with_uid2(mut self, ids: Vec<Id>) -> Self {
        self.uid2 = ids;
        self
    }

    pub fn with_query_mods(mut self, query_mods: QueryModifiers) -> Self {
        self.query_mods = query_mods;
        self
    }

    /// All identifiers, primary first
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        std::iter::once(&self.uid0)
            .chain(self.uid1.iter())
            .chain(self.uid2.iter())
    }
}

/// A program variable reference with its effective modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub variable: ProgramVariable,
    pub query_mods: QueryModifiers,
}

impl Ast {
    /// The data item described by a `DataItem` node.
    ///
    /// The descriptor is assembled on first request and reused afterwards,
    /// so modifiers attached later are not reflected.
    pub fn to_data_item(&self, id: NodeId) -> Result<&DataItem> {
        let node = &self[id];
        let NodeValue::DataItem(item_type) = node.value() else {
            return Err(ExprError::structure(
                EXP0102,
                format!("Expected a data item but found {:?}", node.kind()),
            )
            .with_span(node.span()));
        };
        node.data_item
            .get_or_try_init(|| self.assemble_data_item(id, *item_type))
    }

    fn assemble_data_item(&self, id: NodeId, item_type: DataItemType) -> Result<DataItem> {
        let node = &self[id];
        let size = node.size();
        if size > 3 {
            return Err(ExprError::structure(
                EXP0100,
                format!("Data item '{item_type}' has {size} id groups, at most 3 are supported"),
            )
            .with_span(node.span()));
        }

        let mut groups: [Vec<Id>; 3] = Default::default();
        for (index, &arg) in node.children().iter().enumerate() {
            groups[index] = self.id_group(arg, item_type.id_type(size, index));
        }
        let [uid0, uid1, uid2] = groups;

        let mut primary = uid0.into_iter();
        let (Some(uid0), None) = (primary.next(), primary.next()) else {
            return Err(ExprError::structure(
                EXP0100,
                format!("Data item '{item_type}' must have exactly one primary identifier"),
            )
            .with_span(node.span()));
        };

        Ok(DataItem::new(item_type, uid0)
            .with_uid1(uid1)
            .with_uid2(uid2)
            .with_query_mods(self.query_modifiers(id)?))
    }

    /// The identifiers of one id group. A leading tag replaces the default
    /// identifier type.
    fn id_group(&self, arg: NodeId, default_type: IdType) -> Vec<Id> {
        let leading = self.child(arg, 0).map(|child| &self[child]);
        let tag = leading.and_then(|node| match node.value() {
            NodeValue::Tag(tag) if node.node_type() == NodeType::Identifier => Some(*tag),
            _ => None,
        });
        let id_type = tag.map_or(default_type, |tag| tag.id_type());

        let mut ids: Vec<Id> = self
            .descendants(arg)
            .filter(|&child| self[child].node_type() == NodeType::Uid)
            .map(|child| Id::new(id_type, self[child].raw_value()))
            .collect();
        let bare = leading.filter(|node| ids.is_empty() && node.node_type() == NodeType::Identifier);
        ids.extend(bare.map(|node| Id::new(id_type, node.raw_value())));
        ids
    }

    /// The program variable described by a `Variable` node, or `None` for
    /// program rule variables
    pub fn to_variable(&self, id: NodeId) -> Result<Option<Variable>> {
        let node = &self[id];
        let NodeValue::Variable(variable_type) = node.value() else {
            return Err(ExprError::structure(
                EXP0102,
                format!("Expected a variable but found {:?}", node.kind()),
            )
            .with_span(node.span()));
        };
        if !variable_type.is_program() {
            return Ok(None);
        }
        let name = self.child(id, 0).map(|child| self[child].value());
        let Some(NodeValue::ProgramVariable(variable)) = name else {
            return Err(ExprError::structure(
                EXP0102,
                "Program variable reference does not name a program variable",
            )
            .with_span(node.span()));
        };
        Ok(Some(Variable {
            variable: *variable,
            query_mods: self.query_modifiers(id)?,
        }))
    }

    /// Fold the modifier list of a node, in attachment order, starting from
    /// the default settings
    pub fn query_modifiers(&self, id: NodeId) -> Result<QueryModifiers> {
        self[id]
            .modifiers()
            .iter()
            .try_fold(QueryModifiers::default(), |mods, &modifier| {
                self.fold_modifier(mods, modifier)
            })
    }

    fn fold_modifier(&self, mods: QueryModifiers, id: NodeId) -> Result<QueryModifiers> {
        let node = &self[id];
        let Some(modifier) = node.value().as_modifier() else {
            return Err(ExprError::structure(
                EXP0102,
                format!("Expected a modifier but found {:?}", node.kind()),
            )
            .with_span(node.span()));
        };
        let payload = || self.modifier_payload(id, modifier);
        Ok(match modifier {
            DataItemModifier::AggregationType => match payload()? {
                NodeValue::AggregationType(aggregation_type) => {
                    mods.with_aggregation_type(*aggregation_type)
                }
                _ => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::MaxDate => match payload()? {
                NodeValue::Date(date) => mods.with_max_date(*date),
                _ => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::MinDate => match payload()? {
                NodeValue::Date(date) => mods.with_min_date(*date),
                _ => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::PeriodOffset => match payload()? {
                NodeValue::Integer(offset) => mods
                    .with_period_offset(*offset)
                    .ok_or_else(|| self.offset_overflow(id, modifier))?,
                _ => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::StageOffset => match payload()? {
                NodeValue::Integer(offset) => mods
                    .with_stage_offset(*offset)
                    .ok_or_else(|| self.offset_overflow(id, modifier))?,
                _ => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::SubExpression => match payload()?.as_str() {
                Some(tag) => mods.with_sub_expression(tag),
                None => return Err(self.invalid_payload(id, modifier)),
            },
            DataItemModifier::YearToDate => mods.with_year_to_date(),
            DataItemModifier::PeriodAggregation => mods.with_period_aggregation(),
        })
    }

    /// The value of the first argument of a modifier
    fn modifier_payload(&self, id: NodeId, modifier: DataItemModifier) -> Result<&NodeValue> {
        self.child(id, 0)
            .and_then(|arg| self.child(arg, 0))
            .map(|value| self[value].value())
            .ok_or_else(|| self.invalid_payload(id, modifier))
    }

    fn invalid_payload(&self, id: NodeId, modifier: DataItemModifier) -> ExprError {
        let expected = modifier
            .parameter_types()
            .first()
            .map_or("no", |value_type| value_type.name());
        ExprError::structure(
            EXP0101,
            format!("Modifier '{modifier}' expects a {expected} argument"),
        )
        .with_span(self[id].span())
    }

    fn offset_overflow(&self, id: NodeId, modifier: DataItemModifier) -> ExprError {
        ExprError::structure(
            EXP0103,
            format!("Chained '{modifier}' offsets overflow a 32-bit integer"),
        )
        .with_span(self[id].span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, NodeKind};

    fn node(node_type: NodeType, kind: NodeKind, raw: &str) -> Node {
        Node::new(node_type, kind, raw).unwrap()
    }

    fn modifier_with(ast: &mut Ast, modifier: DataItemModifier, payload: Node) -> NodeId {
        let id = ast.add(Node::modifier(modifier));
        let arg = ast.add_child(id, Node::argument(0));
        ast.add_child(arg, payload);
        id
    }

    #[test]
    fn test_modifiers_fold_in_attachment_order() {
        let mut ast = Ast::new(node(NodeType::DataItem, NodeKind::DataItem, "#"));
        let root = ast.root();
        let arg = ast.add_child(root, Node::argument(0));
        ast.add_child(arg, Node::text(NodeType::Uid, "deabcdef123"));

        let first = modifier_with(
            &mut ast,
            DataItemModifier::AggregationType,
            node(NodeType::Identifier, NodeKind::AggregationType, "SUM"),
        );
        let second = modifier_with(
            &mut ast,
            DataItemModifier::AggregationType,
            node(NodeType::Identifier, NodeKind::AggregationType, "LAST"),
        );
        let offset = modifier_with(
            &mut ast,
            DataItemModifier::PeriodOffset,
            node(NodeType::Integer, NodeKind::Integer, "-2"),
        );
        for id in [first, second, offset, offset] {
            ast.add_modifier(root, id);
        }

        let mods = ast.query_modifiers(root).unwrap();
        assert_eq!(mods.aggregation_type, Some(crate::AggregationType::Last));
        assert_eq!(mods.period_offset, Some(-4));
    }

    #[test]
    fn test_modifier_without_payload() {
        let mut ast = Ast::new(node(NodeType::DataItem, NodeKind::DataItem, "#"));
        let id = ast.add(Node::modifier(DataItemModifier::MaxDate));
        ast.add_modifier(ast.root(), id);
        let err = ast.query_modifiers(ast.root()).unwrap_err();
        assert_eq!(err.code(), EXP0101);
        assert!(err.message().contains("DATE"));
    }
}
