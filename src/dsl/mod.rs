//! User-facing search query AST.
//!
//! A query is a tree of aggregator nodes (AND/OR/OPTIONAL/NOT) over
//! comparison leaves (EQUALS/BETWEEN/CONTAINS). Nodes live in an arena owned
//! by [`QueryTree`] and are addressed by [`NodeId`]; each node keeps the
//! index of its parent so leaf compilation can consult the enclosing
//! aggregator without a second ownership edge.
//!
//! Trees are built through [`QueryTreeBuilder`], which rejects malformed
//! shapes (childless aggregators, reattached children) at construction time.
//! Once built, a tree is immutable.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node identifier within a [`QueryTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// How an aggregator node combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregator {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
    /// Children may match; a matching child only improves the score.
    Optional,
    /// No child may match.
    Not,
}

/// Comparison kind of a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Exact match on the raw operand.
    Equals,
    /// Inclusive numeric range match.
    Between,
    /// Analyzed full-text match (term or phrase).
    Contains,
}

/// Scoring bucket of a field.
///
/// `Text` fields carry full-text relevance; the other buckets feed the
/// downstream normalization stage through [`crate::compile::BoostAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCategory {
    Text,
    Criterion,
    Range1,
    Range2,
    Range3,
}

/// Field metadata the compiler needs: scoring bucket and query-time boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub category: FieldCategory,
    pub boost: f32,
}

impl FieldSpec {
    pub fn new(category: FieldCategory, boost: f32) -> Self {
        Self { category, boost }
    }
}

/// Leaf operand. The builder API ties each variant to its comparison op, so
/// an operator/operand mismatch is unrepresentable through public
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Text(String),
    IntRange { min: i32, max: i32 },
    LongRange { min: i64, max: i64 },
}

/// A comparison leaf: one operator against one field.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub op: ComparisonOp,
    pub field: FieldSpec,
    /// Physical index field name, already language-suffixed upstream.
    pub field_name: String,
    pub operand: Operand,
}

/// Shape of a node: aggregator over children, or comparison leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Aggregate {
        aggregator: Aggregator,
        children: Vec<NodeId>,
    },
    Leaf(LeafNode),
}

#[derive(Debug, Clone)]
struct QueryNode {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Immutable query AST, consumed read-only by the compiler.
#[derive(Debug, Clone)]
pub struct QueryTree {
    nodes: Vec<QueryNode>,
    root: NodeId,
}

impl QueryTree {
    pub fn builder() -> QueryTreeBuilder {
        QueryTreeBuilder::new()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0 as usize].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].parent
    }

    /// Aggregator of the node's parent, if the node has one.
    pub fn parent_aggregator(&self, id: NodeId) -> Option<Aggregator> {
        let parent = self.parent(id)?;
        match self.kind(parent) {
            NodeKind::Aggregate { aggregator, .. } => Some(*aggregator),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Builder for [`QueryTree`].
///
/// Leaf constructors return the new node's id; [`aggregate`](Self::aggregate)
/// attaches previously created nodes as children. [`build`](Self::build)
/// finalizes the arena around a chosen root.
#[derive(Debug, Default)]
pub struct QueryTreeBuilder {
    nodes: Vec<QueryNode>,
}

impl QueryTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(QueryNode { parent: None, kind });
        id
    }

    fn push_leaf(
        &mut self,
        op: ComparisonOp,
        field: FieldSpec,
        field_name: impl Into<String>,
        operand: Operand,
    ) -> NodeId {
        self.push(NodeKind::Leaf(LeafNode {
            op,
            field,
            field_name: field_name.into(),
            operand,
        }))
    }

    /// Exact-match leaf on the raw operand.
    pub fn equals(
        &mut self,
        field: FieldSpec,
        field_name: impl Into<String>,
        operand: impl Into<String>,
    ) -> NodeId {
        self.push_leaf(
            ComparisonOp::Equals,
            field,
            field_name,
            Operand::Text(operand.into()),
        )
    }

    /// Inclusive 32-bit numeric range leaf.
    pub fn between_i32(
        &mut self,
        field: FieldSpec,
        field_name: impl Into<String>,
        min: i32,
        max: i32,
    ) -> NodeId {
        self.push_leaf(
            ComparisonOp::Between,
            field,
            field_name,
            Operand::IntRange { min, max },
        )
    }

    /// Inclusive 64-bit numeric range leaf.
    pub fn between_i64(
        &mut self,
        field: FieldSpec,
        field_name: impl Into<String>,
        min: i64,
        max: i64,
    ) -> NodeId {
        self.push_leaf(
            ComparisonOp::Between,
            field,
            field_name,
            Operand::LongRange { min, max },
        )
    }

    /// Analyzed full-text leaf.
    pub fn contains(
        &mut self,
        field: FieldSpec,
        field_name: impl Into<String>,
        text: impl Into<String>,
    ) -> NodeId {
        self.push_leaf(
            ComparisonOp::Contains,
            field,
            field_name,
            Operand::Text(text.into()),
        )
    }

    /// Aggregator node over previously created children.
    ///
    /// Fails on an empty child list, an unknown child id, or a child that is
    /// already attached elsewhere.
    pub fn aggregate(&mut self, aggregator: Aggregator, children: Vec<NodeId>) -> Result<NodeId> {
        if children.is_empty() {
            return Err(Error::MalformedQuery(
                "aggregator requires at least one child".to_string(),
            ));
        }
        for &child in &children {
            let node = self.nodes.get(child.0 as usize).ok_or_else(|| {
                Error::MalformedQuery(format!("unknown child node {}", child.0))
            })?;
            if node.parent.is_some() {
                return Err(Error::MalformedQuery(format!(
                    "node {} is already attached to a parent",
                    child.0
                )));
            }
        }
        let id = self.push(NodeKind::Aggregate {
            aggregator,
            children: children.clone(),
        });
        for child in children {
            self.nodes[child.0 as usize].parent = Some(id);
        }
        Ok(id)
    }

    /// Finalize the tree. The root must exist and must not be attached to a
    /// parent.
    pub fn build(self, root: NodeId) -> Result<QueryTree> {
        let node = self.nodes.get(root.0 as usize).ok_or_else(|| {
            Error::MalformedQuery(format!("unknown root node {}", root.0))
        })?;
        if node.parent.is_some() {
            return Err(Error::MalformedQuery(
                "root node must not have a parent".to_string(),
            ));
        }
        Ok(QueryTree {
            nodes: self.nodes,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field() -> FieldSpec {
        FieldSpec::new(FieldCategory::Text, 2.0)
    }

    #[test]
    fn test_bare_leaf_tree() {
        let mut builder = QueryTree::builder();
        let leaf = builder.contains(text_field(), "titleText_en", "rust");
        let tree = builder.build(leaf).unwrap();

        assert_eq!(tree.root(), leaf);
        assert!(tree.parent(leaf).is_none());
        match tree.kind(leaf) {
            NodeKind::Leaf(l) => {
                assert_eq!(l.op, ComparisonOp::Contains);
                assert_eq!(l.field_name, "titleText_en");
            }
            NodeKind::Aggregate { .. } => panic!("expected leaf"),
        }
    }

    #[test]
    fn test_parent_back_references() {
        let mut builder = QueryTree::builder();
        let c1 = builder.contains(text_field(), "titleText_en", "rust");
        let c2 = builder.equals(
            FieldSpec::new(FieldCategory::Criterion, 1.5),
            "regionCriterion_en",
            "brussels",
        );
        let root = builder.aggregate(Aggregator::And, vec![c1, c2]).unwrap();
        let tree = builder.build(root).unwrap();

        assert_eq!(tree.parent(c1), Some(root));
        assert_eq!(tree.parent(c2), Some(root));
        assert_eq!(tree.parent_aggregator(c1), Some(Aggregator::And));
        assert!(tree.parent_aggregator(root).is_none());
    }

    #[test]
    fn test_aggregate_rejects_empty_children() {
        let mut builder = QueryTree::builder();
        let err = builder.aggregate(Aggregator::Or, vec![]).unwrap_err();
        assert!(matches!(err, Error::MalformedQuery(_)));
    }

    #[test]
    fn test_aggregate_rejects_reattached_child() {
        let mut builder = QueryTree::builder();
        let leaf = builder.contains(text_field(), "titleText_en", "rust");
        let _first = builder.aggregate(Aggregator::And, vec![leaf]).unwrap();
        let err = builder.aggregate(Aggregator::Or, vec![leaf]).unwrap_err();
        assert!(matches!(err, Error::MalformedQuery(_)));
    }

    #[test]
    fn test_build_rejects_attached_root() {
        let mut builder = QueryTree::builder();
        let leaf = builder.contains(text_field(), "titleText_en", "rust");
        let _root = builder.aggregate(Aggregator::Not, vec![leaf]).unwrap();
        let err = builder.build(leaf).unwrap_err();
        assert!(matches!(err, Error::MalformedQuery(_)));
    }

    #[test]
    fn test_nested_aggregators() {
        let mut builder = QueryTree::builder();
        let c1 = builder.contains(text_field(), "titleText_en", "rust");
        let c2 = builder.contains(text_field(), "titleText_en", "java");
        let inner = builder.aggregate(Aggregator::Or, vec![c1, c2]).unwrap();
        let c3 = builder.between_i32(
            FieldSpec::new(FieldCategory::Range1, 1.0),
            "salaryRange",
            30_000,
            60_000,
        );
        let root = builder.aggregate(Aggregator::And, vec![inner, c3]).unwrap();
        let tree = builder.build(root).unwrap();

        assert_eq!(tree.parent_aggregator(inner), Some(Aggregator::And));
        assert_eq!(tree.parent_aggregator(c1), Some(Aggregator::Or));
        assert_eq!(tree.num_nodes(), 5);
    }
}
