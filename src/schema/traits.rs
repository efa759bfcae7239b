//! Schema node classification.
//!
//! This module provides the [`SchemaLike`] trait and [`NodeKind`], the
//! explicit tag every schema node carries. The engine and the formatter
//! decide how to treat a node by matching on its kind, never by looking at
//! which keys it happens to contain.

use crate::path::{FieldPath, PathSegment};

use super::{ArrayOf, CollectionOf, ObjectSchema, RuleSet, SchemaNode};

/// A borrowed, tagged view of a schema node.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    /// A leaf rule set, applied to the value at the node's path.
    Rules(&'a RuleSet),
    /// A branch, recursed into per field.
    Object(&'a ObjectSchema),
    /// An array of scalars.
    Array(&'a ArrayOf),
    /// An array of objects.
    Collection(&'a CollectionOf),
}

impl<'a> NodeKind<'a> {
    /// Returns true for array and collection nodes.
    pub fn is_repeated(&self) -> bool {
        matches!(self, NodeKind::Array(_) | NodeKind::Collection(_))
    }

    /// The rule set evaluated at this node's own path: the leaf rules, or
    /// the root options of a repeated node.
    pub fn own_rules(&self) -> Option<&'a RuleSet> {
        match *self {
            NodeKind::Rules(rules) => Some(rules),
            NodeKind::Array(array) => Some(array.options()),
            NodeKind::Collection(collection) => Some(collection.options()),
            NodeKind::Object(_) => None,
        }
    }

    /// Steps to the node addressing `segment` below this one.
    ///
    /// Fields select object fields; indices select the element schema of a
    /// repeated node.
    pub fn descend(self, segment: &PathSegment) -> Option<NodeKind<'a>> {
        match (self, segment) {
            (NodeKind::Object(object), PathSegment::Field(name)) => {
                object.get(name).map(SchemaNode::classify)
            }
            (NodeKind::Array(array), PathSegment::Index(_)) => Some(NodeKind::Rules(array.items())),
            (NodeKind::Collection(collection), PathSegment::Index(_)) => {
                Some(NodeKind::Object(collection.items()))
            }
            _ => None,
        }
    }

    /// Resolves the node addressing `path`, or `None` if the schema has no
    /// node there.
    pub fn at(self, path: &FieldPath) -> Option<NodeKind<'a>> {
        path.segments()
            .try_fold(self, |node, segment| node.descend(segment))
    }
}

/// A trait for anything that can root a validation.
///
/// The `Send + Sync` bounds allow schemas to be shared across threads,
/// e.g. by [`Validator::validate_many`](crate::Validator::validate_many).
pub trait SchemaLike: Send + Sync {
    /// Returns this node's tag.
    fn classify(&self) -> NodeKind<'_>;
}

impl SchemaLike for SchemaNode {
    fn classify(&self) -> NodeKind<'_> {
        match self {
            SchemaNode::Rules(rules) => NodeKind::Rules(rules),
            SchemaNode::Object(object) => NodeKind::Object(object),
            SchemaNode::Array(array) => NodeKind::Array(array),
            SchemaNode::Collection(collection) => NodeKind::Collection(collection),
        }
    }
}

impl SchemaLike for RuleSet {
    fn classify(&self) -> NodeKind<'_> {
        NodeKind::Rules(self)
    }
}

impl SchemaLike for ObjectSchema {
    fn classify(&self) -> NodeKind<'_> {
        NodeKind::Object(self)
    }
}

impl SchemaLike for ArrayOf {
    fn classify(&self) -> NodeKind<'_> {
        NodeKind::Array(self)
    }
}

impl SchemaLike for CollectionOf {
    fn classify(&self) -> NodeKind<'_> {
        NodeKind::Collection(self)
    }
}
