//! Schema definitions for validation.
//!
//! A schema is a tree mirroring the shape of the data it validates. Every
//! node is one of four explicitly tagged kinds:
//!
//! - [`RuleSet`]: rules applied directly to one value
//! - [`ObjectSchema`]: one child node per field name
//! - [`ArrayOf`]: a rule set applied to each element of an array
//! - [`CollectionOf`]: an object schema applied to each element of an array
//!
//! The kind is fixed when the node is built, so a field literally named
//! `required` can never be mistaken for a rule.
//!
//! # Example
//!
//! ```rust
//! use formcheck::{validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("first_name", Schema::rules().required().min_length(4).string())
//!     .field("tags", Schema::array_of(Schema::rules().min_length(4)));
//!
//! let errors = validate(&json!({"first_name": "Ivan", "tags": ["news"]}), &schema).unwrap();
//! assert!(errors.is_empty());
//! ```

mod object;
mod repeated;
mod rule_set;
mod traits;

pub use object::ObjectSchema;
pub use repeated::{array_of, collection_of, ArrayOf, CollectionOf};
pub use rule_set::RuleSet;
pub use traits::{NodeKind, SchemaLike};

/// Entry point for creating schema nodes.
pub struct Schema;

impl Schema {
    /// Creates an empty leaf rule set.
    pub fn rules() -> RuleSet {
        RuleSet::new()
    }

    /// Creates an empty object schema.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array-of-scalars node; see [`array_of`].
    pub fn array_of(items: RuleSet) -> ArrayOf {
        ArrayOf::new(items)
    }

    /// Creates a collection-of-objects node; see [`collection_of`].
    pub fn collection_of(items: ObjectSchema) -> CollectionOf {
        CollectionOf::new(items)
    }
}

/// An owned schema node of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Rules(RuleSet),
    Object(ObjectSchema),
    Array(ArrayOf),
    Collection(CollectionOf),
}

impl From<RuleSet> for SchemaNode {
    fn from(rules: RuleSet) -> Self {
        SchemaNode::Rules(rules)
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(object: ObjectSchema) -> Self {
        SchemaNode::Object(object)
    }
}

impl From<ArrayOf> for SchemaNode {
    fn from(array: ArrayOf) -> Self {
        SchemaNode::Array(array)
    }
}

impl From<CollectionOf> for SchemaNode {
    fn from(collection: CollectionOf) -> Self {
        SchemaNode::Collection(collection)
    }
}
