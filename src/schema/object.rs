//! Branch schemas.
//!
//! This module provides [`ObjectSchema`], a schema node whose keys are field
//! names of the value tree, each mapping to a child [`SchemaNode`].

use indexmap::IndexMap;

use super::SchemaNode;

/// A schema mirroring one level of nesting in the value tree.
///
/// Field names are arbitrary: a field literally named `required` is a field,
/// never a rule, because leaves and branches are distinct types.
///
/// # Example
///
/// ```rust
/// use formcheck::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::rules().required())
///     .field(
///         "address",
///         Schema::object().field("city", Schema::rules().required().min_length(2)),
///     );
///
/// let errors = validate(&json!({"name": "Ivan", "address": {"city": "X"}}), &schema).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert!(errors.contains("address.city"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, SchemaNode>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// Returns the schema node of a field.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
