//! Repeated-structure schema composers.
//!
//! This module provides [`array_of`] and [`collection_of`], which tag a
//! schema fragment as applying to every element of an array. Both carry
//! root options: a [`RuleSet`] applied to the array value itself, whose
//! failures are reported at the array's own path.

use super::{ObjectSchema, RuleSet};

/// An array whose elements are scalars checked against one rule set.
///
/// # Example
///
/// ```rust
/// use formcheck::{array_of, validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("tags", array_of(Schema::rules().required().min_length(4)).min_length(1));
///
/// let errors = validate(&json!({"tags": ["new", "news"]}), &schema).unwrap();
/// assert!(errors.contains("tags[0]"));
///
/// let errors = validate(&json!({"tags": []}), &schema).unwrap();
/// assert!(errors.get("tags").unwrap().is_array);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOf {
    items: RuleSet,
    options: RuleSet,
}

impl ArrayOf {
    pub fn new(items: RuleSet) -> Self {
        Self {
            items,
            options: RuleSet::new(),
        }
    }

    /// Replaces the root options applied to the array as a whole.
    pub fn with_options(mut self, options: RuleSet) -> Self {
        self.options = options;
        self
    }

    /// The array itself must be present and not `null`.
    pub fn required(mut self) -> Self {
        self.options = self.options.required();
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.options = self.options.min_length(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.options = self.options.max_length(max);
        self
    }

    /// The rules applied to each element.
    pub fn items(&self) -> &RuleSet {
        &self.items
    }

    /// The rules applied to the array value.
    pub fn options(&self) -> &RuleSet {
        &self.options
    }
}

/// An array whose elements are objects checked against one object schema.
///
/// # Example
///
/// ```rust
/// use formcheck::{collection_of, validate, Schema};
/// use serde_json::json;
///
/// let contact = Schema::object().field("second_name", Schema::rules().min_length(4));
/// let schema = Schema::object().field("contacts", collection_of(contact));
///
/// let errors = validate(&json!({"contacts": [{}, {"second_name": "Pe"}]}), &schema).unwrap();
/// assert!(errors.contains("contacts[0].second_name"));
/// assert!(errors.contains("contacts[1].second_name"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOf {
    items: ObjectSchema,
    options: RuleSet,
}

impl CollectionOf {
    pub fn new(items: ObjectSchema) -> Self {
        Self {
            items,
            options: RuleSet::new(),
        }
    }

    /// Replaces the root options applied to the array as a whole.
    pub fn with_options(mut self, options: RuleSet) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.options = self.options.required();
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.options = self.options.min_length(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.options = self.options.max_length(max);
        self
    }

    /// The schema applied to each element.
    pub fn items(&self) -> &ObjectSchema {
        &self.items
    }

    /// The rules applied to the array value.
    pub fn options(&self) -> &RuleSet {
        &self.options
    }
}

/// Tags a rule set as applying to each element of an array.
pub fn array_of(items: RuleSet) -> ArrayOf {
    ArrayOf::new(items)
}

/// Tags an object schema as applying to each element of an array.
pub fn collection_of(items: ObjectSchema) -> CollectionOf {
    CollectionOf::new(items)
}
