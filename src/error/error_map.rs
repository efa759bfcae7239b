//! The engine's output: a flat, path-keyed map of failing rules.
//!
//! This module provides [`ErrorEntry`] for the failures at one path and
//! [`ErrorMap`] for the whole result of a validation call.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::path::FieldPath;
use crate::rule::RuleValue;
use crate::schema::RuleSet;

/// The failed rules at one path.
///
/// - **path**: where the failing value lives
/// - **error**: each failing rule mapped to the effective config it failed with
/// - **schema**: the rule set as declared, before dynamic configs were resolved
/// - **is_array**: true only for the root entry of an array or collection node
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEntry {
    pub path: FieldPath,
    pub error: IndexMap<String, RuleValue>,
    pub schema: RuleSet,
    pub is_array: bool,
}

impl ErrorEntry {
    /// Returns true if the named rule failed.
    pub fn failed(&self, rule: &str) -> bool {
        self.error.contains_key(rule)
    }

    /// Names of the failed rules, in evaluation order.
    pub fn failed_rules(&self) -> impl Iterator<Item = &str> {
        self.error.keys().map(String::as_str)
    }

    /// Renders the entry as `{"error": {...}, "schema": {...}}`, plus
    /// `"isArray": true` for repeated-structure roots.
    pub fn to_json(&self) -> Value {
        let error: Map<String, Value> = self
            .error
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();

        let mut entry = Map::new();
        entry.insert("error".to_string(), Value::Object(error));
        entry.insert("schema".to_string(), self.schema.to_json());
        if self.is_array {
            entry.insert("isArray".to_string(), Value::Bool(true));
        }
        Value::Object(entry)
    }
}

impl Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        let rules: Vec<&str> = self.failed_rules().collect();
        write!(f, "{}: failed {}", path_str, rules.join(", "))
    }
}

/// A mapping from path string to the [`ErrorEntry`] at that path.
///
/// Only failing paths have entries, so an empty map means the value is
/// valid. Entries keep insertion order for display, but equality ignores
/// order: callers must treat the map as unordered.
///
/// # Combining
///
/// `ErrorMap` implements `Semigroup`; the engine builds one map per subtree
/// and combines them on the way up.
///
/// ```rust
/// use formcheck::{validate, ErrorMap, Schema};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let schema = Schema::object().field("a", Schema::rules().required());
/// let left = validate(&json!({}), &schema).unwrap();
/// let right = validate(&json!({"a": "x"}), &schema).unwrap();
///
/// let combined = left.combine(right);
/// assert_eq!(combined.len(), 1);
/// assert!(combined.into_validation().is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorMap(IndexMap<String, ErrorEntry>);

impl ErrorMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry keyed by its path, replacing any entry at that path.
    pub fn insert(&mut self, entry: ErrorEntry) {
        self.0.insert(entry.path.to_string(), entry);
    }

    /// Returns the entry at a serialized path such as `contacts[0].name`.
    pub fn get(&self, path: &str) -> Option<&ErrorEntry> {
        self.0.get(path)
    }

    /// Returns true if there is an entry at the serialized path.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Returns the number of failing paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over `(path, entry)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.0.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Returns the failing paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns all entries in which the named rule failed.
    pub fn with_rule(&self, rule: &str) -> Vec<&ErrorEntry> {
        self.0.values().filter(|e| e.failed(rule)).collect()
    }

    /// Converts to a `Validation`: success when empty, failure otherwise.
    pub fn into_validation(self) -> Validation<(), ErrorMap> {
        if self.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(self)
        }
    }

    /// Renders the flat map as a JSON object keyed by path.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(path, entry)| (path.clone(), entry.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl Semigroup for ErrorMap {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed at {} path(s):", self.len())?;
        for (i, entry) in self.0.values().enumerate() {
            writeln!(f, "  {}. {}", i + 1, entry)?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, ErrorEntry);
    type IntoIter = indexmap::map::IntoIter<String, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a ErrorEntry);
    type IntoIter = indexmap::map::Iter<'a, String, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ErrorMap crosses thread boundaries in batch validation.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorMap>();
    assert_sync::<ErrorMap>();
};
