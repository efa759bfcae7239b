//! Leaf rule sets.
//!
//! This module provides [`RuleSet`], the schema node applied directly to a
//! single value: an ordered mapping from rule name to [`RuleConfig`].

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::rule::{DynamicRule, RuleConfig, RuleValue};

/// A mapping from rule name to rule config, applied to one value.
///
/// Rules are evaluated in insertion order. Setting a rule twice keeps its
/// original position and replaces the config.
///
/// # Example
///
/// ```rust
/// use formcheck::Schema;
///
/// let name = Schema::rules().required().string().min_length(4);
/// assert_eq!(name.len(), 3);
/// assert!(name.is_required());
///
/// // Conditional requiredness computed from the whole value tree
/// let model = Schema::rules().required_when(|_props, _value, values| values["type"] == "car");
/// assert!(!model.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    rules: IndexMap<String, RuleConfig>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a rule by name. The name must resolve in the registry used for
    /// validation, otherwise validation fails with `UnknownRule`.
    pub fn rule(mut self, name: impl Into<String>, config: impl Into<RuleConfig>) -> Self {
        self.rules.insert(name.into(), config.into());
        self
    }

    /// Sets a rule whose config is computed from `(props, value, values)`
    /// at evaluation time.
    pub fn dynamic<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, &Value) -> R + Send + Sync + 'static,
        R: Into<RuleValue>,
    {
        self.rule(name, DynamicRule::new(f))
    }

    /// The value must be present, not `null` and not `""`.
    pub fn required(self) -> Self {
        self.rule("required", true)
    }

    /// `required` only when `f(props, value, values)` returns true.
    pub fn required_when<F>(self, f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, &Value) -> bool + Send + Sync + 'static,
    {
        self.dynamic("required", f)
    }

    pub fn string(self) -> Self {
        self.rule("string", true)
    }

    pub fn number(self) -> Self {
        self.rule("number", true)
    }

    pub fn integer(self) -> Self {
        self.rule("integer", true)
    }

    pub fn boolean(self) -> Self {
        self.rule("boolean", true)
    }

    pub fn email(self) -> Self {
        self.rule("email", true)
    }

    /// At least `min` characters, or `min` items for an array.
    pub fn min_length(self, min: usize) -> Self {
        self.rule("minLength", min)
    }

    /// At most `max` characters, or `max` items for an array.
    pub fn max_length(self, max: usize) -> Self {
        self.rule("maxLength", max)
    }

    pub fn min(self, min: impl Into<RuleValue>) -> Self {
        self.rule("min", min.into())
    }

    pub fn max(self, max: impl Into<RuleValue>) -> Self {
        self.rule("max", max.into())
    }

    /// The value must be a date on or after `date`.
    pub fn min_date(self, date: impl Into<RuleValue>) -> Self {
        self.rule("minDate", date.into())
    }

    /// The value must be a date on or before `date`.
    pub fn max_date(self, date: impl Into<RuleValue>) -> Self {
        self.rule("maxDate", date.into())
    }

    /// The value must be a string matching the regex `pattern`.
    pub fn pattern(self, pattern: &str) -> Self {
        self.rule("pattern", pattern)
    }

    /// Returns the declared config of a rule.
    pub fn get(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleConfig)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true when the set statically declares `required: true`.
    ///
    /// A dynamic `required` is not statically required; its verdict is only
    /// known per evaluation.
    pub fn is_required(&self) -> bool {
        matches!(
            self.rules.get("required"),
            Some(RuleConfig::Static(RuleValue::Bool(true)))
        )
    }

    /// Renders the declared rules as a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .rules
            .iter()
            .map(|(name, config)| (name.clone(), config.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a RuleConfig);
    type IntoIter = indexmap::map::Iter<'a, String, RuleConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
