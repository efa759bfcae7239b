//! Rule registry for named rule predicates.
//!
//! This module provides the [`RuleRegistry`] type that maps rule names used
//! in rule sets (`required`, `minLength`, ...) to the predicates that
//! implement them. Unknown names are looked up here rather than hardcoded in
//! the evaluator, so callers can add their own rules or override built-ins.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::rule::builtin::builtins;
use crate::rule::Rule;

/// Type alias for the rule storage map.
type RuleMap = Arc<RwLock<HashMap<String, Arc<dyn Rule>>>>;

/// A thread-safe registry of named rules.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use formcheck::{RuleError, RuleRegistry, RuleValue};
/// use serde_json::Value;
///
/// let registry = RuleRegistry::new();
/// assert!(registry.contains("minLength"));
///
/// registry
///     .register("even", |value: Option<&Value>, _: &RuleValue| -> Result<bool, RuleError> {
///         Ok(value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0))
///     })
///     .unwrap();
/// assert!(registry.get("even").is_some());
/// ```
pub struct RuleRegistry {
    rules: RuleMap,
}

impl RuleRegistry {
    /// Creates a registry holding the built-in rules.
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut rules = registry.rules.write();
            for (name, rule) in builtins() {
                rules.insert(name.to_string(), Arc::clone(rule));
            }
        }
        registry
    }

    /// Creates a registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a rule under a new name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<R>(&self, name: impl Into<String>, rule: R) -> Result<(), RegistryError>
    where
        R: Rule + 'static,
    {
        let name = name.into();
        let mut rules = self.rules.write();

        if rules.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(rule = %name, "registered rule");
        rules.insert(name, Arc::new(rule));
        Ok(())
    }

    /// Registers a rule, replacing any rule with the same name.
    ///
    /// Returns true if an existing rule was replaced.
    pub fn replace<R>(&self, name: impl Into<String>, rule: R) -> bool
    where
        R: Rule + 'static,
    {
        let name = name.into();
        tracing::debug!(rule = %name, "replaced rule");
        self.rules.write().insert(name, Arc::new(rule)).is_some()
    }

    /// Retrieves a rule by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.read().get(name).cloned()
    }

    /// Returns true if a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Returns all registered rule names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RuleRegistry {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a rule with a name that already exists.
    #[error("rule '{0}' already registered")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleError, RuleValue};
    use serde_json::{json, Value};

    fn always(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
        Ok(value.is_some())
    }

    #[test]
    fn test_new_has_builtins() {
        let registry = RuleRegistry::new();
        for name in ["required", "string", "minLength", "maxLength", "minDate", "maxDate"] {
            assert!(registry.contains(name), "missing builtin {}", name);
        }
    }

    #[test]
    fn test_builtin_instances_are_shared_across_registries() {
        let first = RuleRegistry::new();
        let second = RuleRegistry::new();
        for name in ["pattern", "email", "required"] {
            let a = first.get(name).unwrap();
            let b = second.get(name).unwrap();
            assert!(Arc::ptr_eq(&a, &b), "builtin {} was rebuilt", name);
        }

        // Storage stays per registry
        first.replace("email", always);
        assert!(!Arc::ptr_eq(&first.get("email").unwrap(), &second.get("email").unwrap()));
    }

    #[test]
    fn test_empty_has_nothing() {
        let registry = RuleRegistry::empty();
        assert!(registry.names().is_empty());
        assert!(registry.get("required").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = RuleRegistry::new();
        let result = registry.register("required", always);
        assert!(matches!(result, Err(RegistryError::DuplicateName(name)) if name == "required"));
    }

    #[test]
    fn test_replace_overrides_builtin() {
        let registry = RuleRegistry::new();
        assert!(registry.replace("required", always));
        let rule = registry.get("required").unwrap();
        assert!(rule.check(Some(&json!("")), &RuleValue::Bool(true)).unwrap());
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = RuleRegistry::empty();
        let clone = registry.clone();
        clone.register("always", always).unwrap();
        assert!(registry.contains("always"));
        assert_eq!(registry.names(), vec!["always".to_string()]);
    }
}
