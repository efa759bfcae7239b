//! The validation engine.
//!
//! A [`Validator`] walks a schema tree depth-first alongside the value
//! tree, evaluating every rule set at the path it addresses. Each subtree
//! yields its own [`ErrorMap`] and parents combine them, so no accumulator
//! is shared across the walk.

use rayon::prelude::*;
use serde_json::Value;
use stillwater::prelude::*;

use crate::error::{ErrorEntry, ErrorMap, ValidateError};
use crate::path::{self, FieldPath};
use crate::registry::RuleRegistry;
use crate::rule::{evaluate, EvalContext};
use crate::schema::{NodeKind, RuleSet, SchemaLike};
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// A configured validation engine.
///
/// The default configuration uses a registry holding the built-in rules;
/// [`validate`] and [`validate_with_context`] are shorthands for it.
///
/// # Example
///
/// ```rust
/// use formcheck::{RuleError, RuleRegistry, RuleValue, Schema, Validator};
/// use serde_json::{json, Value};
///
/// let registry = RuleRegistry::new();
/// registry
///     .register("even", |value: Option<&Value>, _: &RuleValue| -> Result<bool, RuleError> {
///         Ok(value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0))
///     })
///     .unwrap();
///
/// let validator = Validator::new().with_registry(registry);
/// let schema = Schema::object().field("seats", Schema::rules().rule("even", true));
///
/// let errors = validator.validate(&json!({"seats": 3}), &schema).unwrap();
/// assert!(errors.get("seats").unwrap().failed("even"));
/// ```
#[derive(Clone, Default)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Validator {
    /// Creates a validator backed by the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `registry` to resolve rule names.
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Returns the registry rule names are resolved against.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates `value` against `schema` with empty props.
    pub fn validate<S>(&self, value: &Value, schema: &S) -> Result<ErrorMap, ValidateError>
    where
        S: SchemaLike + ?Sized,
    {
        self.validate_with_context(value, schema, &ValidationContext::new())
    }

    /// Validates `value` against `schema`, handing `cx.props()` to dynamic
    /// rule configs.
    ///
    /// Returns the flat map of failing paths. A `ValidateError` means the
    /// schema itself is broken and no map could be produced.
    pub fn validate_with_context<S>(
        &self,
        value: &Value,
        schema: &S,
        cx: &ValidationContext,
    ) -> Result<ErrorMap, ValidateError>
    where
        S: SchemaLike + ?Sized,
    {
        tracing::debug!("validation started");
        let walk = Walk {
            cx: EvalContext {
                registry: &self.registry,
                props: cx.props(),
                tree: value,
            },
        };
        let result = walk.node(schema.classify(), &FieldPath::root());
        match &result {
            Ok(errors) => tracing::debug!(failed_paths = errors.len(), "validation finished"),
            Err(err) => tracing::debug!(error = %err, "validation aborted"),
        }
        result
    }

    /// Validates independent value trees against one schema in parallel.
    ///
    /// Results are returned in input order; one tree's fatal error does
    /// not affect the others.
    pub fn validate_many<S>(
        &self,
        values: &[Value],
        schema: &S,
        cx: &ValidationContext,
    ) -> Vec<ValidationResult>
    where
        S: SchemaLike + ?Sized,
    {
        values
            .par_iter()
            .map(|value| self.validate_with_context(value, schema, cx))
            .collect()
    }
}

/// Validates `value` against `schema` using the built-in rules.
///
/// # Example
///
/// ```rust
/// use formcheck::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("first_name", Schema::rules().required().min_length(4).string())
///     .field("last_name", Schema::rules().required().min_length(4).string());
///
/// let errors = validate(&json!({"first_name": "Ivan"}), &schema).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert!(errors.get("last_name").unwrap().failed("required"));
/// ```
pub fn validate<S>(value: &Value, schema: &S) -> Result<ErrorMap, ValidateError>
where
    S: SchemaLike + ?Sized,
{
    Validator::new().validate(value, schema)
}

/// Validates `value` against `schema` using the built-in rules and the
/// given context.
pub fn validate_with_context<S>(
    value: &Value,
    schema: &S,
    cx: &ValidationContext,
) -> Result<ErrorMap, ValidateError>
where
    S: SchemaLike + ?Sized,
{
    Validator::new().validate_with_context(value, schema, cx)
}

/// Error map keys are serialized paths, so a field name must survive
/// `FieldPath::parse(path.to_string())` to keep its own key.
fn check_field_name(name: &str, at: &FieldPath) -> Result<(), ValidateError> {
    if name.is_empty() || name.contains(['.', '[', ']']) {
        return Err(ValidateError::InvalidFieldName {
            name: name.to_string(),
            path: at.clone(),
        });
    }
    Ok(())
}

struct Walk<'a> {
    cx: EvalContext<'a>,
}

impl Walk<'_> {
    fn node(&self, node: NodeKind<'_>, at: &FieldPath) -> Result<ErrorMap, ValidateError> {
        match node {
            NodeKind::Rules(rules) => self.leaf(rules, at, false),
            NodeKind::Object(object) => {
                object.fields().try_fold(ErrorMap::new(), |acc, (name, child)| {
                    check_field_name(name, at)?;
                    let errors = self.node(child.classify(), &at.push_field(name.as_str()))?;
                    Ok(acc.combine(errors))
                })
            }
            NodeKind::Array(array) => {
                let root = self.leaf(array.options(), at, true)?;
                (0..self.element_count(at)).try_fold(root, |acc, i| {
                    let errors = self.leaf(array.items(), &at.push_index(i), false)?;
                    Ok(acc.combine(errors))
                })
            }
            NodeKind::Collection(collection) => {
                let root = self.leaf(collection.options(), at, true)?;
                let items = NodeKind::Object(collection.items());
                (0..self.element_count(at)).try_fold(root, |acc, i| {
                    let errors = self.node(items, &at.push_index(i))?;
                    Ok(acc.combine(errors))
                })
            }
        }
    }

    fn leaf(
        &self,
        rules: &RuleSet,
        at: &FieldPath,
        is_array: bool,
    ) -> Result<ErrorMap, ValidateError> {
        let value = path::get(self.cx.tree, at);
        let error = evaluate(rules, value, at, &self.cx)?;

        let mut errors = ErrorMap::new();
        if !error.is_empty() {
            errors.insert(ErrorEntry {
                path: at.clone(),
                error,
                schema: rules.clone(),
                is_array,
            });
        }
        Ok(errors)
    }

    /// Non-array values at a repeated node have no elements to visit.
    fn element_count(&self, at: &FieldPath) -> usize {
        match path::get(self.cx.tree, at) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleError, RuleValue};
    use crate::schema::{array_of, collection_of, Schema};
    use serde_json::json;

    #[test]
    fn test_root_rule_set() {
        let errors = validate(&json!(""), &Schema::rules().required()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("").unwrap().path.is_root());
    }

    #[test]
    fn test_nested_objects_build_dotted_paths() {
        let schema = Schema::object().field(
            "address",
            Schema::object().field("city", Schema::rules().required()),
        );
        let errors = validate(&json!({"address": {}}), &schema).unwrap();
        assert!(errors.contains("address.city"));

        // A missing intermediate object still reaches the leaf
        let errors = validate(&json!({}), &schema).unwrap();
        assert!(errors.contains("address.city"));
    }

    #[test]
    fn test_array_root_and_elements() {
        let schema = Schema::object().field(
            "tags",
            array_of(Schema::rules().min_length(4)).max_length(2),
        );
        let errors = validate(&json!({"tags": ["new", "news", "old"]}), &schema).unwrap();

        let root = errors.get("tags").unwrap();
        assert!(root.is_array);
        assert!(root.failed("maxLength"));
        assert!(!errors.get("tags[0]").unwrap().is_array);
        assert!(errors.contains("tags[2]"));
        assert!(!errors.contains("tags[1]"));
    }

    #[test]
    fn test_repeated_node_on_non_array_value() {
        let schema = Schema::object().field(
            "contacts",
            collection_of(Schema::object().field("name", Schema::rules().required())).required(),
        );
        let errors = validate(&json!({"contacts": "nope"}), &schema).unwrap();
        assert!(errors.is_empty());

        let errors = validate(&json!({"contacts": null}), &schema).unwrap();
        assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["contacts"]);
    }

    #[test]
    fn test_fatal_error_aborts_the_call() {
        let schema = Schema::object()
            .field("a", Schema::rules().required())
            .field("b", Schema::rules().rule("noSuchRule", true));
        let err = validate(&json!({}), &schema).unwrap_err();
        assert!(matches!(err, ValidateError::UnknownRule { .. }));
        assert_eq!(err.path().to_string(), "b");
    }

    #[test]
    fn test_dotted_field_name_is_rejected() {
        let schema = Schema::object()
            .field("a", Schema::object().field("b", Schema::rules().required()))
            .field("a.b", Schema::rules().min_length(3));
        let err = validate(&json!({"a": {}, "a.b": "x"}), &schema).unwrap_err();

        match &err {
            ValidateError::InvalidFieldName { name, path } => {
                assert_eq!(name, "a.b");
                assert!(path.is_root());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bracketed_and_empty_field_names_are_rejected() {
        let nested = Schema::object().field(
            "list",
            collection_of(Schema::object().field("x[0]", Schema::rules().required())),
        );
        let err = validate(&json!({"list": [{}]}), &nested).unwrap_err();
        assert!(matches!(err, ValidateError::InvalidFieldName { .. }));
        assert_eq!(err.path().to_string(), "list[0]");

        let empty = Schema::object().field("", Schema::rules().required());
        assert!(matches!(
            validate(&json!({}), &empty),
            Err(ValidateError::InvalidFieldName { .. })
        ));
    }

    #[test]
    fn test_custom_registry_replaces_builtins() {
        let registry = RuleRegistry::new();
        registry.replace(
            "required",
            |_: Option<&Value>, _: &RuleValue| -> Result<bool, RuleError> { Ok(true) },
        );
        let validator = Validator::new().with_registry(registry);
        let schema = Schema::object().field("a", Schema::rules().required());
        assert!(validator.validate(&json!({}), &schema).unwrap().is_empty());
        assert!(!validate(&json!({}), &schema).unwrap().is_empty());
    }

    #[test]
    fn test_validate_many_keeps_input_order() {
        let schema = Schema::object().field("n", Schema::rules().min(10));
        let values: Vec<Value> = (0..20).map(|n| json!({"n": n})).collect();
        let results = Validator::new().validate_many(&values, &schema, &ValidationContext::new());

        assert_eq!(results.len(), 20);
        for (n, result) in results.iter().enumerate() {
            let errors = result.as_ref().unwrap();
            assert_eq!(errors.is_empty(), n >= 10);
        }
    }
}
