//! Turning the flat error map into a form-facing error tree.
//!
//! The engine reports every failure it finds. This module is the consumer
//! that decides what a form should show: it drops failures on blank
//! optional fields and writes the remaining entries into a nested tree
//! addressed the same way as the values, with repeated-structure roots
//! nested under `_error`.

use serde_json::{Map, Value};

use crate::error::{ErrorEntry, ErrorMap, ValidateError};
use crate::path::{self, FieldPath};
use crate::rule::builtin::is_blank;
use crate::schema::SchemaLike;
use crate::validation::ValidationContext;
use crate::validator::Validator;

/// Key under which a repeated structure's own errors are written.
pub const ROOT_ERROR_KEY: &str = "_error";

/// Options for [`format_errors`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Keep failures on blank fields that are not required.
    pub include_blank_optional: bool,
    /// Also treat a field as required when a dynamic `required` rule
    /// evaluated to enabled and failed. Off by default: only the declared
    /// `required: true` counts.
    pub effective_required: bool,
}

impl FormatOptions {
    /// Creates the default options: blank optional failures are dropped and
    /// only a declared `required: true` marks a field as required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether failures on blank optional fields are kept.
    pub fn include_blank_optional(mut self, include: bool) -> Self {
        self.include_blank_optional = include;
        self
    }

    /// Sets whether a failed dynamic `required` marks a field as required.
    pub fn effective_required(mut self, enabled: bool) -> Self {
        self.effective_required = enabled;
        self
    }

    fn is_required(&self, entry: &ErrorEntry) -> bool {
        entry.schema.is_required() || (self.effective_required && entry.failed("required"))
    }
}

/// Builds the error tree shown to a form.
///
/// An entry is dropped when blank optional fields are not included, the
/// field is not required, and its value is absent, `null` or `""`. A
/// field counts as required when its declared rule set has
/// `required: true`; a dynamic `required` only counts when
/// [`FormatOptions::effective_required`] is set. Kept entries are written
/// at their path, or at `path._error` when the schema node at that path is
/// an array or collection.
///
/// # Example
///
/// ```rust
/// use formcheck::{array_of, format_errors, validate, FormatOptions, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("nickname", Schema::rules().min_length(3))
///     .field("tags", array_of(Schema::rules()).min_length(1));
/// let values = json!({"nickname": "", "tags": []});
///
/// let errors = validate(&values, &schema).unwrap();
/// assert_eq!(errors.len(), 2);
///
/// let tree = format_errors(&errors, &schema, &values, &FormatOptions::default());
/// assert!(tree.get("nickname").is_none());
/// assert_eq!(tree["tags"]["_error"]["isArray"], json!(true));
/// ```
pub fn format_errors<S>(
    errors: &ErrorMap,
    schema: &S,
    values: &Value,
    options: &FormatOptions,
) -> Value
where
    S: SchemaLike + ?Sized,
{
    let root = schema.classify();
    let mut tree = Value::Object(Map::new());

    for (key, entry) in errors.iter() {
        let blank = is_blank(path::get(values, &entry.path));
        if !options.include_blank_optional && !options.is_required(entry) && blank {
            tracing::trace!(path = key, "dropping failure on blank optional field");
            continue;
        }

        let repeated = root.at(&entry.path).is_some_and(|node| node.is_repeated());
        let target: FieldPath = if repeated {
            entry.path.push_field(ROOT_ERROR_KEY)
        } else {
            entry.path.clone()
        };
        path::set(&mut tree, &target, entry.to_json());
    }

    tree
}

/// Binds a schema to form values: validates, then formats.
///
/// This is the adapter a form library calls on every change. It owns its
/// schema and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use formcheck::{FormValidator, FormatOptions, Schema};
/// use serde_json::{json, Value};
///
/// let form = FormValidator::new(
///     Schema::object()
///         .field("type", Schema::rules().required())
///         .field("plate", Schema::rules().min_length(4)),
///     FormatOptions::default(),
/// );
///
/// let tree = form.validate(&json!({"plate": "AB"}), &Value::Null).unwrap();
/// assert_eq!(tree["type"]["error"]["required"], json!(true));
/// assert_eq!(tree["plate"]["error"]["minLength"], json!(4));
///
/// let tree = form.validate(&json!({"type": "car", "plate": ""}), &Value::Null).unwrap();
/// assert_eq!(tree, json!({}));
/// ```
pub struct FormValidator<S> {
    schema: S,
    options: FormatOptions,
    validator: Validator,
}

impl<S: SchemaLike> FormValidator<S> {
    /// Creates an adapter using the built-in rules.
    pub fn new(schema: S, options: FormatOptions) -> Self {
        Self {
            schema,
            options,
            validator: Validator::new(),
        }
    }

    /// Uses a configured engine, e.g. one with custom rules.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Returns the schema this adapter validates against.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Validates `values` and returns the formatted error tree; `{}` means
    /// the form is valid.
    pub fn validate(&self, values: &Value, props: &Value) -> Result<Value, ValidateError> {
        let cx = ValidationContext::new().with_props(props.clone());
        let errors = self.validator.validate_with_context(values, &self.schema, &cx)?;
        Ok(format_errors(&errors, &self.schema, values, &self.options))
    }

    /// Returns the raw error map without formatting.
    pub fn errors(&self, values: &Value, props: &Value) -> Result<ErrorMap, ValidateError> {
        let cx = ValidationContext::new().with_props(props.clone());
        self.validator.validate_with_context(values, &self.schema, &cx)
    }
}
