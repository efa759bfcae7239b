//! Validation context for dynamic rule configs.
//!
//! This module provides the [`ValidationContext`] type that carries the
//! caller's auxiliary data (`props`) into a validation call. Dynamic rule
//! configs receive it together with the value under test and the whole
//! value tree.

use serde_json::Value;

/// Validation context carries caller-supplied props.
///
/// The value tree itself is not stored here: the engine passes it alongside
/// the context, so one context can be reused across many trees (e.g. by
/// [`Validator::validate_many`](crate::Validator::validate_many)).
///
/// # Example
///
/// ```rust
/// use formcheck::{validate_with_context, Schema, ValidationContext};
/// use serde_json::{json, Value};
///
/// let schema = Schema::object().field(
///     "vat_id",
///     Schema::rules().required_when(|props: &Value, _: Option<&Value>, _: &Value| {
///         props["country"] == "DE"
///     }),
/// );
///
/// let cx = ValidationContext::new().with_props(json!({"country": "DE"}));
/// let errors = validate_with_context(&json!({}), &schema, &cx).unwrap();
/// assert!(errors.contains("vat_id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationContext {
    props: Value,
}

impl ValidationContext {
    /// Creates a context with `null` props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the props handed to dynamic rule configs.
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    /// Returns the props.
    pub fn props(&self) -> &Value {
        &self.props
    }
}

impl From<Value> for ValidationContext {
    fn from(props: Value) -> Self {
        Self { props }
    }
}
