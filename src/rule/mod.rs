//! Rule configuration values and the rule predicate contract.
//!
//! A leaf of a schema is a [`RuleSet`](crate::RuleSet): an ordered mapping
//! from rule name to [`RuleConfig`]. A config is either a static
//! [`RuleValue`] or a [`DynamicRule`] that computes the value from the
//! caller's props, the field value and the whole value tree. The named
//! predicate behind each rule implements [`Rule`] and is looked up in a
//! [`RuleRegistry`](crate::RuleRegistry).

pub(crate) mod builtin;
mod evaluator;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};

pub use evaluator::{evaluate, EvalContext};

/// The effective configuration of a rule for one evaluation.
///
/// `Bool(false)` disables the rule. Every other value enables it and is
/// passed to the rule's predicate (e.g. the bound of `minLength`).
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl RuleValue {
    /// Returns false only for the disabling value `Bool(false)`.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RuleValue::Bool(false))
    }

    /// Returns the numeric config, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RuleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text config, if this is a `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the configured date; text is parsed like a date field value.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            RuleValue::Date(d) => Some(*d),
            RuleValue::Text(s) => builtin::parse_date(s),
            _ => None,
        }
    }

    /// Renders the value as JSON; whole numbers render as integers.
    pub fn to_json(&self) -> Value {
        match self {
            RuleValue::Bool(b) => json!(b),
            RuleValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => json!(*n as i64),
            RuleValue::Number(n) => json!(n),
            RuleValue::Text(s) => json!(s),
            RuleValue::Date(d) => json!(d.to_rfc3339()),
        }
    }
}

impl From<bool> for RuleValue {
    fn from(b: bool) -> Self {
        RuleValue::Bool(b)
    }
}

impl From<f64> for RuleValue {
    fn from(n: f64) -> Self {
        RuleValue::Number(n)
    }
}

impl From<i64> for RuleValue {
    fn from(n: i64) -> Self {
        RuleValue::Number(n as f64)
    }
}

impl From<i32> for RuleValue {
    fn from(n: i32) -> Self {
        RuleValue::Number(f64::from(n))
    }
}

impl From<usize> for RuleValue {
    fn from(n: usize) -> Self {
        RuleValue::Number(n as f64)
    }
}

impl From<&str> for RuleValue {
    fn from(s: &str) -> Self {
        RuleValue::Text(s.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(s: String) -> Self {
        RuleValue::Text(s)
    }
}

impl From<DateTime<Utc>> for RuleValue {
    fn from(d: DateTime<Utc>) -> Self {
        RuleValue::Date(d)
    }
}

impl From<NaiveDate> for RuleValue {
    fn from(d: NaiveDate) -> Self {
        RuleValue::Date(d.and_time(NaiveTime::MIN).and_utc())
    }
}

/// `None` disables the rule, like `false`.
impl<T: Into<RuleValue>> From<Option<T>> for RuleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RuleValue::Bool(false), Into::into)
    }
}

type DynamicFn =
    dyn Fn(&Value, Option<&Value>, &Value) -> Result<RuleValue, RuleError> + Send + Sync;

/// A rule config computed at evaluation time.
///
/// The function receives `(props, value, whole_value_tree)`; `value` is
/// `None` when the field is absent. Two dynamic rules are equal only when
/// they share the same function.
#[derive(Clone)]
pub struct DynamicRule(Arc<DynamicFn>);

impl DynamicRule {
    /// Creates a dynamic rule from an infallible computation. Any value
    /// convertible into a [`RuleValue`] may be returned, so a closure
    /// producing `bool` yields an enabled or disabled rule.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, &Value) -> R + Send + Sync + 'static,
        R: Into<RuleValue>,
    {
        let resolve = move |props: &Value, value: Option<&Value>, tree: &Value| {
            Ok::<RuleValue, RuleError>(f(props, value, tree).into())
        };
        Self(Arc::new(resolve))
    }

    /// Creates a dynamic rule whose computation can fail; a failure aborts
    /// the whole validation call.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, &Value) -> Result<RuleValue, RuleError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    /// Computes the effective config for one evaluation.
    pub fn resolve(
        &self,
        props: &Value,
        value: Option<&Value>,
        tree: &Value,
    ) -> Result<RuleValue, RuleError> {
        (self.0)(props, value, tree)
    }
}

impl PartialEq for DynamicRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DynamicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicRule(..)")
    }
}

/// The declared configuration of one rule in a rule set.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    Static(RuleValue),
    Dynamic(DynamicRule),
}

impl RuleConfig {
    /// Produces the effective value for one evaluation.
    pub fn resolve(
        &self,
        props: &Value,
        value: Option<&Value>,
        tree: &Value,
    ) -> Result<RuleValue, RuleError> {
        match self {
            RuleConfig::Static(v) => Ok(v.clone()),
            RuleConfig::Dynamic(d) => d.resolve(props, value, tree),
        }
    }

    /// JSON rendering; dynamic configs have no static form and render as `null`.
    pub fn to_json(&self) -> Value {
        match self {
            RuleConfig::Static(v) => v.to_json(),
            RuleConfig::Dynamic(_) => Value::Null,
        }
    }
}

impl From<RuleValue> for RuleConfig {
    fn from(value: RuleValue) -> Self {
        RuleConfig::Static(value)
    }
}

macro_rules! static_config_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RuleConfig {
                fn from(value: $ty) -> Self {
                    RuleConfig::Static(value.into())
                }
            }
        )*
    };
}

static_config_from!(bool, f64, i64, i32, usize, &str, String, DateTime<Utc>, NaiveDate);

impl From<DynamicRule> for RuleConfig {
    fn from(rule: DynamicRule) -> Self {
        RuleConfig::Dynamic(rule)
    }
}

/// A named validation predicate.
///
/// `check` returns `Ok(false)` when the value fails the rule. An `Err` means
/// the rule could not be applied at all (e.g. `minLength: "abc"`) and aborts
/// the validation call. Any function of the same shape is a rule.
///
/// # Example
///
/// ```rust
/// use formcheck::{Rule, RuleError, RuleValue};
/// use serde_json::json;
///
/// let even = |value: Option<&serde_json::Value>, _config: &RuleValue| -> Result<bool, RuleError> {
///     Ok(value.and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0))
/// };
/// assert!(even.check(Some(&json!(4)), &RuleValue::Bool(true)).unwrap());
/// assert!(!even.check(None, &RuleValue::Bool(true)).unwrap());
/// ```
pub trait Rule: Send + Sync {
    fn check(&self, value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(Option<&Value>, &RuleValue) -> Result<bool, RuleError> + Send + Sync,
{
    fn check(&self, value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
        self(value, config)
    }
}

/// A rule that cannot be applied, or a dynamic config that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleError {
    pub message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A config of the wrong kind for the rule.
    pub fn config(rule: &str, expected: &str, got: &RuleValue) -> Self {
        Self::new(format!(
            "rule '{}' expects {} config, got {}",
            rule,
            expected,
            got.to_json()
        ))
    }
}
