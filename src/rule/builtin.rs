//! The rules every default registry starts with.
//!
//! All of them except `required` fail on an absent value, so a blank
//! optional field reports its structural rules too. Dropping those is the
//! formatter's job, not the engine's.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;

use super::{Rule, RuleError, RuleValue};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// The built-in rules, constructed once per process.
///
/// Every registry shares these instances, so the compiled email regex and
/// the pattern cache survive across registries and validation calls.
pub(crate) fn builtins() -> &'static [(&'static str, Arc<dyn Rule>)] {
    static BUILTINS: OnceLock<Vec<(&'static str, Arc<dyn Rule>)>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        vec![
            entry("required", required),
            entry("string", string),
            entry("number", number),
            entry("integer", integer),
            entry("boolean", boolean),
            entry("minLength", min_length),
            entry("maxLength", max_length),
            entry("min", min),
            entry("max", max),
            entry("minDate", min_date),
            entry("maxDate", max_date),
            entry("pattern", PatternRule::default()),
            entry("email", EmailRule::new()),
        ]
    })
}

fn entry(name: &'static str, rule: impl Rule + 'static) -> (&'static str, Arc<dyn Rule>) {
    (name, Arc::new(rule))
}

fn required(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
    Ok(!is_blank(value))
}

fn string(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
    Ok(value.is_some_and(Value::is_string))
}

fn number(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
    Ok(value.is_some_and(Value::is_number))
}

fn integer(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
    Ok(value.is_some_and(|v| v.is_i64() || v.is_u64()))
}

fn boolean(value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
    Ok(value.is_some_and(Value::is_boolean))
}

fn min_length(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let min = number_config("minLength", config)?;
    Ok(length(value).is_some_and(|len| len as f64 >= min))
}

fn max_length(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let max = number_config("maxLength", config)?;
    Ok(length(value).is_some_and(|len| len as f64 <= max))
}

fn min(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let min = number_config("min", config)?;
    Ok(value.and_then(Value::as_f64).is_some_and(|n| n >= min))
}

fn max(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let max = number_config("max", config)?;
    Ok(value.and_then(Value::as_f64).is_some_and(|n| n <= max))
}

fn min_date(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let min = date_config("minDate", config)?;
    Ok(value.and_then(value_date).is_some_and(|d| d >= min))
}

fn max_date(value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
    let max = date_config("maxDate", config)?;
    Ok(value.and_then(value_date).is_some_and(|d| d <= max))
}

/// Matches strings against the configured regex, compiling each distinct
/// pattern once.
#[derive(Default)]
struct PatternRule {
    cache: RwLock<HashMap<String, Regex>>,
}

impl Rule for PatternRule {
    fn check(&self, value: Option<&Value>, config: &RuleValue) -> Result<bool, RuleError> {
        let pattern = config
            .as_str()
            .ok_or_else(|| RuleError::config("pattern", "a text", config))?;
        let Some(s) = value.and_then(Value::as_str) else {
            return Ok(false);
        };

        if let Some(regex) = self.cache.read().get(pattern) {
            return Ok(regex.is_match(s));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| RuleError::new(format!("invalid pattern '{}': {}", pattern, e)))?;
        let matched = regex.is_match(s);
        self.cache.write().insert(pattern.to_string(), regex);
        Ok(matched)
    }
}

struct EmailRule {
    regex: Regex,
}

impl EmailRule {
    fn new() -> Self {
        Self {
            regex: Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }
}

impl Rule for EmailRule {
    fn check(&self, value: Option<&Value>, _config: &RuleValue) -> Result<bool, RuleError> {
        Ok(value
            .and_then(Value::as_str)
            .is_some_and(|s| self.regex.is_match(s)))
    }
}

/// Absent, `null` and `""` all count as blank.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Characters of a string or items of an array.
fn length(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn number_config(rule: &str, config: &RuleValue) -> Result<f64, RuleError> {
    config
        .as_f64()
        .ok_or_else(|| RuleError::config(rule, "a number", config))
}

fn date_config(rule: &str, config: &RuleValue) -> Result<DateTime<Utc>, RuleError> {
    config
        .as_date()
        .ok_or_else(|| RuleError::config(rule, "a date", config))
}

/// Parses RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
}

/// Date strings, or integers as epoch milliseconds.
fn value_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}
