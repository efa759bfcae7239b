//! Rule set evaluation against a single value.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ValidateError;
use crate::path::FieldPath;
use crate::registry::RuleRegistry;
use crate::schema::RuleSet;

use super::RuleValue;

/// Everything a rule set needs besides the value under test.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub registry: &'a RuleRegistry,
    /// Caller-supplied context passed to dynamic configs.
    pub props: &'a Value,
    /// The whole value tree being validated.
    pub tree: &'a Value,
}

/// Evaluates every rule in `rules` against `value`.
///
/// Returns the failed rules mapped to the effective config each failed
/// with; an empty map means the value passed. Rules whose effective config
/// is `false` are skipped. The rule name is checked against the registry
/// before its config is resolved, so a misspelled rule is reported even
/// when disabled.
pub fn evaluate(
    rules: &RuleSet,
    value: Option<&Value>,
    path: &FieldPath,
    cx: &EvalContext<'_>,
) -> Result<IndexMap<String, RuleValue>, ValidateError> {
    let mut failed = IndexMap::new();

    for (name, config) in rules {
        let rule = cx
            .registry
            .get(name)
            .ok_or_else(|| ValidateError::UnknownRule {
                rule: name.clone(),
                path: path.clone(),
            })?;

        let effective = config
            .resolve(cx.props, value, cx.tree)
            .map_err(|source| ValidateError::Rule {
                rule: name.clone(),
                path: path.clone(),
                source,
            })?;

        if !effective.is_enabled() {
            continue;
        }

        let passed = rule
            .check(value, &effective)
            .map_err(|source| ValidateError::Rule {
                rule: name.clone(),
                path: path.clone(),
                source,
            })?;

        if !passed {
            tracing::trace!(path = %path, rule = %name, "rule failed");
            failed.insert(name.clone(), effective);
        }
    }

    Ok(failed)
}
