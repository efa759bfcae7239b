//! Error types.
//!
//! Validation failures are data, collected in an [`ErrorMap`]. A
//! [`ValidateError`] means the validation call itself could not complete:
//! the schema names a rule nobody registered, or a rule or dynamic config
//! could not be applied. Such errors abort the call instead of being
//! recorded as a pass or a failure.

mod error_map;

pub use error_map::{ErrorEntry, ErrorMap};

use crate::path::FieldPath;
use crate::rule::RuleError;

/// A fatal error for one validation call.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The schema references a rule name missing from the registry.
    #[error("unknown rule '{rule}' at path '{path}'")]
    UnknownRule { rule: String, path: FieldPath },

    /// An object schema field name that no path can address unambiguously:
    /// empty, or containing `.`, `[` or `]`.
    #[error("field name '{name}' under path '{path}' cannot be addressed by a path")]
    InvalidFieldName { name: String, path: FieldPath },

    /// A rule, or the dynamic config feeding it, could not be evaluated.
    #[error("rule '{rule}' could not be evaluated at path '{path}': {source}")]
    Rule {
        rule: String,
        path: FieldPath,
        #[source]
        source: RuleError,
    },
}

impl ValidateError {
    /// The path being validated when the error occurred.
    pub fn path(&self) -> &FieldPath {
        match self {
            ValidateError::UnknownRule { path, .. }
            | ValidateError::InvalidFieldName { path, .. }
            | ValidateError::Rule { path, .. } => path,
        }
    }
}
