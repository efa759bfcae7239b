//! # Formcheck
//!
//! Validation of nested form data against a declarative schema tree,
//! producing a flat map of errors keyed by path.
//!
//! ## Overview
//!
//! A schema mirrors the shape of the data it validates. Leaves are rule
//! sets (`required`, `minLength`, ...), branches are objects, and arrays are
//! described with [`array_of`] (scalars) or [`collection_of`] (objects).
//! Validation walks the schema depth-first and records, for every path
//! where at least one rule failed, which rules failed and with what
//! config. Every failure is collected; nothing short-circuits.
//!
//! Rule configs may be computed at validation time from the caller's
//! props, the value under test and the whole value tree, which is how
//! conditional requiredness is expressed.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: a path into nested values (e.g. `contacts[0].name`)
//! - [`Schema`]: entry point for creating schema nodes
//! - [`ErrorMap`]: the flat result, one [`ErrorEntry`] per failing path
//! - [`RuleRegistry`]: the named rules a schema can reference
//! - [`format_errors`]: turns an error map into a nested, form-facing tree
//!
//! ## Example
//!
//! ```rust
//! use formcheck::{array_of, validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("first_name", Schema::rules().required().min_length(4).string())
//!     .field("last_name", Schema::rules().required().min_length(4).string())
//!     .field("birth_date", Schema::rules().required().max_date("2016-03-23"))
//!     .field("tags", array_of(Schema::rules().required().min_length(4)));
//!
//! let values = json!({
//!     "first_name": "Ivan",
//!     "birth_date": "2017-03-23",
//!     "tags": ["new", "news"]
//! });
//!
//! let errors = validate(&values, &schema).unwrap();
//! assert_eq!(errors.len(), 3);
//! assert!(errors.get("birth_date").unwrap().failed("maxDate"));
//! assert!(errors.contains("tags[0]"));
//! assert!(!errors.contains("first_name"));
//! ```

pub mod error;
pub mod format;
pub mod path;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod validation;
pub mod validator;

pub use error::{ErrorEntry, ErrorMap, ValidateError};
pub use format::{format_errors, FormValidator, FormatOptions};
pub use path::{FieldPath, PathError, PathSegment};
pub use registry::{RegistryError, RuleRegistry};
pub use rule::{DynamicRule, Rule, RuleConfig, RuleError, RuleValue};
pub use schema::{
    array_of, collection_of, ArrayOf, CollectionOf, NodeKind, ObjectSchema, RuleSet, Schema,
    SchemaLike, SchemaNode,
};
pub use validation::ValidationContext;
pub use validator::{validate, validate_with_context, Validator};

/// Type alias for the outcome of one validation call.
pub type ValidationResult = Result<ErrorMap, ValidateError>;
