//! Field path representation for locating values in nested structures.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] for building,
//! printing and parsing paths like `contacts[0].first_name`, plus the
//! [`get`] and [`set`] helpers that read and write a `serde_json::Value`
//! tree through such a path. The same paths key the engine's error map.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::{Map, Value};

/// A segment of a field path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `contacts`, `first_name`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested form value tree.
///
/// `FieldPath` represents locations like `contacts[0].email`. Appending never
/// mutates the receiver, so sibling paths can branch off a shared parent.
///
/// # Example
///
/// ```rust
/// use formcheck::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("contacts")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "contacts[0].email");
/// assert_eq!("contacts[0].email".parse::<FieldPath>().unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Parses a dotted/bracketed path such as `a.b[0].c`.
    ///
    /// The empty string is the root path. Field names cannot contain `.`,
    /// `[` or `]`.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut chars = input.char_indices();
        let mut field = String::new();
        // true right after a `.` or at the start, where a field must follow
        let mut expect_field = true;

        while let Some((pos, c)) = chars.next() {
            match c {
                '.' => {
                    if field.is_empty() && expect_field {
                        return Err(PathError::EmptySegment { position: pos });
                    }
                    if !field.is_empty() {
                        segments.push(PathSegment::Field(std::mem::take(&mut field)));
                    }
                    expect_field = true;
                }
                '[' => {
                    if !field.is_empty() {
                        segments.push(PathSegment::Field(std::mem::take(&mut field)));
                    } else if expect_field && pos > 0 {
                        return Err(PathError::EmptySegment { position: pos });
                    }
                    let mut digits = String::new();
                    let mut closed = false;
                    for (_, d) in chars.by_ref() {
                        if d == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(d);
                    }
                    if !closed {
                        return Err(PathError::UnclosedBracket {
                            input: input.to_string(),
                        });
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| PathError::InvalidIndex { segment: digits })?;
                    segments.push(PathSegment::Index(index));
                    expect_field = false;
                }
                ']' => {
                    return Err(PathError::UnclosedBracket {
                        input: input.to_string(),
                    })
                }
                _ => {
                    if !expect_field && field.is_empty() {
                        // `a[0]b` has no separator between the index and the field
                        return Err(PathError::EmptySegment { position: pos });
                    }
                    field.push(c);
                }
            }
        }

        if !field.is_empty() {
            segments.push(PathSegment::Field(field));
        } else if expect_field && !input.is_empty() {
            return Err(PathError::EmptySegment {
                position: input.len(),
            });
        }

        Ok(Self { segments })
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with the given segment appended.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors produced when parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A `[` without a matching `]`, or a stray `]`.
    #[error("unbalanced brackets in path '{input}'")]
    UnclosedBracket { input: String },

    /// Bracket contents that are not a non-negative integer.
    #[error("invalid array index '{segment}'")]
    InvalidIndex { segment: String },

    /// Two separators with nothing between them, or a trailing `.`.
    #[error("empty path segment at byte {position}")]
    EmptySegment { position: usize },
}

/// Looks up the value at `path`, or `None` when any step is missing.
///
/// Segments are treated uniformly: an index on an object looks up the
/// decimal key, and a numeric field name on an array indexes it.
///
/// ```rust
/// use formcheck::{path, FieldPath};
/// use serde_json::json;
///
/// let tree = json!({"tags": ["new", "news"]});
/// let path = FieldPath::root().push_field("tags").push_index(1);
/// assert_eq!(path::get(&tree, &path), Some(&json!("news")));
/// assert_eq!(path::get(&tree, &path.push_field("missing")), None);
/// ```
pub fn get<'a>(tree: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments().try_fold(tree, step)
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), PathSegment::Field(name)) => map.get(name),
        (Value::Object(map), PathSegment::Index(idx)) => map.get(&idx.to_string()),
        (Value::Array(items), PathSegment::Index(idx)) => items.get(*idx),
        (Value::Array(items), PathSegment::Field(name)) => {
            name.parse::<usize>().ok().and_then(|idx| items.get(idx))
        }
        _ => None,
    }
}

/// Writes `value` at `path`, creating intermediate containers as needed.
///
/// Missing or scalar intermediates become an object (for a field segment)
/// or an array (for an index segment); arrays are padded with `null`. An
/// array addressed by a non-numeric field is promoted to an object keyed by
/// its decimal indices. Writing at the root replaces the whole tree.
pub fn set(tree: &mut Value, path: &FieldPath, value: Value) {
    let mut current = tree;
    for segment in path.segments() {
        current = slot(current, segment);
    }
    *current = value;
}

fn slot<'a>(current: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    reshape(current, segment);
    match (current, segment) {
        (Value::Object(map), PathSegment::Field(name)) => {
            map.entry(name.clone()).or_insert(Value::Null)
        }
        (Value::Object(map), PathSegment::Index(idx)) => {
            map.entry(idx.to_string()).or_insert(Value::Null)
        }
        (Value::Array(items), PathSegment::Index(idx)) => index_slot(items, *idx),
        (Value::Array(items), PathSegment::Field(name)) => {
            let idx = name.parse::<usize>().unwrap_or(items.len());
            index_slot(items, idx)
        }
        (other, _) => other,
    }
}

/// Makes `current` a container that `segment` can address.
fn reshape(current: &mut Value, segment: &PathSegment) {
    match segment {
        PathSegment::Field(name) => match current {
            Value::Object(_) => {}
            Value::Array(_) if name.parse::<usize>().is_ok() => {}
            Value::Array(items) => {
                let promoted: Map<String, Value> = std::mem::take(items)
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect();
                *current = Value::Object(promoted);
            }
            _ => *current = Value::Object(Map::new()),
        },
        PathSegment::Index(_) => {
            if !current.is_object() && !current.is_array() {
                *current = Value::Array(Vec::new());
            }
        }
    }
}

fn index_slot(items: &mut Vec<Value>, idx: usize) -> &mut Value {
    if items.len() <= idx {
        items.resize(idx + 1, Value::Null);
    }
    &mut items[idx]
}
