//! # Validation Outcome
//!
//! A schema violation is an expected result of validating user input, so it
//! is modelled as data rather than as an error type.

use std::fmt;

use serde_json::Value;

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The document conforms to the schema.
    Valid,
    /// The first violation found.
    Invalid(SchemaViolation),
}

impl ValidationOutcome {
    /// Whether the document conformed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The violation, if any.
    pub fn violation(&self) -> Option<&SchemaViolation> {
        match self {
            Self::Valid => None,
            Self::Invalid(v) => Some(v),
        }
    }
}

/// The first schema violation in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Human-readable description from the validation engine.
    pub message: String,
    /// Location of the offending node inside the document.
    pub path: Vec<PathSegment>,
    /// JSON Pointer of the failing keyword inside the schema.
    pub schema_path: String,
    /// First error of every failed branch when the keyword is `anyOf`.
    pub context: Vec<String>,
}

impl SchemaViolation {
    /// Join the path segments with `separator`; empty for the root.
    pub fn path_joined(&self, separator: &str) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// One step of a document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Split a JSON Pointer into unescaped reference tokens.
pub(crate) fn pointer_tokens(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(|t| t.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Turn a JSON Pointer into typed segments by walking `document`.
///
/// A numeric token becomes [`PathSegment::Index`] only where the document
/// actually holds an array, so an object key such as `"2024"` stays a key.
pub(crate) fn segments_for(document: &Value, pointer: &str) -> Vec<PathSegment> {
    let mut node = Some(document);
    let mut segments = Vec::new();
    for token in pointer_tokens(pointer) {
        let current = node;
        let segment = match (current, token.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                node = items.get(index);
                PathSegment::Index(index)
            }
            (Some(Value::Object(map)), _) => {
                node = map.get(&token);
                PathSegment::Key(token)
            }
            _ => {
                node = None;
                PathSegment::Key(token)
            }
        };
        segments.push(segment);
    }
    segments
}

/// The node addressed by `segments`, if it exists.
pub(crate) fn resolve_segments<'v>(
    document: &'v Value,
    segments: &[PathSegment],
) -> Option<&'v Value> {
    segments.iter().try_fold(document, |node, segment| match segment {
        PathSegment::Key(key) => node.get(key.as_str()),
        PathSegment::Index(index) => node.get(*index),
    })
}
