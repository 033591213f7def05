//! # Disjunction Context
//!
//! When the first violation comes from an `anyOf`, the engine reports a
//! single "is not valid under any of the given schemas" message. The report
//! also lists why each branch failed, so this module finds the branches by
//! walking the schema along the error's keyword path and validates each
//! branch on its own.
//!
//! A `$ref` on the way may point into the root schema, into a sibling file
//! of the schema directory, or back at the root through its absolute `$id`.
//! The walk remembers which document it is in, because fragment-only refs
//! and the definitions a branch needs belong to that document.

use serde_json::{Map, Value};

use crate::directory::{document_uri, SchemaDirectory};
use crate::outcome::pointer_tokens;

/// Keywords carried from the enclosing document into a standalone branch
/// so that `$ref`s inside the branch keep resolving.
const CARRIED_KEYWORDS: [&str; 4] = ["$schema", "$id", "definitions", "$defs"];

/// Implicit `$ref` hops allowed for one path token; stops reference cycles.
const MAX_IMPLICIT_HOPS: usize = 32;

/// Schemas a walk may enter.
#[derive(Clone, Copy)]
pub(crate) struct SchemaScope<'s> {
    /// The schema being validated against.
    pub(crate) root: &'s Value,
    /// Files next to it.
    pub(crate) directory: &'s SchemaDirectory,
}

/// A schema node together with the document it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Located<'s> {
    pub(crate) document: &'s Value,
    pub(crate) node: &'s Value,
}

/// The branches of a failed `anyOf` and the document holding them.
#[derive(Debug)]
pub(crate) struct Disjunction<'s> {
    pub(crate) document: &'s Value,
    pub(crate) branches: &'s [Value],
}

/// Locate the node addressed by a keyword path such as
/// `/properties/liability:status/$ref/anyOf`.
///
/// `$ref` tokens are followed into the root or a sibling document. If a
/// token is missing from a node that holds a `$ref`, the reference is
/// followed implicitly, which covers engines that omit `$ref` from keyword
/// paths.
pub(crate) fn locate_keyword<'s>(
    scope: SchemaScope<'s>,
    schema_path: &str,
) -> Option<Located<'s>> {
    let start = Located {
        document: scope.root,
        node: scope.root,
    };
    pointer_tokens(schema_path)
        .iter()
        .try_fold(start, |at, token| step(scope, at, token, 0))
}

fn step<'s>(
    scope: SchemaScope<'s>,
    at: Located<'s>,
    token: &str,
    hops: usize,
) -> Option<Located<'s>> {
    if token == "$ref" {
        return follow_ref(scope, at);
    }
    match at.node {
        Value::Object(map) => match map.get(token) {
            Some(node) => Some(Located { node, ..at }),
            None if hops < MAX_IMPLICIT_HOPS => {
                let target = follow_ref(scope, at)?;
                step(scope, target, token, hops + 1)
            }
            None => None,
        },
        Value::Array(items) => items
            .get(token.parse::<usize>().ok()?)
            .map(|node| Located { node, ..at }),
        _ => None,
    }
}

/// Follow the `$ref` held by `at.node`, if any.
fn follow_ref<'s>(scope: SchemaScope<'s>, at: Located<'s>) -> Option<Located<'s>> {
    let reference = at.node.get("$ref").and_then(Value::as_str)?;
    resolve_ref(scope, at.document, reference)
}

/// Resolve `reference` as seen from `current`.
///
/// Fragment-only refs stay in `current`. Otherwise the document part must
/// name `current` or the root by `$id`, or a sibling by `$id` or filename;
/// the fragment is then applied as a JSON Pointer into that document.
fn resolve_ref<'s>(
    scope: SchemaScope<'s>,
    current: &'s Value,
    reference: &str,
) -> Option<Located<'s>> {
    let (base, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let document = if base.is_empty() || names(current, base) {
        current
    } else if names(scope.root, base) {
        scope.root
    } else {
        scope.directory.lookup(base)?
    };
    let node = if fragment.is_empty() {
        document
    } else {
        document.pointer(fragment)?
    };
    Some(Located { document, node })
}

/// Whether `document` declares `uri` (without fragment) as its `$id`.
fn names(document: &Value, uri: &str) -> bool {
    document
        .get("$id")
        .and_then(Value::as_str)
        .is_some_and(|id| document_uri(id) == uri)
}

/// The `anyOf` branches addressed by `schema_path`, when its last keyword
/// is `anyOf`.
pub(crate) fn disjunction_branches<'s>(
    scope: SchemaScope<'s>,
    schema_path: &str,
) -> Option<Disjunction<'s>> {
    if !schema_path.ends_with("/anyOf") {
        return None;
    }
    let found = locate_keyword(scope, schema_path)?;
    let branches = found.node.as_array()?;
    Some(Disjunction {
        document: found.document,
        branches: branches.as_slice(),
    })
}

/// Wrap a branch into a standalone schema that still sees the definitions
/// of `document`, the schema the branch was found in.
pub(crate) fn standalone_branch(document: &Value, branch: &Value) -> Value {
    let mut wrapper = Map::new();
    if let Some(doc_obj) = document.as_object() {
        for keyword in CARRIED_KEYWORDS {
            if let Some(value) = doc_obj.get(keyword) {
                wrapper.insert(keyword.to_string(), value.clone());
            }
        }
    }
    wrapper.insert("allOf".to_string(), Value::Array(vec![branch.clone()]));
    Value::Object(wrapper)
}
