//! Replacement values and rewrite errors.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use struct_path::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RewriteError {
    /// A struct node does not declare the next path segment as a field.
    ///
    /// Distinct from the field's value being null: a declared-but-null
    /// field short-circuits, an undeclared name is a caller error and
    /// must surface.
    #[error("MISSING_FIELD: no field `{field}` at `{at}`")]
    MissingField { field: String, at: String },

    /// Traversal found a node of the wrong kind for the current step.
    #[error("TYPE_MISMATCH: expected {expected} at `{at}`, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        at: String,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// What to put at the path's leaf: a literal value, or a pure function
/// of the old value.
///
/// The function form is invoked exactly once per targeted leaf per
/// call; it is shared behind an `Arc` so one transform can serve many
/// records across threads.
#[derive(Clone)]
pub enum Replacement {
    Literal(Value),
    Compute(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl Replacement {
    /// Wrap a replacement function.
    pub fn compute<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Replacement::Compute(Arc::new(f))
    }

    /// The new leaf value, given the old one.
    pub fn produce(&self, old: &Value) -> Value {
        match self {
            Replacement::Literal(value) => value.clone(),
            Replacement::Compute(f) => f(old),
        }
    }
}

impl From<Value> for Replacement {
    fn from(value: Value) -> Self {
        Replacement::Literal(value)
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Replacement::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}

/// The kind of a value node, for diagnostics.
pub(crate) fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "struct",
    }
}
