//! The recursive rebuild algorithm.

use serde_json::Value;
use struct_path::{FieldPath, PathStep};

use crate::types::{node_kind, Replacement, RewriteError};

/// Produce a new record identical to `value` everywhere except along
/// `path`, where the leaf field is replaced.
///
/// Depth-first, single pass. Only the spine from the root to the leaf
/// is reconstructed; untouched sibling subtrees are carried over as-is.
/// A null node anywhere on the path returns unchanged — replacement
/// only ever touches existing structure. Array descents apply the
/// remaining path to every element independently, preserving order and
/// length; an empty array is a no-op.
///
/// # Errors
///
/// - [`RewriteError::MissingField`] if a struct node does not declare
///   the next segment.
/// - [`RewriteError::TypeMismatch`] if traversal meets a scalar where a
///   struct is needed, or a non-array under an array step.
pub fn rebuild(
    value: &Value,
    path: &FieldPath,
    replacement: &Replacement,
) -> Result<Value, RewriteError> {
    let mut trail = Vec::new();
    rebuild_steps(value, path.steps(), replacement, &mut trail)
}

fn rebuild_steps(
    value: &Value,
    steps: &[PathStep],
    replacement: &Replacement,
    trail: &mut Vec<String>,
) -> Result<Value, RewriteError> {
    // Absent intermediate nodes are not synthesized.
    if value.is_null() {
        return Ok(Value::Null);
    }

    let (step, rest) = match steps.split_first() {
        Some(parts) => parts,
        // Paths are non-empty by construction.
        None => return Ok(value.clone()),
    };

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(RewriteError::TypeMismatch {
                expected: "struct",
                found: node_kind(other),
                at: at(trail),
            });
        }
    };

    match step {
        PathStep::Field(name) => {
            let old = map.get(name).ok_or_else(|| RewriteError::MissingField {
                field: name.clone(),
                at: at(trail),
            })?;
            let new_child = if rest.is_empty() {
                replacement.produce(old)
            } else {
                trail.push(name.clone());
                let child = rebuild_steps(old, rest, replacement, trail)?;
                trail.pop();
                child
            };
            let mut out = map.clone();
            // Replacing an existing key keeps its position.
            out.insert(name.clone(), new_child);
            Ok(Value::Object(out))
        }
        PathStep::ArrayField(name) => {
            let field_value = map.get(name).ok_or_else(|| RewriteError::MissingField {
                field: name.clone(),
                at: at(trail),
            })?;
            let arr = match field_value {
                Value::Array(arr) => arr,
                // A declared-but-null array is absent structure.
                Value::Null => return Ok(value.clone()),
                other => {
                    return Err(RewriteError::TypeMismatch {
                        expected: "array",
                        found: node_kind(other),
                        at: at_child(trail, name),
                    });
                }
            };
            if arr.is_empty() {
                return Ok(value.clone());
            }
            trail.push(name.clone());
            let mut rebuilt = Vec::with_capacity(arr.len());
            for element in arr {
                // Each element restarts at the same relative path;
                // no cross-element state.
                rebuilt.push(rebuild_steps(element, rest, replacement, trail)?);
            }
            trail.pop();
            let mut out = map.clone();
            out.insert(name.clone(), Value::Array(rebuilt));
            Ok(Value::Object(out))
        }
    }
}

fn at(trail: &[String]) -> String {
    if trail.is_empty() {
        "<root>".to_string()
    } else {
        trail.join(".")
    }
}

fn at_child(trail: &[String], name: &str) -> String {
    if trail.is_empty() {
        name.to_string()
    } else {
        format!("{}.{name}", trail.join("."))
    }
}
