//! The per-record transform boundary.

use serde_json::Value;
use struct_path::{FieldPath, PathError, StructType};

use crate::rebuild::rebuild;
use crate::types::{Replacement, RewriteError};

/// A per-record transform: one path, one replacement, applied to each
/// input record the engine hands over.
///
/// Holds no per-call state, so a single `Rewriter` can be shared and
/// invoked across many records in parallel.
#[derive(Debug, Clone)]
pub struct Rewriter {
    path: FieldPath,
    replacement: Replacement,
}

impl Rewriter {
    pub fn new(path: FieldPath, replacement: Replacement) -> Self {
        Rewriter { path, replacement }
    }

    /// Rebuild one record with the leaf replaced.
    ///
    /// # Errors
    ///
    /// Fails with the same typed errors as [`rebuild`]; a malformed
    /// record fails its own call entirely, and the host decides whether
    /// that aborts the batch or is skipped.
    pub fn apply(&self, record: &Value) -> Result<Value, RewriteError> {
        rebuild(record, &self.path, &self.replacement)
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }
}

/// Build the per-record transform for a path and replacement.
pub fn build_transform(path: FieldPath, replacement: Replacement) -> Rewriter {
    Rewriter::new(path, replacement)
}

/// The output record type for a transform over `path`.
///
/// Rewriting never changes field names, order, or types — only the
/// value at the leaf — so the output schema is the input schema. The
/// path is validated against it first, so an invalid path is rejected
/// when the transform's output type is declared, before any record is
/// processed.
///
/// # Errors
///
/// Returns the schema-resolution error if the path names an undeclared
/// field or its tags do not match the declared types.
pub fn output_schema(schema: &StructType, path: &FieldPath) -> Result<StructType, PathError> {
    schema.check_path(path)?;
    Ok(schema.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use struct_path::{DataType, StructField};

    fn schema() -> StructType {
        StructType::new(vec![StructField {
            name: "a".to_string(),
            data_type: DataType::Struct(StructType::new(vec![StructField {
                name: "b".to_string(),
                data_type: DataType::Integer,
                nullable: true,
            }])),
            nullable: true,
        }])
    }

    #[test]
    fn rewriter_applies_per_record() {
        let transform = build_transform(
            FieldPath::parse("a.b").unwrap(),
            Replacement::from(json!(0)),
        );
        let records = [json!({"a": {"b": 1}}), json!({"a": {"b": 2}}), json!({"a": null})];
        let out: Vec<Value> = records.iter().map(|r| transform.apply(r).unwrap()).collect();
        assert_eq!(
            out,
            [json!({"a": {"b": 0}}), json!({"a": {"b": 0}}), json!({"a": null})]
        );
    }

    #[test]
    fn output_schema_is_identity() {
        let schema = schema();
        let path = FieldPath::parse("a.b").unwrap();
        assert_eq!(output_schema(&schema, &path).unwrap(), schema);
    }

    #[test]
    fn output_schema_rejects_bad_path() {
        let schema = schema();
        let path = FieldPath::parse("a.nope").unwrap();
        assert_eq!(
            output_schema(&schema, &path),
            Err(PathError::UnknownField {
                field: "nope".to_string(),
                at: "a".to_string(),
            })
        );
    }

    #[test]
    fn rewriter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rewriter>();
    }
}
