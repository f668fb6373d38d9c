//! Rebuild immutable nested records with one deep field replaced.
//!
//! The host engine's record type is immutable: a structured value can
//! only be produced wholesale, never mutated in place. Setting a field
//! several levels down therefore means reconstructing every node on the
//! path from the root to that field, while carrying all untouched
//! sibling subtrees over unchanged.
//!
//! [`rebuild`] is that reconstruction: depth-first, single pass, driven
//! by a [`FieldPath`](struct_path::FieldPath). Array descents fan the
//! remaining path out over every element of an array-of-struct field.
//! A null node anywhere on the path short-circuits — absent structure
//! is never synthesized.
//!
//! [`build_transform`] packages a path and a [`Replacement`] as a
//! [`Rewriter`], the per-record transform the engine invokes once per
//! input record. A `Rewriter` is `Send + Sync` and fully stateless
//! across calls, so it can be shared across records in parallel.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use struct_path::FieldPath;
//! use struct_rewrite::{build_transform, Replacement};
//!
//! let path = FieldPath::parse("top_field.nested_field.even_more_nested_field").unwrap();
//! let transform = build_transform(path, Replacement::from(json!(99)));
//!
//! let record = json!({"top_field": {"nested_field": {"even_more_nested_field": 5}}});
//! let out = transform.apply(&record).unwrap();
//! assert_eq!(out, json!({"top_field": {"nested_field": {"even_more_nested_field": 99}}}));
//! ```

pub mod rebuild;
pub mod transform;
pub mod types;

pub use rebuild::rebuild;
pub use transform::{build_transform, output_schema, Rewriter};
pub use types::{Replacement, RewriteError};
