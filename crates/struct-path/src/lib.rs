//! Path descriptors into nested struct records.
//!
//! A [`FieldPath`] is an ordered, non-empty sequence of descent steps
//! identifying a single leaf field inside a nested record. Each step is
//! either a plain struct-field descent or an array descent, where the
//! remaining path is applied independently to every element of an
//! array-of-struct field.
//!
//! Paths can be built three ways:
//!
//! - parsed from the dotted syntax, with `[]` marking array descents
//!   (`"a.b[].c"`),
//! - assembled from explicitly tagged [`PathStep`]s,
//! - resolved from a plain dotted string against a [`StructType`]
//!   schema, which tags each segment by looking its type up.
//!
//! # Example
//!
//! ```
//! use struct_path::{FieldPath, PathStep};
//!
//! let path = FieldPath::parse("top_field.items[].v").unwrap();
//! assert_eq!(path.head(), &PathStep::Field("top_field".to_string()));
//! assert_eq!(path.to_string(), "top_field.items[].v");
//!
//! let rest = path.rest().unwrap();
//! assert_eq!(rest.to_string(), "items[].v");
//! assert!(!rest.is_terminal());
//! ```

pub mod path;
pub mod schema;

pub use path::{FieldPath, PathError, PathStep};
pub use schema::{DataType, StructField, StructType};
