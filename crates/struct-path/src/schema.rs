//! Record schema model and schema-driven path resolution.
//!
//! Path segments are plain strings, but traversal behaves differently
//! for struct fields and array-of-struct fields. Rather than inspecting
//! runtime values, the schema tags each segment once at path
//! construction, so invalid paths are rejected before any record is
//! processed.

use serde::{Deserialize, Serialize};

use crate::path::{FieldPath, PathError, PathStep};

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    Utf8,
    Struct(StructType),
    Array { element: Box<DataType> },
}

impl DataType {
    pub fn is_struct(&self) -> bool {
        matches!(self, DataType::Struct(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array { .. })
    }

    /// The struct type reached by descending into this field, if any.
    ///
    /// For an array type this is the element struct type, since an
    /// array descent continues into each element.
    fn descend_struct(&self) -> Option<&StructType> {
        match self {
            DataType::Struct(st) => Some(st),
            DataType::Array { element } => match element.as_ref() {
                DataType::Struct(st) => Some(st),
                _ => None,
            },
            _ => None,
        }
    }
}

/// One declared field of a struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(flatten)]
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
}

/// An ordered, named collection of typed fields. Field order is
/// significant and preserved through serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    pub fields: Vec<StructField>,
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        StructType { fields }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve a plain dotted path against this schema, tagging each
    /// segment as a field or array descent from its declared type.
    ///
    /// # Errors
    ///
    /// Fails if the path is empty or has an empty segment, names an
    /// undeclared field, descends through a scalar, or descends into an
    /// array whose elements are not structs.
    ///
    /// # Example
    ///
    /// ```
    /// use struct_path::{DataType, StructField, StructType};
    ///
    /// let schema = StructType::new(vec![StructField {
    ///     name: "items".to_string(),
    ///     data_type: DataType::Array {
    ///         element: Box::new(DataType::Struct(StructType::new(vec![StructField {
    ///             name: "v".to_string(),
    ///             data_type: DataType::Integer,
    ///             nullable: false,
    ///         }]))),
    ///     },
    ///     nullable: true,
    /// }]);
    ///
    /// let path = schema.resolve("items.v").unwrap();
    /// assert_eq!(path.to_string(), "items[].v");
    /// ```
    pub fn resolve(&self, path: &str) -> Result<FieldPath, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<&str> = path.split('.').collect();
        let last = segments.len() - 1;

        let mut steps = Vec::with_capacity(segments.len());
        let mut current = self;
        let mut consumed: Vec<&str> = Vec::new();

        for (idx, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment(idx));
            }
            let field = current.field(segment).ok_or_else(|| PathError::UnknownField {
                field: segment.to_string(),
                at: prefix(&consumed),
            })?;

            if idx == last {
                // The leaf may be of any type; it is replaced wholesale.
                steps.push(PathStep::Field(segment.to_string()));
                break;
            }

            let step = match &field.data_type {
                DataType::Struct(_) => PathStep::Field(segment.to_string()),
                DataType::Array { .. } => PathStep::ArrayField(segment.to_string()),
                _ => {
                    return Err(PathError::NotAStruct {
                        field: segment.to_string(),
                        at: prefix(&consumed),
                    });
                }
            };
            current = field.data_type.descend_struct().ok_or_else(|| PathError::NotAnArray {
                field: segment.to_string(),
                at: prefix(&consumed),
            })?;
            steps.push(step);
            consumed.push(segment);
        }

        FieldPath::from_steps(steps)
    }

    /// Validate an explicitly tagged path against this schema.
    ///
    /// Checks that every step names a declared field and that its tag
    /// matches the declared type: array steps require array-of-struct
    /// fields, non-terminal field steps require struct fields.
    pub fn check_path(&self, path: &FieldPath) -> Result<(), PathError> {
        let steps = path.steps();
        let last = steps.len() - 1;

        let mut current = self;
        let mut consumed: Vec<&str> = Vec::new();

        for (idx, step) in steps.iter().enumerate() {
            let name = step.name();
            let field = current.field(name).ok_or_else(|| PathError::UnknownField {
                field: name.to_string(),
                at: prefix(&consumed),
            })?;

            if idx == last {
                break;
            }

            match step {
                PathStep::Field(_) if field.data_type.is_struct() => {}
                PathStep::Field(_) => {
                    return Err(PathError::NotAStruct {
                        field: name.to_string(),
                        at: prefix(&consumed),
                    });
                }
                PathStep::ArrayField(_) if field.data_type.is_array() => {}
                PathStep::ArrayField(_) => {
                    return Err(PathError::NotAnArray {
                        field: name.to_string(),
                        at: prefix(&consumed),
                    });
                }
            }

            current = field.data_type.descend_struct().ok_or_else(|| PathError::NotAnArray {
                field: name.to_string(),
                at: prefix(&consumed),
            })?;
            consumed.push(name);
        }

        Ok(())
    }
}

fn prefix(consumed: &[&str]) -> String {
    if consumed.is_empty() {
        "<root>".to_string()
    } else {
        consumed.join(".")
    }
}
