//! Path steps and the path descriptor.

use std::fmt;

use thiserror::Error;

/// Maximum allowed number of steps in a path.
const MAX_PATH_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH")]
    Empty,
    #[error("EMPTY_SEGMENT at position {0}")]
    EmptySegment(usize),
    #[error("TRAILING_ARRAY_STEP: `{0}[]` names nothing to replace")]
    TrailingArrayStep(String),
    #[error("PATH_TOO_DEEP")]
    TooDeep,
    #[error("UNKNOWN_FIELD: no field `{field}` declared at `{at}`")]
    UnknownField { field: String, at: String },
    #[error("NOT_A_STRUCT: field `{field}` at `{at}` is not a struct, cannot descend")]
    NotAStruct { field: String, at: String },
    #[error("NOT_AN_ARRAY: field `{field}` at `{at}` is not an array of structs")]
    NotAnArray { field: String, at: String },
}

/// A single descent step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Descend into the struct field with this name.
    Field(String),
    /// Descend into the array-of-struct field with this name; the
    /// remaining path applies to every element independently.
    ArrayField(String),
}

impl PathStep {
    /// The field name this step descends into.
    pub fn name(&self) -> &str {
        match self {
            PathStep::Field(name) | PathStep::ArrayField(name) => name,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, PathStep::ArrayField(_))
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, "{name}"),
            PathStep::ArrayField(name) => write!(f, "{name}[]"),
        }
    }
}

/// An ordered, non-empty sequence of descent steps ending in a plain
/// field step (the leaf being replaced).
///
/// Built once by the caller and reused read-only across invocations;
/// nothing here mutates after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    steps: Vec<PathStep>,
}

impl FieldPath {
    /// Parse the dotted path syntax, `[]` suffix marking array descents.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, a segment is empty, or
    /// the final segment carries `[]` (an array descent names nothing
    /// to replace).
    ///
    /// # Example
    ///
    /// ```
    /// use struct_path::FieldPath;
    ///
    /// FieldPath::parse("a.b.c").unwrap();
    /// FieldPath::parse("a.items[].v").unwrap();
    /// FieldPath::parse("").unwrap_err();
    /// FieldPath::parse("a.items[]").unwrap_err();
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let mut steps = Vec::new();
        for (idx, segment) in path.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment(idx));
            }
            let step = match segment.strip_suffix("[]") {
                Some(name) if name.is_empty() => return Err(PathError::EmptySegment(idx)),
                Some(name) => PathStep::ArrayField(name.to_string()),
                None => PathStep::Field(segment.to_string()),
            };
            steps.push(step);
        }
        Self::from_steps(steps)
    }

    /// Build a path from explicitly tagged steps.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is empty, exceeds the depth limit,
    /// or ends in an array step.
    pub fn from_steps(steps: Vec<PathStep>) -> Result<Self, PathError> {
        match steps.last() {
            None => return Err(PathError::Empty),
            Some(PathStep::ArrayField(name)) => {
                return Err(PathError::TrailingArrayStep(name.clone()));
            }
            Some(PathStep::Field(_)) => {}
        }
        if steps.len() > MAX_PATH_DEPTH {
            return Err(PathError::TooDeep);
        }
        Ok(FieldPath { steps })
    }

    /// The first step of the path.
    pub fn head(&self) -> &PathStep {
        // Invariant: steps is non-empty.
        &self.steps[0]
    }

    /// The path after the first step, or `None` if the head was the
    /// only step.
    pub fn rest(&self) -> Option<FieldPath> {
        if self.steps.len() == 1 {
            return None;
        }
        Some(FieldPath {
            steps: self.steps[1..].to_vec(),
        })
    }

    /// True iff exactly one step remains (the leaf).
    pub fn is_terminal(&self) -> bool {
        self.steps.len() == 1
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a path is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The leaf step of the path (always a plain field).
    pub fn leaf(&self) -> &PathStep {
        &self.steps[self.steps.len() - 1]
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_fields() {
        let path = FieldPath::parse("a.b.c").unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Field("a".to_string()),
                PathStep::Field("b".to_string()),
                PathStep::Field("c".to_string()),
            ]
        );
    }

    #[test]
    fn parse_array_descent() {
        let path = FieldPath::parse("top.items[].v").unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Field("top".to_string()),
                PathStep::ArrayField("items".to_string()),
                PathStep::Field("v".to_string()),
            ]
        );
    }

    #[test]
    fn parse_single_segment() {
        let path = FieldPath::parse("only").unwrap();
        assert!(path.is_terminal());
        assert_eq!(path.head().name(), "only");
    }

    #[test]
    fn parse_empty_path() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn parse_empty_segment() {
        assert_eq!(FieldPath::parse("a..b"), Err(PathError::EmptySegment(1)));
        assert_eq!(FieldPath::parse(".a"), Err(PathError::EmptySegment(0)));
        assert_eq!(FieldPath::parse("[].a"), Err(PathError::EmptySegment(0)));
    }

    #[test]
    fn parse_trailing_array_step() {
        assert_eq!(
            FieldPath::parse("a.items[]"),
            Err(PathError::TrailingArrayStep("items".to_string()))
        );
    }

    #[test]
    fn from_steps_rejects_empty() {
        assert_eq!(FieldPath::from_steps(vec![]), Err(PathError::Empty));
    }

    #[test]
    fn from_steps_rejects_array_leaf() {
        let steps = vec![
            PathStep::Field("a".to_string()),
            PathStep::ArrayField("b".to_string()),
        ];
        assert_eq!(
            FieldPath::from_steps(steps),
            Err(PathError::TrailingArrayStep("b".to_string()))
        );
    }

    #[test]
    fn head_rest_terminal() {
        let path = FieldPath::parse("a.b[].c").unwrap();
        assert!(!path.is_terminal());
        assert_eq!(path.head(), &PathStep::Field("a".to_string()));

        let rest = path.rest().unwrap();
        assert_eq!(rest.head(), &PathStep::ArrayField("b".to_string()));

        let last = rest.rest().unwrap();
        assert!(last.is_terminal());
        assert_eq!(last.head(), &PathStep::Field("c".to_string()));
        assert!(last.rest().is_none());
    }

    #[test]
    fn display_round_trips() {
        for src in ["a", "a.b.c", "a.items[].v", "x[].y[].z"] {
            let path = FieldPath::parse(src).unwrap();
            assert_eq!(path.to_string(), src);
            assert_eq!(FieldPath::parse(&path.to_string()).unwrap(), path);
        }
    }

    #[test]
    fn depth_limit() {
        let deep = vec!["f"; MAX_PATH_DEPTH + 1].join(".");
        assert_eq!(FieldPath::parse(&deep), Err(PathError::TooDeep));
    }
}
