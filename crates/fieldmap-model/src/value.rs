//! Leaf values produced by payload flattening.

use std::fmt;

use serde_json::Value;

use crate::FieldPath;

/// Maximum number of characters kept when rendering an example value.
pub const EXAMPLE_VALUE_LIMIT: usize = 100;

/// Scalar leaf of a flattened document.
///
/// The variants form a closed set: the classification happens once when the
/// document is walked, and everything downstream pattern-matches over it.
/// `EmptyArray` is the sentinel for an array with no elements; it renders as
/// the literal `[]`.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    EmptyArray,
}

impl LeafValue {
    /// Classifies a scalar JSON value.
    ///
    /// Containers are not leaves; callers must only pass scalars. A number
    /// that does not fit `i64` is treated as a float.
    pub fn from_scalar(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Display form truncated to `limit` characters, respecting char
    /// boundaries.
    pub fn example_string(&self, limit: usize) -> String {
        let full = self.to_string();
        if full.chars().count() <= limit {
            full
        } else {
            full.chars().take(limit).collect()
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::EmptyArray => f.write_str("[]"),
        }
    }
}

/// One row of the flattened view of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatField {
    /// Dotted path to the leaf. Unique within one flattening pass.
    pub path: FieldPath,
    /// The leaf value found at that path.
    pub value: LeafValue,
    /// True when the leaf sits below an array that was collapsed to its
    /// first element, i.e. sibling elements were discarded.
    pub collapsed: bool,
}

impl FlatField {
    /// Example string bounded to [`EXAMPLE_VALUE_LIMIT`] characters.
    pub fn example(&self) -> String {
        self.value.example_string(EXAMPLE_VALUE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_scalars() {
        assert_eq!(LeafValue::from_scalar(&Value::Null), LeafValue::Null);
        assert_eq!(
            LeafValue::from_scalar(&serde_json::json!(42)),
            LeafValue::Integer(42)
        );
        assert_eq!(
            LeafValue::from_scalar(&serde_json::json!(3.5)),
            LeafValue::Float(3.5)
        );
        assert_eq!(
            LeafValue::from_scalar(&serde_json::json!("x")),
            LeafValue::Text("x".to_string())
        );
    }

    #[test]
    fn empty_array_renders_as_bracket_pair() {
        assert_eq!(LeafValue::EmptyArray.to_string(), "[]");
    }

    #[test]
    fn example_string_truncates_on_char_boundary() {
        let long = LeafValue::Text("á".repeat(200));
        let example = long.example_string(EXAMPLE_VALUE_LIMIT);
        assert_eq!(example.chars().count(), EXAMPLE_VALUE_LIMIT);
    }
}
