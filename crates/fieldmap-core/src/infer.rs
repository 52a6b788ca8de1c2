//! Semantic type inference for flattened fields.
//!
//! Two-tier policy: when a concrete (non-null) example exists, the label is
//! derived purely from the value's shape. Otherwise a naming-convention
//! heuristic runs over the field's final path segment, and the result is
//! marked nullable because it is a guess, not an observation.

use std::fmt;

use serde_json::Value;

use fieldmap_model::{LeafValue, PATH_SEPARATOR};

/// Closed set of semantic type labels the inferencer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    String,
    Integer,
    Decimal,
    Boolean,
    Object,
    Array,
    DateTime,
}

impl SemanticType {
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Decimal => "Decimal",
            Self::Boolean => "Boolean",
            Self::Object => "Object",
            Self::Array => "Array",
            Self::DateTime => "DateTime",
        }
    }
}

/// A semantic type plus a nullability qualifier, rendered as e.g.
/// `DateTime?`.
///
/// Advisory only: it seeds the editable type string and the operator may
/// overwrite it freely. Nothing downstream enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLabel {
    pub kind: SemanticType,
    pub nullable: bool,
}

impl TypeLabel {
    pub fn observed(kind: SemanticType) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn guessed(kind: SemanticType) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Infers a type label from a field name and an optional example value.
///
/// A present null example carries no shape information and falls through to
/// the name heuristic, same as an absent value.
pub fn infer_type(field_name: &str, example: Option<&Value>) -> TypeLabel {
    match example {
        Some(value) if !value.is_null() => {
            let kind = match value {
                Value::String(_) => SemanticType::String,
                Value::Number(n) if n.as_i64().is_some() => SemanticType::Integer,
                Value::Number(_) => SemanticType::Decimal,
                Value::Bool(_) => SemanticType::Boolean,
                Value::Object(_) => SemanticType::Object,
                Value::Array(_) => SemanticType::Array,
                Value::Null => unreachable!("null is handled by the outer match"),
            };
            TypeLabel::observed(kind)
        }
        _ => infer_from_name(field_name),
    }
}

/// Infers a type label for a leaf produced by flattening.
pub fn infer_leaf_type(field_name: &str, value: &LeafValue) -> TypeLabel {
    match value {
        LeafValue::Null => infer_from_name(field_name),
        LeafValue::Bool(_) => TypeLabel::observed(SemanticType::Boolean),
        LeafValue::Integer(_) => TypeLabel::observed(SemanticType::Integer),
        LeafValue::Float(_) => TypeLabel::observed(SemanticType::Decimal),
        LeafValue::Text(_) => TypeLabel::observed(SemanticType::String),
        LeafValue::EmptyArray => TypeLabel::observed(SemanticType::Array),
    }
}

/// Fixed-priority substring heuristic over the final path segment,
/// case-insensitive. First match wins.
fn infer_from_name(field_name: &str) -> TypeLabel {
    let key = field_name
        .rsplit(PATH_SEPARATOR)
        .next()
        .unwrap_or(field_name)
        .to_lowercase();
    let contains_any = |hints: &[&str]| hints.iter().any(|hint| key.contains(hint));

    let kind = if contains_any(&["date", "time", "dt"]) {
        SemanticType::DateTime
    } else if contains_any(&["flag", "is_"]) {
        SemanticType::Boolean
    } else if contains_any(&["qtd", "peso", "valor", "total", "price"]) {
        SemanticType::Decimal
    } else if contains_any(&["id", "cod", "num"]) {
        SemanticType::String
    } else if contains_any(&["list", "array", "items"]) {
        SemanticType::Array
    } else {
        SemanticType::String
    };
    TypeLabel::guessed(kind)
}
