use std::fmt;

use crate::ModelError;

/// Separator between path segments in a flattened field name.
pub const PATH_SEPARATOR: char = '.';

/// Dotted path addressing one leaf position inside a nested document.
///
/// Segments are joined by [`PATH_SEPARATOR`]. Within one flattening pass
/// paths are unique.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidFieldPath(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a path from already-validated segments.
    ///
    /// Non-string keys from foreign sources must be coerced to strings
    /// before they get here.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&PATH_SEPARATOR.to_string());
        Self::new(joined)
    }

    /// Extends this path with one more key segment.
    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}{}{}", self.0, PATH_SEPARATOR, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }

    /// Final segment of the path, used by the naming-convention type
    /// heuristic.
    pub fn last_segment(&self) -> &str {
        self.0
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
