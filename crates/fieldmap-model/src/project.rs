//! Project aggregate: the explicit application state.
//!
//! The `Project` owns everything one mapping session works on. It is passed
//! explicitly to every component; nothing reads ambient globals. Mutating
//! operations take `&mut Project` and the whole aggregate serializes to one
//! JSON document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FieldMetadata, ModelError};

/// Schema version written by this build. Documents without a
/// `schema_version` key are treated as version 0 and migrated on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Which side of an endpoint a mapping table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

/// Persisted mapping state for one direction of one endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectionState {
    /// Canonical target id -> courier field path.
    #[serde(default)]
    pub mapping_rules: BTreeMap<String, String>,
    /// Courier field path -> annotations.
    #[serde(default)]
    pub field_metadata: BTreeMap<String, FieldMetadata>,
}

impl DirectionState {
    pub fn is_empty(&self) -> bool {
        self.mapping_rules.is_empty() && self.field_metadata.is_empty()
    }
}

/// A named operation with a request-side and a response-side mapping table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method label.
    #[serde(default = "Endpoint::default_method")]
    pub method: String,
    /// Free-form key/value sidecar shown as the export preamble.
    #[serde(default)]
    pub extra_metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub request: DirectionState,
    #[serde(default)]
    pub response: DirectionState,
}

impl Endpoint {
    fn default_method() -> String {
        "GET".to_string()
    }

    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            extra_metadata: BTreeMap::new(),
            request: DirectionState::default(),
            response: DirectionState::default(),
        }
    }

    pub fn direction(&self, direction: Direction) -> &DirectionState {
        match direction {
            Direction::Request => &self.request,
            Direction::Response => &self.response,
        }
    }

    pub fn direction_mut(&mut self, direction: Direction) -> &mut DirectionState {
        match direction {
            Direction::Request => &mut self.request,
            Direction::Response => &mut self.response,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(Self::default_method())
    }
}

/// Root aggregate for one mapping project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "Project::current_version")]
    pub schema_version: u32,
    /// Source system being mapped.
    #[serde(default)]
    pub courier_name: String,
    /// Free-text notes for the whole project.
    #[serde(default)]
    pub project_notes: String,
    /// DTO name -> raw canonical document.
    #[serde(default)]
    pub dto_library: BTreeMap<String, Value>,
    /// Endpoint name -> endpoint state.
    #[serde(default)]
    pub endpoints: BTreeMap<String, Endpoint>,
    /// Set only when the project is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Project {
    fn current_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn new(courier_name: impl Into<String>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            courier_name: courier_name.into(),
            project_notes: String::new(),
            dto_library: BTreeMap::new(),
            endpoints: BTreeMap::new(),
            updated_at: None,
        }
    }

    /// Looks up an endpoint by name.
    pub fn endpoint(&self, name: &str) -> Result<&Endpoint, ModelError> {
        self.endpoints
            .get(name)
            .ok_or_else(|| ModelError::UnknownEndpoint(name.to_string()))
    }

    pub fn endpoint_mut(&mut self, name: &str) -> Result<&mut Endpoint, ModelError> {
        self.endpoints
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownEndpoint(name.to_string()))
    }

    /// Adds a DTO document under the given name, replacing any previous one.
    pub fn insert_dto(&mut self, name: impl Into<String>, document: Value) {
        self.dto_library.insert(name.into(), document);
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_lookup_reports_unknown_names() {
        let project = Project::new("acme");
        assert!(matches!(
            project.endpoint("missing"),
            Err(ModelError::UnknownEndpoint(_))
        ));
    }

    #[test]
    fn endpoint_without_method_defaults_to_get() {
        let endpoint: Endpoint = serde_json::from_str("{}").unwrap();
        assert_eq!(endpoint.method, "GET");
        assert!(endpoint.request.is_empty());
    }

    #[test]
    fn project_round_trips() {
        let mut project = Project::new("acme");
        project.project_notes = "notes".to_string();
        project.insert_dto("OrderDTO", serde_json::json!({"id": "String"}));
        project
            .endpoints
            .insert("CreateOrder".to_string(), Endpoint::new("POST"));

        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back, project);
    }
}
