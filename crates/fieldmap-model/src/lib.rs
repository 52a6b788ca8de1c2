#![deny(unsafe_code)]

//! Data model for payload field-mapping projects.
//!
//! A project maps leaf fields of an external ("courier") payload onto leaves
//! of internal canonical models ("DTOs"). This crate holds the shared types:
//! flattened fields, canonical options, target selections, per-field
//! annotations, and the `Project` aggregate that everything operates on.

pub mod canonical;
pub mod enums;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod project;
pub mod value;

pub use canonical::{CanonicalOption, TargetSelection};
pub use enums::{Requirement, StatusTag};
pub use error::{ModelError, Result};
pub use ids::{FieldPath, PATH_SEPARATOR};
pub use metadata::FieldMetadata;
pub use project::{
    CURRENT_SCHEMA_VERSION, Direction, DirectionState, Endpoint, Project,
};
pub use value::{EXAMPLE_VALUE_LIMIT, FlatField, LeafValue};
