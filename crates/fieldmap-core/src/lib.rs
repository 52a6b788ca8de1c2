#![deny(unsafe_code)]

//! Payload flattening and semantic type inference.
//!
//! This crate is the algorithmic core of the field-mapping toolkit: it
//! reduces nested documents to dotted-path leaf tables, rebuilds nested
//! objects from such tables, and assigns advisory semantic type labels.

pub mod flatten;
pub mod infer;

pub use flatten::{flatten, normalize_document, unflatten};
pub use infer::{SemanticType, TypeLabel, infer_leaf_type, infer_type};
