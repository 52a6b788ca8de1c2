#![deny(unsafe_code)]

//! Import surfaces: operator payloads (JSON/XML), canonical models, and
//! API-collection exports.

pub mod collection;
pub mod error;
pub mod payload;
pub mod schema;

pub use collection::{import_collection, merge_endpoints};
pub use error::{IngestError, Result};
pub use payload::{parse_payload, xml_to_value};
pub use schema::{CanonicalImport, import_canonical};
