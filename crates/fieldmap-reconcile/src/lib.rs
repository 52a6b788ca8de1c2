#![deny(unsafe_code)]

//! Mapping reconciliation: merges a freshly flattened field list with
//! previously persisted mapping rules and per-field annotations, and
//! transforms edited rows back into persisted state.

pub mod catalog;
pub mod reconcile;
pub mod rows;

pub use catalog::OptionCatalog;
pub use reconcile::{reconcile, rows_from_state, save_rows};
pub use rows::{MappingRow, SaveOutcome, TargetConflict};
