#![deny(unsafe_code)]

//! Project persistence: one JSON document per project, an explicit schema
//! version, and a linear migration chain for legacy shapes.

pub mod error;
pub mod io;
pub mod migrate;

pub use error::{PersistenceError, Result};
pub use io::{load_project, project_from_str, project_to_string, save_project};
pub use migrate::{detect_version, migrate, upgrade_v0_to_v1};
