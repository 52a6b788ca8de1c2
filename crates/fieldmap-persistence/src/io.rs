//! Project file I/O.
//!
//! Saves use an atomic write (temp file + rename) so a crash mid-save never
//! corrupts an existing project file. Loads run the migration chain before
//! the typed deserialize; a failed parse leaves caller state untouched.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use fieldmap_model::{CURRENT_SCHEMA_VERSION, Project};

use crate::error::{PersistenceError, Result};
use crate::migrate::migrate;

/// Timestamp format written into `updated_at`.
const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Restores a project from JSON text, migrating legacy shapes.
pub fn project_from_str(text: &str) -> Result<Project> {
    let raw: Value =
        serde_json::from_str(text).map_err(|source| PersistenceError::Malformed { source })?;
    let migrated = migrate(raw)?;
    serde_json::from_value(migrated).map_err(|source| PersistenceError::Malformed { source })
}

/// Serializes a project to pretty-printed JSON.
pub fn project_to_string(project: &Project) -> Result<String> {
    serde_json::to_string_pretty(project)
        .map_err(|source| PersistenceError::Serialization { source })
}

/// Loads a project file from disk.
pub fn load_project(path: &Path) -> Result<Project> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let project = project_from_str(&text)?;
    tracing::info!(path = %path.display(), "loaded project");
    Ok(project)
}

/// Saves a project to disk, stamping `updated_at`.
pub fn save_project(project: &mut Project, path: &Path) -> Result<()> {
    project.schema_version = CURRENT_SCHEMA_VERSION;
    project.updated_at = Some(chrono::Local::now().format(UPDATED_AT_FORMAT).to_string());

    let text = project_to_string(project)?;
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|source| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(text.as_bytes())
        .map_err(|source| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source,
        })?;
    file.sync_all().map_err(|source| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "saved project");
    Ok(())
}
