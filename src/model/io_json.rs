//! JSON persistence for legends projects.
//!
//! A project file is exactly the project's serde form, pretty-printed. Note
//! that reading a project re-probes every referenced image file, so the
//! images must be reachable from the paths stored in the file.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::project::Project;
use crate::error::LegendsError;

/// Reads a project from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if a referenced
/// image cannot be probed.
pub fn read_project_json(path: &Path) -> Result<Project, LegendsError> {
    let file = File::open(path).map_err(LegendsError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LegendsError::ProjectJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a project to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_project_json(path: &Path, project: &Project) -> Result<(), LegendsError> {
    let file = File::create(path).map_err(LegendsError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, project).map_err(|source| {
        LegendsError::ProjectJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a project from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Project, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a project to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}
