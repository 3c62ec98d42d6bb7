//! Reading type definitions and model documents from disk.
//!
//! Every `*.json` file below a directory is one document. Files are visited
//! in path order so that registration order, and therefore duplicate
//! detection, does not depend on the file system.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// A document that was read but cannot be used.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input directory does not exist.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// A type definition file does not hold a JSON object.
    #[error("{} does not contain a JSON object", .0.display())]
    NotAnObject(PathBuf),
}

/// One JSON document and the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Source file.
    pub path: PathBuf,
    /// Parsed content.
    pub document: Value,
}

impl LoadedDocument {
    /// The file name without its extension.
    #[must_use]
    pub fn stem(&self) -> String {
        file_stem(&self.path)
    }
}

/// Lists every `*.json` file below `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory or cannot be walked.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()).into());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().map(|x| x == "json").unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Loads every type definition below `dir`.
///
/// A definition without a `type` property is named after its file stem.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked, a file cannot be read
/// or parsed, or a file does not hold a JSON object.
pub fn load_definitions(dir: &Path) -> Result<Vec<LoadedDocument>> {
    let mut loaded = Vec::new();
    for path in json_files(dir)? {
        let mut document = read_json(&path)?;
        let stem = file_stem(&path);
        let Some(map) = document.as_object_mut() else {
            return Err(LoadError::NotAnObject(path).into());
        };
        map.entry("type").or_insert(Value::String(stem));
        loaded.push(LoadedDocument { path, document });
    }
    debug!(target: "multicell::loader", dir = %dir.display(), count = loaded.len(), "loaded definitions");
    Ok(loaded)
}

/// Loads one model document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_model(path: &Path) -> Result<LoadedDocument> {
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        document: read_json(path)?,
    })
}

/// Loads every model document below `dir`.
///
/// # Errors
///
/// As [`json_files`] and [`load_model`].
pub fn load_models(dir: &Path) -> Result<Vec<LoadedDocument>> {
    json_files(dir)?.iter().map(|p| load_model(p)).collect()
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
