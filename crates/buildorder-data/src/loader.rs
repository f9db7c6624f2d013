//! Reads action data files, resolves name references, builds the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers used by [`load_catalog`].

use crate::schema::ActionData;
use buildorder_core::catalog::{ActionCatalog, ActionCatalogBuilder, CatalogError};
use buildorder_core::id::ActionTypeId;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Base name of the catalog data file.
pub const ACTIONS_FILE: &str = "actions";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The catalog file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The resolved actions do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for `{base_name}.ron`, `.toml`, or `.json`.
///
/// Returns `Ok(None)` if none exists, or `Err(ConflictingFormats)` if more
/// than one does.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Deserialize a list from a file. TOML files hold the array under
/// `toml_key` in a top-level table; RON and JSON hold a bare list.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Catalog resolution
// ===========================================================================

/// Look up a name, returning an `UnresolvedRef` error if not found.
fn resolve_name(
    names: &HashMap<String, ActionTypeId>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<ActionTypeId, DataLoadError> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| DataLoadError::UnresolvedRef {
            file: file.to_path_buf(),
            name: name.to_string(),
            expected_kind,
        })
}

/// Build a catalog from parsed action data. `file` is used for error
/// reporting only.
pub fn build_catalog(actions: &[ActionData], file: &Path) -> Result<ActionCatalog, DataLoadError> {
    let mut builder = ActionCatalogBuilder::new();
    let mut names: HashMap<String, ActionTypeId> = HashMap::new();

    // Register everything first so references may point forward.
    for data in actions {
        if names.contains_key(&data.name) {
            return Err(DataLoadError::DuplicateName {
                file: file.to_path_buf(),
                name: data.name.clone(),
            });
        }
        let id = builder.register(&data.name, data.kind, data.build_time);
        names.insert(data.name.clone(), id);
    }

    for data in actions {
        let id = names[&data.name];
        if let Some(producer) = &data.producer {
            let producer = resolve_name(&names, producer, file, "producer")?;
            builder.produced_by(id, producer)?;
        }
        if let Some(addon) = &data.requires_addon {
            let addon = resolve_name(&names, addon, file, "add-on")?;
            builder.requires_addon(id, addon)?;
        }
    }

    Ok(builder.build()?)
}

/// Load a catalog from a single data file.
pub fn load_catalog(path: &Path) -> Result<ActionCatalog, DataLoadError> {
    let actions: Vec<ActionData> = deserialize_list(path, ACTIONS_FILE)?;
    build_catalog(&actions, path)
}

/// Load a catalog from the `actions.*` file in `dir`.
pub fn load_catalog_dir(dir: &Path) -> Result<ActionCatalog, DataLoadError> {
    let path = require_data_file(dir, ACTIONS_FILE)?;
    load_catalog(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
