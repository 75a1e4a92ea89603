//! Metadata file storage
//!
//! One pretty-printed JSON object per script, indented with four spaces.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use super::{stems_with_extension, validate_name};
use crate::core::models::Metadata;
use crate::error::StoreError;
use crate::parser;
use crate::paths::{Layout, METADATA_EXT};

/// Metadata files under `<home>/metadata/`
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    /// Store for a layout
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        Self::at(layout.metadata_dir())
    }

    /// Store rooted at an explicit directory
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the metadata file for `name`
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{METADATA_EXT}"))
    }

    /// Whether a metadata file exists for `name`
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.path(name).is_file()
    }

    /// Names that have a metadata file, sorted
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        stems_with_extension(&self.dir, METADATA_EXT)
    }

    /// Build a custom record from explicit values
    #[must_use]
    pub fn generate(
        name: &str,
        description: &str,
        dependencies: Vec<crate::core::models::Dependency>,
    ) -> Metadata {
        Metadata::generate(name, description, dependencies)
    }

    /// Infer a record from the script at `script_path`
    pub fn extract(name: &str, script_path: &Path) -> Result<Metadata, StoreError> {
        if !script_path.is_file() {
            return Err(StoreError::FileNotFound(script_path.to_path_buf()));
        }
        Ok(parser::extract_metadata(name, script_path)?)
    }

    /// Read the record for `name`, completed with defaults
    pub fn get(&self, name: &str) -> Result<Metadata, StoreError> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::MetadataNotFound(name.to_string()));
        }
        let mut metadata = read_metadata(&path)?;
        metadata.complete(name);
        Ok(metadata)
    }

    /// Read a record from an arbitrary file
    pub fn get_from_path(path: &Path) -> Result<Metadata, StoreError> {
        if !path.is_file() {
            return Err(StoreError::FileNotFound(path.to_path_buf()));
        }
        read_metadata(path)
    }

    /// Write the record for `name`
    ///
    /// Fails with [`StoreError::MetadataExists`] when a file is already
    /// present and `overwrite` is false.
    pub fn save(&self, name: &str, metadata: &Metadata, overwrite: bool) -> Result<(), StoreError> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        if path.exists() && !overwrite {
            return Err(StoreError::MetadataExists(name.to_string()));
        }
        log::debug!("writing metadata {}", path.display());
        fs::write(path, to_pretty_json(metadata)?)?;
        Ok(())
    }

    /// Overwrite selected top-level fields of an existing record
    pub fn update(&self, name: &str, fields: Map<String, Value>) -> Result<Metadata, StoreError> {
        let mut metadata = self.get(name)?;
        metadata.merge(fields)?;
        self.save(name, &metadata, true)?;
        Ok(metadata)
    }

    /// Delete the record for `name`
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::MetadataNotFound(name.to_string()));
        }
        log::debug!("removing metadata {}", path.display());
        fs::remove_file(path)?;
        Ok(())
    }
}

fn read_metadata(path: &Path) -> Result<Metadata, StoreError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| StoreError::InvalidMetadata {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize with a four-space indent
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
