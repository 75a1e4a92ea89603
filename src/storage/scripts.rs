//! Script file storage

use std::fs;
use std::path::PathBuf;

use super::{stems_with_extension, validate_name};
use crate::error::StoreError;
use crate::paths::{Layout, SCRIPT_EXT};

/// Package marker that is never a script
const PACKAGE_INIT: &str = "__init__";

/// Script files under `<home>/scripts/`
#[derive(Debug, Clone)]
pub struct ScriptStore {
    dir: PathBuf,
}

impl ScriptStore {
    /// Store for a layout
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        Self::at(layout.scripts_dir())
    }

    /// Store rooted at an explicit directory
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Names of all stored scripts, sorted
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        Ok(stems_with_extension(&self.dir, SCRIPT_EXT)?
            .into_iter()
            .filter(|stem| stem != PACKAGE_INIT)
            .collect())
    }

    /// Path of the script file for `name`
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SCRIPT_EXT}"))
    }

    /// Whether the script exists
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.path(name).is_file()
    }

    /// Read the source of a script
    pub fn read(&self, name: &str) -> Result<String, StoreError> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::ScriptNotFound(name.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Write (or replace) a script
    pub fn save(&self, name: &str, content: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        log::debug!("writing script {}", path.display());
        fs::write(path, content)?;
        Ok(())
    }

    /// Delete a script; returns whether a file was removed
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.exists() {
            return Ok(false);
        }
        log::debug!("removing script {}", path.display());
        fs::remove_file(path)?;
        Ok(true)
    }
}
