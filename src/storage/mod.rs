//! On-disk stores for scripts and their metadata
//!
//! - [`scripts`]: `<home>/scripts/<name>.py`
//! - [`metadata`]: `<home>/metadata/<name>.json`
//! - [`bootstrap`]: layout creation and first-run default scripts
//! - [`cleanup`]: orphan and cache removal

/// First-run initialization
pub mod bootstrap;
/// Orphan and cache removal
pub mod cleanup;
/// Metadata file storage
pub mod metadata;
/// Script file storage
pub mod scripts;

use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub use bootstrap::{InitReport, initialize};
pub use cleanup::{Swept, sweep};
pub use metadata::MetadataStore;
pub use scripts::ScriptStore;

/// Check that a script name is safe to use as a file stem
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name.contains("..")
        || name.starts_with('-');
    if invalid {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(name)
    }
}

/// Derive a script name from a file stem (blanks become dashes)
pub fn normalize_name(stem: &str) -> Result<String, StoreError> {
    let name = stem.trim().replace(char::is_whitespace, "-");
    validate_name(&name)?;
    Ok(name)
}

/// Stems of the files in `dir` with extension `ext`, sorted
pub(crate) fn stems_with_extension(dir: &Path, ext: &str) -> Result<Vec<String>, StoreError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let pattern = format!("{}/*.{ext}", glob::Pattern::escape(&dir.to_string_lossy()));
    let paths = glob::glob(&pattern).map_err(|e| {
        StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))
    })?;

    let mut stems: Vec<String> = paths
        .filter_map(Result::ok)
        .filter(|p: &PathBuf| p.is_file())
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    stems.sort();
    Ok(stems)
}
