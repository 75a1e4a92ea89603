//! Orphan and cache removal
//!
//! An orphan is a metadata file or an environment directory whose script is
//! gone. Bytecode caches are swept from everywhere under the home except
//! the environments, whose site-packages manage their own.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use super::{MetadataStore, ScriptStore};
use crate::error::StoreError;
use crate::paths::Layout;

const PYCACHE_DIR: &str = "__pycache__";

/// What [`sweep`] removed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Swept {
    /// Names whose orphan metadata file was removed
    pub metadata: Vec<String>,
    /// Names whose orphan environment was removed
    pub environments: Vec<String>,
    /// Removed cache directories, relative to the home
    pub caches: Vec<String>,
}

/// Remove orphan metadata, orphan environments and `__pycache__` directories
pub fn sweep(layout: &Layout) -> Result<Swept, StoreError> {
    let scripts: BTreeSet<String> = ScriptStore::new(layout).names()?.into_iter().collect();
    let mut swept = Swept::default();

    for name in MetadataStore::new(layout).names()? {
        if !scripts.contains(&name) {
            log::debug!("removing orphan metadata '{name}'");
            fs::remove_file(layout.metadata_file(&name))?;
            swept.metadata.push(name);
        }
    }

    let venvs = layout.venvs_dir();
    if venvs.is_dir() {
        let mut orphans = Vec::new();
        for entry in fs::read_dir(&venvs)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() && !scripts.contains(&name) {
                orphans.push(name);
            }
        }
        orphans.sort();
        for name in orphans {
            log::debug!("removing orphan environment '{name}'");
            fs::remove_dir_all(venvs.join(&name))?;
            swept.environments.push(name);
        }
    }

    swept.caches = remove_caches(layout.base(), &venvs)?;
    Ok(swept)
}

fn remove_caches(base: &Path, skip: &Path) -> io::Result<Vec<String>> {
    let caches: Vec<_> = WalkDir::new(base)
        .into_iter()
        .filter_entry(|e| e.path() != skip)
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && e.file_name() == PYCACHE_DIR)
        .map(walkdir::DirEntry::into_path)
        .collect();

    let mut removed = Vec::new();
    for cache in caches {
        if !cache.exists() {
            continue;
        }
        log::debug!("removing {}", cache.display());
        fs::remove_dir_all(&cache)?;
        let shown = cache.strip_prefix(base).unwrap_or(&cache);
        removed.push(shown.display().to_string());
    }
    removed.sort();
    Ok(removed)
}
