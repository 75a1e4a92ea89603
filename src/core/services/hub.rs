//! Catalog operations applied to the local stores
//!
//! Downloads, update checks and the category index. Everything remote goes
//! through the [`Catalog`] port so this module can be driven by a fake.

use crate::core::models::{Metadata, ScriptKind, ScriptVersion};
use crate::core::ports::{Catalog, CategoryIndex};
use crate::error::{CatalogError, HubError};
use crate::paths::Layout;
use crate::storage::{MetadataStore, ScriptStore, validate_name};

/// Result of downloading one script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Script and metadata were saved
    Installed {
        /// A leftover metadata file without script was overwritten
        replaced_metadata: bool,
    },
    /// A standard script with this name is already present
    AlreadyInstalled,
    /// A custom script already uses this name
    CustomConflict,
}

/// A locally installed standard script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardScript {
    /// Script name
    pub name: String,
    /// Local version, `None` when missing or not numeric
    pub version: Option<ScriptVersion>,
}

/// Result of comparing a local script with the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCheck {
    /// Local and remote versions match
    UpToDate,
    /// The catalog has a different version (its metadata is attached)
    Outdated(Box<Metadata>),
}

/// Hub operations over a catalog and the local stores
#[derive(Debug)]
pub struct Hub<C> {
    catalog: C,
    scripts: ScriptStore,
    metadata: MetadataStore,
}

impl<C: Catalog> Hub<C> {
    /// Create a hub for a layout
    pub fn new(layout: &Layout, catalog: C) -> Self {
        Self {
            catalog,
            scripts: ScriptStore::new(layout),
            metadata: MetadataStore::new(layout),
        }
    }

    /// Download a catalog script unless one with the same name exists
    ///
    /// The metadata is written first and rolled back if the script itself
    /// cannot be fetched.
    ///
    /// # Errors
    ///
    /// Catalog failures (including "not found") and store failures.
    pub fn download(&self, name: &str) -> Result<DownloadOutcome, HubError> {
        validate_name(name)?;
        if self.scripts.exists(name) {
            let standard = self.metadata.get(name).is_ok_and(|m| m.is_standard());
            return Ok(if standard {
                DownloadOutcome::AlreadyInstalled
            } else {
                DownloadOutcome::CustomConflict
            });
        }

        let metadata = standardize(name, self.catalog.fetch_metadata(name)?);
        let replaced_metadata = self.metadata.exists(name);
        if replaced_metadata {
            log::debug!("overwriting leftover metadata for '{name}'");
        }
        self.metadata.save(name, &metadata, true)?;

        let source = match self.catalog.fetch_script(name) {
            Ok(source) => source,
            Err(e) => {
                log::debug!("rolling back metadata for '{name}'");
                self.metadata.delete(name)?;
                return Err(e.into());
            },
        };
        self.scripts.save(name, &source)?;

        Ok(DownloadOutcome::Installed { replaced_metadata })
    }

    /// Full category index of the catalog
    ///
    /// # Errors
    ///
    /// Catalog failures.
    pub fn remote_index(&self) -> Result<CategoryIndex, HubError> {
        Ok(self.catalog.fetch_categories()?)
    }

    /// Script names of one catalog category
    ///
    /// # Errors
    ///
    /// [`HubError::CategoryNotFound`] for an unknown category, or catalog
    /// failures.
    pub fn category_scripts(&self, category: &str) -> Result<Vec<String>, HubError> {
        self.remote_index()?
            .remove(category)
            .ok_or_else(|| HubError::CategoryNotFound(category.to_string()))
    }

    /// Local scripts whose metadata says `standard`
    ///
    /// # Errors
    ///
    /// Store failures while listing scripts.
    pub fn standard_scripts(&self) -> Result<Vec<StandardScript>, HubError> {
        let mut standard = Vec::new();
        for name in self.scripts.names()? {
            let Ok(metadata) = self.metadata.get(&name) else {
                continue;
            };
            if !metadata.is_standard() {
                continue;
            }
            let version = metadata.version.filter(ScriptVersion::is_valid);
            if version.is_none() {
                log::warn!("standard script '{name}' has no valid version, it will be updated");
            }
            standard.push(StandardScript { name, version });
        }
        Ok(standard)
    }

    /// Remote metadata of `name`
    ///
    /// # Errors
    ///
    /// Catalog failures.
    pub fn remote_metadata(&self, name: &str) -> Result<Metadata, HubError> {
        Ok(self.catalog.fetch_metadata(name)?)
    }

    /// Compare `local` with the catalog version of `name`
    ///
    /// A missing or invalid local version is always outdated.
    ///
    /// # Errors
    ///
    /// [`HubError::InvalidRemoteVersion`] when the catalog version is not
    /// numeric, or catalog failures.
    pub fn check_update(
        &self,
        name: &str,
        local: Option<&ScriptVersion>,
    ) -> Result<UpdateCheck, HubError> {
        let remote = self.catalog.fetch_metadata(name)?;
        let Some(remote_version) = remote.version.as_ref().filter(|v| v.is_valid()) else {
            return Err(HubError::InvalidRemoteVersion(name.to_string()));
        };

        if local.is_some_and(|local| local.same_release(remote_version)) {
            return Ok(UpdateCheck::UpToDate);
        }
        Ok(UpdateCheck::Outdated(Box::new(remote)))
    }

    /// Replace the local script and metadata of `name` with the catalog copy
    ///
    /// # Errors
    ///
    /// Catalog failures fetching the script, or store failures.
    pub fn install_latest(&self, name: &str, remote: Metadata) -> Result<(), HubError> {
        let source = self.catalog.fetch_script(name)?;
        self.scripts.save(name, &source)?;
        self.metadata.save(name, &standardize(name, remote), true)?;
        Ok(())
    }

}

/// Mark catalog metadata as standard and make sure it carries its name
fn standardize(name: &str, mut metadata: Metadata) -> Metadata {
    metadata.kind = ScriptKind::Standard;
    metadata.complete(name);
    metadata
}

/// Whether a hub error means the catalog has no such item
#[must_use]
pub const fn is_not_found(err: &HubError) -> bool {
    matches!(err, HubError::Catalog(CatalogError::NotFound(_)))
}
