//! Catalog port
//!
//! Defines the interface for reading the remote script catalog.

use std::collections::BTreeMap;

use crate::core::models::Metadata;
use crate::error::CatalogError;

/// Category name to the script names it contains
pub type CategoryIndex = BTreeMap<String, Vec<String>>;

/// Read-only access to the catalog of standard scripts
pub trait Catalog {
    /// Metadata record of a catalog script
    fn fetch_metadata(&self, name: &str) -> Result<Metadata, CatalogError>;

    /// Source of a catalog script
    fn fetch_script(&self, name: &str) -> Result<String, CatalogError>;

    /// Category index of the catalog
    fn fetch_categories(&self) -> Result<CategoryIndex, CatalogError>;
}
