//! Metadata extraction from Python source
//!
//! Scripts are never imported or executed to learn about them. Everything
//! here is a light lexical scan of the source text:
//!
//! - [`extract_description`] - `main` docstring, else module docstring
//! - [`extract_dependencies`] - third-party top-level imports
//! - [`has_entry_point`] - presence of a top-level `main` function

mod docstring;
mod imports;
mod source;
mod stdlib;

use std::fs;
use std::path::Path;

pub use docstring::{clean_doc, extract_description, has_entry_point};
pub use imports::{extract_dependencies, imported_packages};
pub use stdlib::is_stdlib_module;

use crate::core::models::Metadata;

/// Build a metadata record for `name` by scanning the script at `path`
pub fn extract_metadata(name: &str, path: &Path) -> std::io::Result<Metadata> {
    let source = fs::read_to_string(path)?;
    Ok(metadata_from_source(name, &source))
}

/// Build a metadata record for `name` from script source
#[must_use]
pub fn metadata_from_source(name: &str, source: &str) -> Metadata {
    Metadata::generate(name, extract_description(source), extract_dependencies(source))
}
