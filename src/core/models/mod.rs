//! Domain models for pyscript
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Metadata`] - What pyscript knows about a script
//! - [`Dependency`] - A third-party package a script needs
//! - [`ScriptKind`] - Whether a script is custom or from the catalog
//! - [`ScriptVersion`] - Catalog version of a standard script

mod dependency;
mod kind;
mod metadata;
mod version;

pub use dependency::Dependency;
pub use kind::ScriptKind;
pub use metadata::{CUSTOM_CATEGORY, Metadata};
pub use version::ScriptVersion;
