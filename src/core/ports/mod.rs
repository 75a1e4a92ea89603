//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and external
//! systems (the package installer, the remote catalog).
//!
//! Implementations live in the `adapters` module; tests supply fakes.

mod catalog;
mod installer;

pub use catalog::{Catalog, CategoryIndex};
pub use installer::PackageInstaller;
