//! pyscript - centralize personal Python utility scripts
//!
//! Scripts live in one place with their metadata, each one gets its own
//! virtual environment built from the imports it declares, and standard
//! scripts can be pulled from a remote catalog.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod console;
pub mod core;
pub mod error;
pub mod output;
pub mod parser;
pub mod paths;
pub mod storage;
