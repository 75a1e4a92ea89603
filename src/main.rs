//! pyscript - centralize personal Python utility scripts
//!
//! Run, add, remove and update scripts, each isolated in its own virtual
//! environment, and download standard scripts from the hub.

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

mod cli;

use std::process::ExitCode;

/// Main entry point for the pyscript CLI
fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) if err.is::<cli::Cancelled>() => {
            println!("{err}");
            ExitCode::FAILURE
        },
        Err(err) => {
            pyscript::console::error(format!("{err:#}"), None);
            ExitCode::FAILURE
        },
    }
}
