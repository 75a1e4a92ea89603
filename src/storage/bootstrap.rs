//! First-run initialization
//!
//! Every invocation makes sure the layout exists. The first one also copies
//! the bundled default scripts in, then writes the `.initialized` marker so
//! defaults the user removed do not come back.

use std::fs;
use std::io;
use std::path::Path;

use include_dir::{Dir, include_dir};

use crate::paths::{Layout, METADATA_EXT, SCRIPT_EXT};

static DEFAULT_SCRIPTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/default_scripts");

/// What [`initialize`] did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Whether this was the first run
    pub first_run: bool,
    /// Default scripts copied into the layout
    pub installed: Vec<String>,
}

/// Ensure the layout and install default scripts on first run
pub fn initialize(layout: &Layout) -> io::Result<InitReport> {
    layout.ensure()?;

    let marker = layout.initialized_marker();
    if marker.exists() {
        return Ok(InitReport::default());
    }

    log::debug!("first run, installing default scripts into {}", layout.base().display());
    let installed = install_defaults(layout)?;
    fs::write(&marker, "")?;

    Ok(InitReport {
        first_run: true,
        installed,
    })
}

/// Names of the bundled default scripts
#[must_use]
pub fn default_script_names() -> Vec<String> {
    let mut names: Vec<String> = DEFAULT_SCRIPTS
        .files()
        .filter(|f| has_extension(f.path(), SCRIPT_EXT))
        .filter_map(|f| f.path().file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

fn install_defaults(layout: &Layout) -> io::Result<Vec<String>> {
    let mut installed = Vec::new();

    for name in default_script_names() {
        let script = layout.script_file(&name);
        if script.exists() {
            continue;
        }
        let Some(source) = DEFAULT_SCRIPTS.get_file(format!("{name}.{SCRIPT_EXT}")) else {
            continue;
        };
        fs::write(&script, source.contents())?;

        let metadata = layout.metadata_file(&name);
        if !metadata.exists() {
            if let Some(bundled) = DEFAULT_SCRIPTS.get_file(format!("{name}.{METADATA_EXT}")) {
                fs::write(&metadata, bundled.contents())?;
            }
        }
        installed.push(name);
    }

    Ok(installed)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}
