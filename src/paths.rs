//! Centralized path definitions for pyscript
//!
//! This module provides a single source of truth for all filesystem paths used by pyscript.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.pyscript/                 # PYSCRIPT_HOME overrides this location
//! ├── .initialized             # Marker: default scripts were installed
//! ├── config.toml              # Optional user configuration
//! ├── scripts/                 # One <name>.py per script
//! ├── metadata/                # One <name>.json per script
//! └── venvs/                   # One virtual environment per script
//!     └── <name>/
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home location
pub const HOME_ENV: &str = "PYSCRIPT_HOME";

/// Default home directory name (under the user's home)
const HOME_DIR: &str = ".pyscript";

/// Scripts subdirectory
const SCRIPTS_DIR: &str = "scripts";

/// Metadata subdirectory
const METADATA_DIR: &str = "metadata";

/// Virtual environments subdirectory
const VENVS_DIR: &str = "venvs";

/// First-run marker filename
const INITIALIZED_FILE: &str = ".initialized";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Script file extension
pub const SCRIPT_EXT: &str = "py";

/// Metadata file extension
pub const METADATA_EXT: &str = "json";

/// The on-disk layout rooted at a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `base`
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolve the layout from `PYSCRIPT_HOME`, falling back to `~/.pyscript`
    #[must_use]
    pub fn resolve() -> Self {
        match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => Self::new(home),
            _ => Self::new(
                dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(HOME_DIR),
            ),
        }
    }

    /// Create every directory of the layout (idempotent)
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [self.base.clone(), self.scripts_dir(), self.metadata_dir(), self.venvs_dir()] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Base directory
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory holding script files
    #[must_use]
    pub fn scripts_dir(&self) -> PathBuf {
        self.base.join(SCRIPTS_DIR)
    }

    /// Directory holding metadata files
    #[must_use]
    pub fn metadata_dir(&self) -> PathBuf {
        self.base.join(METADATA_DIR)
    }

    /// Directory holding per-script environments
    #[must_use]
    pub fn venvs_dir(&self) -> PathBuf {
        self.base.join(VENVS_DIR)
    }

    /// First-run marker file
    #[must_use]
    pub fn initialized_marker(&self) -> PathBuf {
        self.base.join(INITIALIZED_FILE)
    }

    /// User configuration file
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    /// Path of the script file for `name`
    #[must_use]
    pub fn script_file(&self, name: &str) -> PathBuf {
        self.scripts_dir().join(format!("{name}.{SCRIPT_EXT}"))
    }

    /// Path of the metadata file for `name`
    #[must_use]
    pub fn metadata_file(&self, name: &str) -> PathBuf {
        self.metadata_dir().join(format!("{name}.{METADATA_EXT}"))
    }

    /// Path of the environment directory for `name`
    #[must_use]
    pub fn env_dir(&self, name: &str) -> PathBuf {
        self.venvs_dir().join(name)
    }
}

// =============================================================================
// Paths inside a virtual environment
// =============================================================================

/// Executables directory of a virtual environment
#[must_use]
pub fn env_bin_dir(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts")
    } else {
        env_dir.join("bin")
    }
}

/// Python interpreter of a virtual environment
#[must_use]
pub fn env_python(env_dir: &Path) -> PathBuf {
    env_bin_dir(env_dir).join(exe_name("python"))
}

/// pip executable of a virtual environment
#[must_use]
pub fn env_pip(env_dir: &Path) -> PathBuf {
    env_bin_dir(env_dir).join(exe_name("pip"))
}

fn exe_name(stem: &str) -> String {
    if cfg!(windows) {
        format!("{stem}.exe")
    } else {
        stem.to_string()
    }
}
