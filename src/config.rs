//! User configuration
//!
//! Config is stored at `<home>/config.toml`. Every field is optional and
//! environment variables take precedence over the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paths::Layout;

/// Environment variable overriding the catalog base URL
pub const CATALOG_URL_ENV: &str = "PYSCRIPT_CATALOG_URL";

/// Environment variable overriding the system Python interpreter
pub const PYTHON_ENV: &str = "PYSCRIPT_PYTHON";

/// Default catalog location (raw files of the hub repository)
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/pyscript-hub/pyscript-hub/main";

/// pyscript configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Interpreter settings
    #[serde(default)]
    pub python: PythonConfig,
}

/// Remote catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog
    #[serde(default = "default_catalog_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Interpreter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Interpreter used to create environments and run dependency-free
    /// scripts. `None` means auto-detect (`python3`, then `python`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
}

impl Config {
    /// Load config for a layout, applying environment overrides
    #[must_use]
    pub fn load(layout: &Layout) -> Self {
        let mut config = Self::load_file(&layout.config_file());
        config.apply_env();
        config
    }

    /// Load config from a file, or defaults if missing or malformed
    #[must_use]
    pub fn load_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map_err(anyhow::Error::from).and_then(|content| {
            toml::from_str::<Self>(&content).map_err(anyhow::Error::from)
        }) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring config file {}: {e}", path.display());
                Self::default()
            },
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(CATALOG_URL_ENV) {
            if !url.trim().is_empty() {
                self.catalog.url = url;
            }
        }
        if let Ok(python) = std::env::var(PYTHON_ENV) {
            if !python.trim().is_empty() {
                self.python.interpreter = Some(python);
            }
        }
    }

    /// Catalog base URL without a trailing slash
    #[must_use]
    pub fn catalog_url(&self) -> &str {
        self.catalog.url.trim_end_matches('/')
    }
}
