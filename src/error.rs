//! Error types for the pyscript library
//!
//! Each seam has its own error enum; the binary wraps them with `anyhow`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the on-disk script and metadata stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Script file is absent
    #[error("script '{0}' not found")]
    ScriptNotFound(String),

    /// Metadata file is absent
    #[error("metadata file for '{0}' doesn't exist")]
    MetadataNotFound(String),

    /// Metadata file exists and overwrite was not requested
    #[error("metadata file for '{0}' already exists")]
    MetadataExists(String),

    /// An input file given by path is absent
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Script name is empty or would escape the layout
    #[error("invalid script name '{0}'")]
    InvalidName(String),

    /// Metadata file is not valid JSON for a metadata record
    #[error("invalid metadata in {}: {source}", path.display())]
    InvalidMetadata {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// IO error during file operations
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from environment creation and package installation
#[derive(Debug, Error)]
pub enum EnvError {
    /// No usable system interpreter
    #[error("no Python interpreter found (tried {0})")]
    InterpreterNotFound(String),

    /// `python -m venv` failed
    #[error("failed to create virtual environment at {}: {reason}", path.display())]
    CreateFailed {
        /// Environment directory
        path: PathBuf,
        /// Installer output or spawn error
        reason: String,
    },

    /// Environment still lacks its interpreter or pip after recreation
    #[error("virtual environment for '{0}' is damaged")]
    Damaged(String),

    /// Environment directory is absent
    #[error("no virtual environment for '{0}'")]
    NotFound(String),

    /// `pip install` failed
    #[error("failed to install {package}: {stderr}")]
    InstallFailed {
        /// Package spec passed to pip
        package: String,
        /// Installer stderr
        stderr: String,
    },

    /// `pip uninstall` failed
    #[error("failed to uninstall {package}: {stderr}")]
    UninstallFailed {
        /// Package name
        package: String,
        /// Installer stderr
        stderr: String,
    },

    /// IO error during environment operations
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from the remote catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered 404
    #[error("not found on the catalog: {0}")]
    NotFound(String),

    /// The catalog answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Connection, timeout or body read failure
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Client error message
        message: String,
    },

    /// Response body is not what the catalog should serve
    #[error("invalid content at {url}: {message}")]
    Parse {
        /// Requested URL
        url: String,
        /// Parse error message
        message: String,
    },
}

/// Errors from hub operations (catalog applied to local stores)
#[derive(Debug, Error)]
pub enum HubError {
    /// Catalog failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Local store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Category absent from the catalog index
    #[error("category '{0}' not found")]
    CategoryNotFound(String),

    /// Remote metadata carries an unusable version
    #[error("invalid metadata on the catalog for '{0}'")]
    InvalidRemoteVersion(String),
}

/// Errors from running a script
#[derive(Debug, Error)]
pub enum RunError {
    /// Script file is absent
    #[error("script '{0}' not found")]
    ScriptNotFound(String),

    /// Script has no `main` function
    #[error("'{0}' has no main() function")]
    MissingEntryPoint(String),

    /// Interpreter inside the environment is missing after recreation
    #[error("unable to find the Python executable in the virtual environment for '{0}'")]
    InterpreterMissing(String),

    /// The interpreter process could not be started
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        /// Interpreter path
        program: PathBuf,
        /// Spawn error
        #[source]
        source: io::Error,
    },

    /// Environment preparation failed
    #[error("unable to prepare the virtual environment: {0}")]
    Env(#[from] EnvError),

    /// Metadata or script store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
