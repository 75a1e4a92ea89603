//! Package installer port
//!
//! Defines the interface for creating environments and installing packages
//! into them.

use std::path::{Path, PathBuf};

use crate::error::EnvError;

/// Environment and package installer abstraction
///
/// Implementations wrap the interpreter's own isolation and install
/// tooling (`venv` and `pip` for the real adapter).
pub trait PackageInstaller {
    /// System interpreter for scripts without dependencies
    fn system_interpreter(&self) -> Result<PathBuf, EnvError>;

    /// Create a fresh environment at `env_dir`
    fn create_env(&self, env_dir: &Path) -> Result<(), EnvError>;

    /// Whether the environment has both its interpreter and its installer
    fn is_healthy(&self, env_dir: &Path) -> bool;

    /// Installed version of `package`, or `None` if it is not installed
    fn installed_version(&self, env_dir: &Path, package: &str) -> Option<String>;

    /// Install a requirement (`pkg` or `pkg==ver`)
    fn install(&self, env_dir: &Path, requirement: &str) -> Result<(), EnvError>;

    /// Uninstall a package
    fn uninstall(&self, env_dir: &Path, package: &str) -> Result<(), EnvError>;
}
