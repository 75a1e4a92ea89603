//! `venv` + `pip` package installer
//!
//! Implements the `PackageInstaller` port by shelling out to the system
//! interpreter (`python -m venv`) and to the environment's own `pip`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::Config;
use crate::core::ports::PackageInstaller;
use crate::error::EnvError;
use crate::paths::{env_pip, env_python};

/// Interpreters probed when none is configured
const INTERPRETER_CANDIDATES: [&str; 2] = ["python3", "python"];

/// Prints the installed version of the package named by `argv[1]`
const VERSION_PROBE: &str = "import importlib.metadata, sys\n\
try:\n    print(importlib.metadata.version(sys.argv[1]))\n\
except importlib.metadata.PackageNotFoundError:\n    sys.exit(1)\n";

/// Installer backed by the interpreter's `venv` module and `pip`
#[derive(Debug, Clone, Default)]
pub struct PipInstaller {
    /// Configured system interpreter; auto-detected when `None`
    interpreter: Option<String>,
}

impl PipInstaller {
    /// Create an installer using `interpreter`, or auto-detection
    #[must_use]
    pub const fn new(interpreter: Option<String>) -> Self {
        Self { interpreter }
    }

    /// Create an installer from the user configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.python.interpreter.clone())
    }

    /// The system interpreter used to create environments
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InterpreterNotFound`] when neither the configured
    /// interpreter nor `python3`/`python` answers `--version`.
    pub fn system_python(&self) -> Result<PathBuf, EnvError> {
        system_python(self.interpreter.as_deref())
    }
}

/// Find a working system interpreter
///
/// # Errors
///
/// Returns [`EnvError::InterpreterNotFound`] when no candidate runs.
pub fn system_python(configured: Option<&str>) -> Result<PathBuf, EnvError> {
    let candidates: Vec<&str> = match configured {
        Some(python) => vec![python],
        None => INTERPRETER_CANDIDATES.to_vec(),
    };

    for name in &candidates {
        let works = Command::new(name)
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success());
        if works {
            log::debug!("using system interpreter {name}");
            return Ok(PathBuf::from(name));
        }
    }
    Err(EnvError::InterpreterNotFound(candidates.join(", ")))
}

fn stderr_of(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    }
}

impl PackageInstaller for PipInstaller {
    fn system_interpreter(&self) -> Result<PathBuf, EnvError> {
        self.system_python()
    }

    fn create_env(&self, env_dir: &Path) -> Result<(), EnvError> {
        let python = self.system_python()?;
        if let Some(parent) = env_dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        log::debug!("{} -m venv {}", python.display(), env_dir.display());
        let output = Command::new(&python)
            .arg("-m")
            .arg("venv")
            .arg(env_dir)
            .output()
            .map_err(|e| EnvError::CreateFailed {
                path: env_dir.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnvError::CreateFailed {
                path: env_dir.to_path_buf(),
                reason: stderr_of(&output),
            });
        }
        Ok(())
    }

    fn is_healthy(&self, env_dir: &Path) -> bool {
        env_python(env_dir).exists() && env_pip(env_dir).exists()
    }

    fn installed_version(&self, env_dir: &Path, package: &str) -> Option<String> {
        let output = Command::new(env_python(env_dir))
            .arg("-c")
            .arg(VERSION_PROBE)
            .arg(package)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!version.is_empty()).then_some(version)
    }

    fn install(&self, env_dir: &Path, requirement: &str) -> Result<(), EnvError> {
        let pip = env_pip(env_dir);
        log::debug!("{} install {requirement}", pip.display());

        let output = Command::new(&pip)
            .arg("install")
            .arg(requirement)
            .output()
            .map_err(|e| EnvError::InstallFailed {
                package: requirement.to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnvError::InstallFailed {
                package: requirement.to_string(),
                stderr: stderr_of(&output),
            });
        }
        Ok(())
    }

    fn uninstall(&self, env_dir: &Path, package: &str) -> Result<(), EnvError> {
        let pip = env_pip(env_dir);
        log::debug!("{} uninstall -y {package}", pip.display());

        let output = Command::new(&pip)
            .arg("uninstall")
            .arg("-y")
            .arg(package)
            .output()
            .map_err(|e| EnvError::UninstallFailed {
                package: package.to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnvError::UninstallFailed {
                package: package.to_string(),
                stderr: stderr_of(&output),
            });
        }
        Ok(())
    }
}
