//! Per-script environment management
//!
//! A script with no dependencies never gets an environment. Everything else
//! gets `<venvs>/<name>/`, created on demand and brought in line with the
//! script's dependency list before each run.

use std::fs;
use std::path::PathBuf;

use crate::core::models::Dependency;
use crate::core::ports::PackageInstaller;
use crate::error::EnvError;
use crate::paths::{Layout, env_python};

/// What [`EnvManager::prepare`] did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// Environment directory, `None` when the script needs none
    pub env_dir: Option<PathBuf>,
    /// Whether the environment was (re)created
    pub created: bool,
    /// Packages that were missing and got installed
    pub installed: Vec<Dependency>,
    /// Pinned packages whose installed version differed
    pub updated: Vec<Dependency>,
}

/// Outcome of [`EnvManager::delete_dependencies`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Uninstalled {
    /// Packages removed from the environment
    pub removed: Vec<String>,
    /// Packages that were not installed
    pub missing: Vec<String>,
}

/// Manages the environments under `<venvs>/`
#[derive(Debug, Clone)]
pub struct EnvManager<I> {
    venvs_dir: PathBuf,
    installer: I,
}

impl<I: PackageInstaller> EnvManager<I> {
    /// Create a manager for a layout
    pub fn new(layout: &Layout, installer: I) -> Self {
        Self {
            venvs_dir: layout.venvs_dir(),
            installer,
        }
    }

    /// The installer backing this manager
    pub const fn installer(&self) -> &I {
        &self.installer
    }

    /// Environment directory of `name`
    #[must_use]
    pub fn env_dir(&self, name: &str) -> PathBuf {
        self.venvs_dir.join(name)
    }

    /// Whether `name` has an environment directory
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.env_dir(name).is_dir()
    }

    /// Interpreter of the environment of `name`, if present
    #[must_use]
    pub fn python(&self, name: &str) -> Option<PathBuf> {
        let python = env_python(&self.env_dir(name));
        python.exists().then_some(python)
    }

    /// Make sure the environment of `name` satisfies `deps`
    ///
    /// # Errors
    ///
    /// Fails when the environment cannot be created, stays damaged after one
    /// recreation, or a package fails to install.
    pub fn prepare(&self, name: &str, deps: &[Dependency]) -> Result<Prepared, EnvError> {
        if deps.is_empty() {
            log::debug!("'{name}' has no dependencies, no environment needed");
            return Ok(Prepared::default());
        }

        let env_dir = self.env_dir(name);
        let mut created = false;

        if !env_dir.exists() {
            log::debug!("creating environment {}", env_dir.display());
            self.installer.create_env(&env_dir)?;
            created = true;
        } else if !self.installer.is_healthy(&env_dir) {
            log::warn!("environment for '{name}' is damaged, recreating it");
            fs::remove_dir_all(&env_dir)?;
            self.installer.create_env(&env_dir)?;
            created = true;
        }

        if !self.installer.is_healthy(&env_dir) {
            return Err(EnvError::Damaged(name.to_string()));
        }

        let mut prepared = Prepared {
            env_dir: Some(env_dir.clone()),
            created,
            ..Prepared::default()
        };

        for dep in deps {
            match (self.installer.installed_version(&env_dir, &dep.name), &dep.version) {
                (None, _) => {
                    self.installer.install(&env_dir, &dep.requirement())?;
                    prepared.installed.push(dep.clone());
                },
                (Some(installed), Some(pinned)) if &installed != pinned => {
                    log::debug!("{}: installed {installed}, pinned {pinned}", dep.name);
                    self.installer.install(&env_dir, &dep.requirement())?;
                    prepared.updated.push(dep.clone());
                },
                _ => {},
            }
        }

        Ok(prepared)
    }

    /// Delete the environment of `name` (if any) and prepare it again
    ///
    /// # Errors
    ///
    /// Same as [`EnvManager::prepare`], plus removal failures.
    pub fn recreate(&self, name: &str, deps: &[Dependency]) -> Result<Prepared, EnvError> {
        if self.exists(name) {
            self.delete(name)?;
        }
        self.prepare(name, deps)
    }

    /// Remove the environment directory of `name`
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotFound`] when there is no environment.
    pub fn delete(&self, name: &str) -> Result<(), EnvError> {
        let env_dir = self.env_dir(name);
        if !env_dir.exists() {
            return Err(EnvError::NotFound(name.to_string()));
        }
        log::debug!("removing environment {}", env_dir.display());
        fs::remove_dir_all(env_dir)?;
        Ok(())
    }

    /// Uninstall `packages` from the environment of `name`
    ///
    /// Packages that are not installed are skipped and reported.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotFound`] when there is no environment, or the
    /// first uninstall failure.
    pub fn delete_dependencies(
        &self,
        name: &str,
        packages: &[String],
    ) -> Result<Uninstalled, EnvError> {
        let env_dir = self.env_dir(name);
        if !env_dir.exists() {
            return Err(EnvError::NotFound(name.to_string()));
        }

        let mut outcome = Uninstalled::default();
        for package in packages {
            if self.installer.installed_version(&env_dir, package).is_none() {
                log::warn!("{package} is not installed in the environment of '{name}'");
                outcome.missing.push(package.clone());
                continue;
            }
            self.installer.uninstall(&env_dir, package)?;
            outcome.removed.push(package.clone());
        }
        Ok(outcome)
    }

    /// Names of every environment directory, sorted
    ///
    /// # Errors
    ///
    /// Fails when the venvs directory cannot be read.
    pub fn names(&self) -> Result<Vec<String>, EnvError> {
        if !self.venvs_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.venvs_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
