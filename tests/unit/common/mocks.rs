//! Mock implementations of port traits for testing
//!
//! These mocks provide configurable behavior for unit testing
//! without spawning interpreters or opening connections.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use pyscript::core::models::Metadata;
use pyscript::core::ports::{Catalog, CategoryIndex, PackageInstaller};
use pyscript::error::{CatalogError, EnvError};
use pyscript::paths::env_python;

/// Fake installer keeping packages in memory
///
/// `create_env` creates the directory and an empty interpreter file so
/// path checks behave like a real environment.
#[derive(Default)]
pub struct MockInstaller {
    packages: RefCell<HashMap<PathBuf, BTreeMap<String, String>>>,
    healthy: RefCell<BTreeSet<PathBuf>>,
    pub calls: RefCell<Vec<String>>,
    failing: BTreeSet<String>,
    skip_interpreter: bool,
}

impl MockInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installing `package` fails
    pub fn failing_on(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    /// Created environments have no interpreter file
    pub fn without_interpreter(mut self) -> Self {
        self.skip_interpreter = true;
        self
    }

    /// Pretend `package==version` is installed in `env_dir`
    pub fn preinstall(&self, env_dir: &Path, package: &str, version: &str) {
        self.packages
            .borrow_mut()
            .entry(env_dir.to_path_buf())
            .or_default()
            .insert(package.to_string(), version.to_string());
    }

    /// Mark an existing environment as damaged
    pub fn break_env(&self, env_dir: &Path) {
        self.healthy.borrow_mut().remove(env_dir);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl PackageInstaller for MockInstaller {
    fn system_interpreter(&self) -> Result<PathBuf, EnvError> {
        Ok(PathBuf::from("system-python"))
    }

    fn create_env(&self, env_dir: &Path) -> Result<(), EnvError> {
        self.record("create".to_string());
        fs::create_dir_all(env_dir)?;
        if !self.skip_interpreter {
            let python = env_python(env_dir);
            fs::create_dir_all(python.parent().unwrap())?;
            fs::write(python, "")?;
        }
        self.packages.borrow_mut().insert(env_dir.to_path_buf(), BTreeMap::new());
        self.healthy.borrow_mut().insert(env_dir.to_path_buf());
        Ok(())
    }

    fn is_healthy(&self, env_dir: &Path) -> bool {
        self.healthy.borrow().contains(env_dir)
    }

    fn installed_version(&self, env_dir: &Path, package: &str) -> Option<String> {
        self.packages.borrow().get(env_dir)?.get(package).cloned()
    }

    fn install(&self, env_dir: &Path, requirement: &str) -> Result<(), EnvError> {
        self.record(format!("install {requirement}"));
        let (name, version) = requirement.split_once("==").unwrap_or((requirement, "1.0"));
        if self.failing.contains(name) {
            return Err(EnvError::InstallFailed {
                package: requirement.to_string(),
                stderr: "ERROR: No matching distribution found".to_string(),
            });
        }
        self.preinstall(env_dir, name, version);
        Ok(())
    }

    fn uninstall(&self, env_dir: &Path, package: &str) -> Result<(), EnvError> {
        self.record(format!("uninstall {package}"));
        if let Some(packages) = self.packages.borrow_mut().get_mut(env_dir) {
            packages.remove(package);
        }
        Ok(())
    }
}

/// Fake catalog serving in-memory files
#[derive(Default)]
pub struct MockCatalog {
    metadata: HashMap<String, String>,
    scripts: HashMap<String, String>,
    categories: CategoryIndex,
    pub requests: RefCell<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a script with raw metadata JSON
    pub fn with_script(mut self, name: &str, metadata_json: &str, source: &str) -> Self {
        self.metadata.insert(name.to_string(), metadata_json.to_string());
        self.scripts.insert(name.to_string(), source.to_string());
        self
    }

    /// Serve only the metadata of a script
    pub fn with_metadata_only(mut self, name: &str, metadata_json: &str) -> Self {
        self.metadata.insert(name.to_string(), metadata_json.to_string());
        self
    }

    pub fn with_category(mut self, category: &str, names: &[&str]) -> Self {
        self.categories
            .insert(category.to_string(), names.iter().map(ToString::to_string).collect());
        self
    }
}

impl Catalog for MockCatalog {
    fn fetch_metadata(&self, name: &str) -> Result<Metadata, CatalogError> {
        self.requests.borrow_mut().push(format!("metadata/{name}.json"));
        let json = self
            .metadata
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(format!("metadata for '{name}'")))?;
        serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            url: format!("mock://metadata/{name}.json"),
            message: e.to_string(),
        })
    }

    fn fetch_script(&self, name: &str) -> Result<String, CatalogError> {
        self.requests.borrow_mut().push(format!("scripts/{name}.py"));
        self.scripts
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("script '{name}'")))
    }

    fn fetch_categories(&self) -> Result<CategoryIndex, CatalogError> {
        self.requests.borrow_mut().push("categories.json".to_string());
        Ok(self.categories.clone())
    }
}
