//! Script execution
//!
//! A script is run by a tiny bootstrap program handed to the interpreter
//! with `-c`. It loads the script file as a module under the script's name
//! and calls `main(*args)`, so scripts need no `if __name__ == "__main__"`
//! block.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::core::models::Metadata;
use crate::core::ports::PackageInstaller;
use crate::core::services::environment::{EnvManager, Prepared};
use crate::error::{RunError, StoreError};
use crate::parser;
use crate::paths::{Layout, env_bin_dir};
use crate::storage::{MetadataStore, ScriptStore};

/// Loads the script at `argv[1]` as module `argv[2]` and calls its `main`
///
/// An integer returned by `main` becomes the exit status.
const BOOTSTRAP: &str = r"import importlib.util, os, sys
sys.dont_write_bytecode = True
path, name = sys.argv[1], sys.argv[2]
sys.argv = [path] + sys.argv[3:]
sys.path.insert(0, os.path.dirname(os.path.abspath(path)))
spec = importlib.util.spec_from_file_location(name, path)
module = importlib.util.module_from_spec(spec)
sys.modules[name] = module
spec.loader.exec_module(module)
result = module.main(*sys.argv[1:])
if not isinstance(result, int) or isinstance(result, bool):
    result = 0
sys.exit(result if 0 <= result <= 255 else 1)
";

/// A script ready to be executed
#[derive(Debug, Clone)]
pub struct Launch {
    /// Script name
    pub name: String,
    /// Script file
    pub script: PathBuf,
    /// Interpreter to use
    pub python: PathBuf,
    /// Environment to activate, if any
    pub env_dir: Option<PathBuf>,
    /// What environment preparation did
    pub prepared: Prepared,
}

/// Runs stored scripts inside their environments
#[derive(Debug)]
pub struct ScriptRunner<I> {
    scripts: ScriptStore,
    metadata: MetadataStore,
    envs: EnvManager<I>,
}

impl<I: PackageInstaller> ScriptRunner<I> {
    /// Create a runner over a layout
    pub fn new(layout: &Layout, installer: I) -> Self {
        Self {
            scripts: ScriptStore::new(layout),
            metadata: MetadataStore::new(layout),
            envs: EnvManager::new(layout, installer),
        }
    }

    /// Metadata of a runnable script
    ///
    /// Missing metadata is extracted from the source and saved.
    ///
    /// # Errors
    ///
    /// Fails when the script is absent or declares no `main`.
    pub fn load(&self, name: &str) -> Result<Metadata, RunError> {
        if !self.scripts.exists(name) {
            return Err(RunError::ScriptNotFound(name.to_string()));
        }
        let source = self.scripts.read(name)?;

        let metadata = match self.metadata.get(name) {
            Ok(metadata) => metadata,
            Err(StoreError::MetadataNotFound(_)) => {
                log::debug!("no metadata for '{name}', extracting it from the source");
                let metadata = parser::metadata_from_source(name, &source);
                self.metadata.save(name, &metadata, true)?;
                metadata
            },
            Err(e) => return Err(e.into()),
        };

        if !parser::has_entry_point(&source) {
            return Err(RunError::MissingEntryPoint(name.to_string()));
        }
        Ok(metadata)
    }

    /// Prepare the environment and pick the interpreter
    ///
    /// An environment whose interpreter is missing is recreated once.
    ///
    /// # Errors
    ///
    /// Fails when preparation fails or the interpreter stays missing.
    pub fn prepare(&self, name: &str, metadata: &Metadata) -> Result<Launch, RunError> {
        let mut prepared = self.envs.prepare(name, &metadata.dependencies)?;

        let python = if prepared.env_dir.is_none() {
            self.envs.installer().system_interpreter()?
        } else if let Some(python) = self.envs.python(name) {
            python
        } else {
            log::warn!("Python executable not found in the environment of '{name}'");
            prepared = self.envs.recreate(name, &metadata.dependencies)?;
            prepared
                .env_dir
                .as_ref()
                .and_then(|_| self.envs.python(name))
                .ok_or_else(|| RunError::InterpreterMissing(name.to_string()))?
        };

        Ok(Launch {
            name: name.to_string(),
            script: self.scripts.path(name),
            python,
            env_dir: prepared.env_dir.clone(),
            prepared,
        })
    }
}

/// Spawn the interpreter for `launch` and wait for it
///
/// Stdio is inherited and the working directory is the caller's.
///
/// # Errors
///
/// Returns [`RunError::Spawn`] when the interpreter cannot be started.
pub fn execute(launch: &Launch, args: &[String]) -> Result<i32, RunError> {
    let mut command = build_command(launch, args);
    log::debug!("running {} with {}", launch.script.display(), launch.python.display());

    let status = command.status().map_err(|source| RunError::Spawn {
        program: launch.python.clone(),
        source,
    })?;
    Ok(exit_code(status))
}

fn build_command(launch: &Launch, args: &[String]) -> Command {
    let mut command = Command::new(&launch.python);
    command
        .arg("-B")
        .arg("-c")
        .arg(BOOTSTRAP)
        .arg(&launch.script)
        .arg(&launch.name)
        .args(args)
        .env_remove("PYTHONHOME");

    if let Some(env_dir) = &launch.env_dir {
        command.env("VIRTUAL_ENV", env_dir);
        command.env("PATH", prefixed_path(&env_bin_dir(env_dir)));
    }
    command
}

fn prefixed_path(bin_dir: &Path) -> std::ffi::OsString {
    let mut paths = vec![bin_dir.to_path_buf()];
    if let Some(current) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&current));
    }
    std::env::join_paths(paths).unwrap_or_else(|_| bin_dir.as_os_str().to_os_string())
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
