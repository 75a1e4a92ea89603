//! Execute a stored script

use pyscript::console;
use pyscript::core::services::execute;
use pyscript::error::{EnvError, RunError};

use crate::cli::context::Context;

/// Run `script` with `args`, returning its exit code
pub fn run(ctx: &Context, script: &str, args: &[String]) -> anyhow::Result<i32> {
    let runner = ctx.runner();

    let metadata = match runner.load(script) {
        Ok(metadata) => metadata,
        Err(RunError::ScriptNotFound(name)) => {
            console::error(format!("script '{name}' not found"), Some("Use list to see all available scripts."));
            return Ok(1);
        },
        Err(RunError::MissingEntryPoint(name)) => {
            console::error(
                format!("'{name}' has no main() function"),
                Some("Provide a main() entry point inside the script."),
            );
            return Ok(1);
        },
        Err(e) => return Err(e.into()),
    };

    if !metadata.dependencies.is_empty() && !ctx.envs().exists(script) {
        console::step(format!("Creating the virtual environment for {script}..."));
    }

    let launch = match runner.prepare(script, &metadata) {
        Ok(launch) => launch,
        Err(RunError::Env(EnvError::InterpreterNotFound(tried))) => {
            console::error(
                format!("no Python interpreter found (tried {tried})"),
                Some("Install Python 3 or set PYSCRIPT_PYTHON."),
            );
            return Ok(1);
        },
        Err(RunError::Env(e)) => {
            console::error(
                format!("unable to prepare the virtual environment for {script}"),
                Some(&e.to_string()),
            );
            return Ok(1);
        },
        Err(e) => return Err(e.into()),
    };

    let prepared = &launch.prepared;
    if !prepared.installed.is_empty() || !prepared.updated.is_empty() {
        log::debug!(
            "installed {} and updated {} package(s) for '{script}'",
            prepared.installed.len(),
            prepared.updated.len()
        );
    }

    Ok(execute(&launch, args)?)
}
