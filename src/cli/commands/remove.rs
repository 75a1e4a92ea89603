//! Remove a script or parts of it

use anyhow::bail;

use pyscript::console;
use pyscript::error::{EnvError, StoreError};

use crate::cli::context::Context;

/// What `remove` will delete
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Plan {
    script: bool,
    metadata: bool,
    venv: bool,
    dependencies: bool,
}

impl Plan {
    fn from_flags(metadata: bool, venv: bool, dependencies: bool) -> Self {
        if !metadata && !venv && !dependencies {
            return Self {
                script: true,
                metadata: true,
                venv: true,
                dependencies: false,
            };
        }
        Self {
            script: false,
            metadata,
            venv,
            dependencies,
        }
    }

    fn confirmation(self, name: &str) -> Option<String> {
        if self.script {
            Some(format!("Do you want to remove the script {name}?"))
        } else if self.metadata {
            Some(format!("Do you want to remove the metadata for the script {name}?"))
        } else {
            None
        }
    }
}

/// Remove `script`, or only the parts selected by the flags
pub fn remove(
    ctx: &Context,
    script: &str,
    metadata: bool,
    venv: bool,
    dependencies: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let packages: Vec<String> = dependencies
        .unwrap_or_default()
        .iter()
        .flat_map(|spec| spec.split_whitespace())
        .map(str::to_string)
        .collect();

    if venv && !packages.is_empty() {
        bail!("invalid arguments. --dependencies is redundant with --venv");
    }

    let scripts = ctx.scripts();
    if !scripts.exists(script) {
        bail!("script '{script}' not found");
    }

    let plan = Plan::from_flags(metadata, venv, !packages.is_empty());
    if let Some(prompt) = plan.confirmation(script) {
        ctx.require_confirmation(&prompt)?;
    }

    if plan.metadata {
        console::step(format!("Deleting metadata file for {script}..."));
        match ctx.metadata().delete(script) {
            Ok(()) => console::success(format!("Metadata for {script} deleted.")),
            Err(StoreError::MetadataNotFound(_)) => {
                console::warning(format!("no metadata file for {script} found"), None);
            },
            Err(e) => return Err(e.into()),
        }
    }

    let envs = ctx.envs();
    if plan.venv {
        match envs.delete(script) {
            Ok(()) => console::success(format!("Virtual environment for {script} deleted.")),
            Err(EnvError::NotFound(_)) => {
                console::warning(format!("no virtual environment for {script} found"), None);
            },
            Err(e) => return Err(e.into()),
        }
    }

    if plan.dependencies {
        console::step(format!(
            "Uninstalling dependencies {} for {script}...",
            packages.join(", ")
        ));
        let outcome = envs.delete_dependencies(script, &packages)?;
        for package in &outcome.missing {
            console::warning(format!("{package} is not installed"), Some("Skipped."));
        }
        console::success(format!("Dependencies for {script} uninstalled."));
    }

    if plan.script {
        console::step(format!("Deleting script file {script}..."));
        scripts.delete(script)?;
        console::success(format!("Script '{script}' deleted."));
    }

    Ok(())
}
