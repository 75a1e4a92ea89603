//! Update scripts from files or from the hub

use std::fs;
use std::path::Path;

use anyhow::{Context as _, bail};
use serde_json::Map;

use pyscript::console;
use pyscript::core::models::Metadata;
use pyscript::core::ports::Catalog;
use pyscript::core::services::{Hub, UpdateCheck, is_not_found};
use pyscript::error::{HubError, StoreError};
use pyscript::parser;
use pyscript::storage::MetadataStore;

use crate::cli::context::Context;

/// Update `script` from `path`/`metadata`, from the hub, or every standard
/// script with `all`
pub fn update(
    ctx: &Context,
    script: Option<&str>,
    path: Option<&str>,
    metadata: Option<&str>,
    all: bool,
) -> anyhow::Result<()> {
    if script.is_none() && path.is_none() && metadata.is_none() && !all {
        bail!("empty command. A script name or the --all option is required");
    }
    if all && (script.is_some() || path.is_some() || metadata.is_some()) {
        bail!("invalid arguments. --all must be used alone (e.g. pyscript update --all)");
    }

    if all {
        return update_all(ctx);
    }

    let Some(name) = script else {
        bail!("a script name is required with --path or --metadata");
    };
    if !ctx.scripts().exists(name) {
        bail!("script '{name}' not found");
    }

    if path.is_none() && metadata.is_none() {
        return update_standard(ctx, name);
    }
    if let Some(file) = metadata {
        update_metadata(ctx, name, file)?;
    }
    if let Some(file) = path {
        update_source(ctx, name, file, metadata.is_none())?;
    }
    Ok(())
}

fn update_all(ctx: &Context) -> anyhow::Result<()> {
    console::step("Upgrading all scripts...");
    let hub = ctx.hub()?;
    let mut failed = 0usize;

    for standard in hub.standard_scripts()? {
        let name = standard.name.as_str();
        let remote = match hub.check_update(name, standard.version.as_ref()) {
            Ok(UpdateCheck::UpToDate) => {
                console::success(format!("{name} is up-to-date."));
                continue;
            },
            Ok(UpdateCheck::Outdated(remote)) => remote,
            Err(e) if is_not_found(&e) => {
                console::warning(
                    format!("failed to load metadata for script '{name}'"),
                    Some("Metadata not present on the hub (skipped)."),
                );
                continue;
            },
            Err(HubError::InvalidRemoteVersion(_)) => {
                console::warning(format!("invalid metadata on the hub for {name}"), Some("Skipped."));
                continue;
            },
            Err(e) => {
                console::error(format!("unable to check {name}"), Some(&e.to_string()));
                failed += 1;
                continue;
            },
        };

        match hub.install_latest(name, *remote) {
            Ok(()) => console::success(format!("{name} is now up-to-date.")),
            Err(e) if is_not_found(&e) => console::warning(
                format!("script '{name}' not found on the hub"),
                Some("Skipped."),
            ),
            Err(e) => {
                console::error(format!("unable to update {name}"), Some(&e.to_string()));
                failed += 1;
            },
        }
    }

    if failed > 0 {
        bail!("{failed} script(s) could not be updated");
    }
    console::success("All scripts are up-to-date.");
    Ok(())
}

fn update_standard(ctx: &Context, name: &str) -> anyhow::Result<()> {
    console::step(format!("Updating {name}..."));
    let hub = ctx.hub()?;

    let local = ctx.metadata().get(name).ok();
    let is_standard = local.as_ref().is_some_and(Metadata::is_standard);

    let remote = if is_standard {
        let version = local.as_ref().and_then(|m| m.version.as_ref());
        if version.is_none() {
            console::warning(
                format!("no version specified for {name} in the metadata"),
                Some("Downloading the latest version..."),
            );
        }
        match hub.check_update(name, version) {
            Ok(UpdateCheck::UpToDate) => {
                console::success(format!("{name} is up-to-date."));
                return Ok(());
            },
            Ok(UpdateCheck::Outdated(remote)) => *remote,
            Err(e) => return Err(not_found_on_hub(name, e)),
        }
    } else {
        console::warning(format!("local {name} is not a standard script"), None);
        let remote = hub.remote_metadata(name).map_err(|e| not_found_on_hub(name, e))?;
        ctx.require_confirmation("Do you want to replace it with the latest version from the hub?")?;
        remote
    };

    install(&hub, name, remote)?;
    console::success(format!("{name} is now up-to-date."));
    Ok(())
}

fn install<C: Catalog>(
    hub: &Hub<C>,
    name: &str,
    remote: Metadata,
) -> anyhow::Result<()> {
    hub.install_latest(name, remote).map_err(|e| not_found_on_hub(name, e))
}

fn not_found_on_hub(name: &str, err: HubError) -> anyhow::Error {
    if is_not_found(&err) {
        anyhow::anyhow!("script '{name}' not found on the hub")
    } else {
        err.into()
    }
}

fn update_metadata(ctx: &Context, name: &str, file: &str) -> anyhow::Result<()> {
    console::step(format!("Updating {name} metadata..."));
    let store = ctx.metadata();
    if !store.exists(name) {
        console::warning(format!("no old metadata present for '{name}'"), None);
    }

    let mut metadata = MetadataStore::get_from_path(Path::new(file)).map_err(|e| match e {
        StoreError::FileNotFound(_) => {
            anyhow::anyhow!("metadata file not found. Be sure to provide a valid file path")
        },
        other => other.into(),
    })?;
    metadata.complete(name);
    store.save(name, &metadata, true)?;

    console::success(format!("{name} metadata updated."));
    Ok(())
}

fn update_source(ctx: &Context, name: &str, file: &str, refresh_metadata: bool) -> anyhow::Result<()> {
    console::step(format!("Updating {name}..."));
    let source = fs::read_to_string(file).with_context(|| format!("unable to read '{file}'"))?;
    ctx.scripts().save(name, &source)?;

    if refresh_metadata {
        console::step(format!("Updating metadata for {name} to match the latest version..."));
        let dependencies = parser::extract_dependencies(&source);
        let store = ctx.metadata();
        if store.exists(name) {
            let mut fields = Map::new();
            fields.insert("dependencies".into(), serde_json::to_value(dependencies)?);
            store.update(name, fields)?;
        } else {
            store.save(name, &parser::metadata_from_source(name, &source), true)?;
        }
    }

    console::success(format!("{name} updated."));
    Ok(())
}
