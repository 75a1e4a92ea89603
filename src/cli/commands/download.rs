//! Download scripts from the hub

use anyhow::bail;

use pyscript::console;
use pyscript::core::ports::Catalog;
use pyscript::core::services::{DownloadOutcome, Hub, is_not_found};
use pyscript::error::HubError;

use crate::cli::context::Context;

/// Download `scripts`, or every script of `category`
pub fn download(ctx: &Context, scripts: &[String], category: Option<&str>) -> anyhow::Result<()> {
    if scripts.is_empty() && category.is_none() {
        bail!("no argument provided. Specify at least a script or a category");
    }
    if !scripts.is_empty() && category.is_some() {
        bail!("invalid arguments. To specify a category use the --category option only");
    }

    let hub = ctx.hub()?;

    let names = match category {
        Some(category) => {
            console::step("Checking category from the hub...");
            let names = match hub.category_scripts(category) {
                Ok(names) => names,
                Err(HubError::CategoryNotFound(_)) => {
                    bail!("category {category} not found. Please specify a valid category")
                },
                Err(e) if is_not_found(&e) => {
                    bail!("unable to load categories from the hub. Please try again")
                },
                Err(e) => return Err(e.into()),
            };
            println!("The following scripts were found in {category}:");
            for name in &names {
                console::item(name);
            }
            ctx.require_confirmation("Do you want to download them?")?;
            names
        },
        None => scripts.to_vec(),
    };

    let failed = download_all(&hub, &names);
    if failed > 0 {
        bail!("{failed} of {} download(s) failed", names.len());
    }
    Ok(())
}

/// Download each script independently, returning the number of failures
fn download_all<C: Catalog>(hub: &Hub<C>, names: &[String]) -> usize {
    let mut failed = 0;
    for name in names {
        console::step(format!("Downloading {name}..."));
        match hub.download(name) {
            Ok(DownloadOutcome::Installed { replaced_metadata }) => {
                if replaced_metadata {
                    console::warning(
                        format!("metadata for {name} already existed"),
                        Some("The old metadata file was replaced."),
                    );
                }
                console::success(format!("{name} installed successfully."));
            },
            Ok(DownloadOutcome::AlreadyInstalled) => {
                console::warning(format!("{name} already installed"), None);
            },
            Ok(DownloadOutcome::CustomConflict) => {
                console::warning(
                    format!("{name} already exists as a custom script"),
                    Some("Delete it if you want to download the standard one."),
                );
            },
            Err(e) if is_not_found(&e) => {
                console::error(
                    format!("{name} not found on the hub"),
                    Some("Use list --remote to see all available scripts."),
                );
                failed += 1;
            },
            Err(e) => {
                console::error(format!("unable to download {name}"), Some(&e.to_string()));
                failed += 1;
            },
        }
    }
    failed
}
