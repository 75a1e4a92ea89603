//! List local or catalog scripts

use pyscript::console;
use pyscript::core::models::CUSTOM_CATEGORY;
use pyscript::output::{OutputMode, RemoteListResult, ScriptEntry, ScriptListResult};
use pyscript::parser;
use pyscript::storage::ScriptStore;

use crate::cli::context::Context;

/// List installed scripts, or the catalog with `remote`
pub fn list(ctx: &Context, remote: bool) -> anyhow::Result<()> {
    if remote {
        return list_remote(ctx);
    }

    let scripts = ctx.scripts();
    let store = ctx.metadata();
    let mut entries = Vec::new();

    for name in scripts.names()? {
        let entry = match store.get(&name) {
            Ok(metadata) => {
                let description = if metadata.description.trim().is_empty() {
                    docstring(&scripts, &name)
                } else {
                    metadata.description.clone()
                };
                ScriptEntry {
                    description,
                    category: metadata.category_or_custom().to_string(),
                    name,
                }
            },
            Err(e) => {
                log::debug!("no usable metadata for '{name}': {e}");
                ScriptEntry {
                    description: docstring(&scripts, &name),
                    category: CUSTOM_CATEGORY.to_string(),
                    name,
                }
            },
        };
        entries.push(entry);
    }

    if entries.is_empty() && ctx.mode == OutputMode::Human {
        console::warning(
            "no script available",
            Some("Add a new script or download one from the hub."),
        );
        return Ok(());
    }

    ScriptListResult { scripts: entries }.render(ctx.mode);
    Ok(())
}

/// Description taken from the script source itself
fn docstring(scripts: &ScriptStore, name: &str) -> String {
    scripts
        .read(name)
        .map(|source| parser::extract_description(&source))
        .unwrap_or_default()
}

fn list_remote(ctx: &Context) -> anyhow::Result<()> {
    let hub = ctx.hub()?;
    let categories = hub.remote_index()?;
    RemoteListResult {
        catalog: ctx.config.catalog_url().to_string(),
        categories,
    }
    .render(ctx.mode);
    Ok(())
}
