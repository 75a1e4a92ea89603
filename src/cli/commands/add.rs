//! Add a script from a file

use std::fs;
use std::path::Path;

use anyhow::{Context as _, bail};

use pyscript::console;
use pyscript::core::models::{Dependency, Metadata};
use pyscript::error::StoreError;
use pyscript::output::OperationResult;
use pyscript::parser;
use pyscript::paths::SCRIPT_EXT;
use pyscript::storage::{MetadataStore, normalize_name};

use crate::cli::context::Context;

/// Add the script at `path`
pub fn add(
    ctx: &Context,
    path: &str,
    metadata_path: Option<&str>,
    description: Option<&str>,
    dependencies: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let script_path = Path::new(path);
    if !script_path.exists() {
        bail!("'{path}' does not exist. Please provide a valid script path");
    }
    if script_path.extension().is_none_or(|ext| ext != SCRIPT_EXT) {
        bail!("'{path}' is not a Python file. Be sure the path provided is of a Python file");
    }

    let stem = script_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = normalize_name(&stem)?;

    let scripts = ctx.scripts();
    if scripts.exists(&name) {
        bail!(
            "script '{name}' already exists. It was already added or it has the same name of a \
             script already present"
        );
    }

    let source = fs::read_to_string(script_path)
        .with_context(|| format!("unable to read {}", script_path.display()))?;

    let metadata = match metadata_path {
        Some(file) => {
            let mut metadata = MetadataStore::get_from_path(Path::new(file)).map_err(|e| match e {
                StoreError::FileNotFound(_) => {
                    anyhow::anyhow!("metadata file not found. Be sure to provide a valid file path")
                },
                other => other.into(),
            })?;
            metadata.complete(&name);
            metadata
        },
        None => generate(&name, &source, description, dependencies.as_deref()),
    };

    let store = ctx.metadata();
    match store.save(&name, &metadata, false) {
        Err(StoreError::MetadataExists(_)) => bail!(
            "metadata file for {name} already exists. If it should not exist, use the clean \
             command and try again"
        ),
        other => other?,
    }
    scripts.save(&name, &source)?;

    let file_name = script_path.file_name().map_or_else(|| path.into(), |f| f.to_string_lossy());
    OperationResult {
        success: true,
        message: format!("Script {file_name} added successfully."),
    }
    .render(ctx.mode);
    Ok(())
}

fn generate(
    name: &str,
    source: &str,
    description: Option<&str>,
    dependencies: Option<&[String]>,
) -> Metadata {
    let description = match description {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => {
            let extracted = parser::extract_description(source);
            if extracted.is_empty() {
                console::warning(
                    "no description passed and found in the script",
                    Some(
                        "Provide it as a docstring for the main function or with --description \
                         to show it in the list command.",
                    ),
                );
            }
            extracted
        },
    };

    let dependencies = match dependencies {
        Some(specs) => Dependency::parse_list(specs),
        None => parser::extract_dependencies(source),
    };

    MetadataStore::generate(name, &description, dependencies)
}
