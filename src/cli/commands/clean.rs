//! Remove orphans and caches

use pyscript::console;
use pyscript::output::{CleanResult, OutputMode};
use pyscript::storage;

use crate::cli::context::Context;

/// Remove orphan metadata, orphan environments and `__pycache__` directories
pub fn clean(ctx: &Context) -> anyhow::Result<()> {
    if ctx.mode == OutputMode::Human {
        console::step("Cleaning environment...");
    }
    let result = CleanResult::from(storage::sweep(&ctx.layout)?);
    result.render(ctx.mode);
    Ok(())
}
