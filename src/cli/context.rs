//! Per-invocation state shared by the commands

use std::fmt;

use anyhow::Context as _;

use pyscript::adapters::{HttpCatalog, PipInstaller};
use pyscript::config::Config;
use pyscript::console;
use pyscript::core::services::{EnvManager, Hub, ScriptRunner};
use pyscript::output::OutputMode;
use pyscript::paths::Layout;
use pyscript::storage::{self, MetadataStore, ScriptStore};

/// Returned when the user declines a confirmation
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation cancelled.")
    }
}

impl std::error::Error for Cancelled {}

/// Layout, configuration and global flags
#[derive(Debug)]
pub struct Context {
    pub layout: Layout,
    pub config: Config,
    pub mode: OutputMode,
    pub assume_yes: bool,
}

impl Context {
    /// Resolve the layout, run first-time setup and load the config
    pub fn init(mode: OutputMode, assume_yes: bool) -> anyhow::Result<Self> {
        let layout = Layout::resolve();
        let report = storage::initialize(&layout)
            .with_context(|| format!("unable to initialize {}", layout.base().display()))?;
        if report.first_run && !report.installed.is_empty() {
            log::debug!("installed default scripts: {}", report.installed.join(", "));
        }
        let config = Config::load(&layout);
        log::debug!("home {}, catalog {}", layout.base().display(), config.catalog_url());

        Ok(Self {
            layout,
            config,
            mode,
            assume_yes,
        })
    }

    pub fn scripts(&self) -> ScriptStore {
        ScriptStore::new(&self.layout)
    }

    pub fn metadata(&self) -> MetadataStore {
        MetadataStore::new(&self.layout)
    }

    pub fn installer(&self) -> PipInstaller {
        PipInstaller::from_config(&self.config)
    }

    pub fn envs(&self) -> EnvManager<PipInstaller> {
        EnvManager::new(&self.layout, self.installer())
    }

    pub fn runner(&self) -> ScriptRunner<PipInstaller> {
        ScriptRunner::new(&self.layout, self.installer())
    }

    pub fn hub(&self) -> anyhow::Result<Hub<HttpCatalog>> {
        let catalog = HttpCatalog::from_config(&self.config)?;
        Ok(Hub::new(&self.layout, catalog))
    }

    /// Ask for confirmation, honoring `--yes`
    pub fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
        Ok(console::confirm(prompt, self.assume_yes)?)
    }

    /// Ask for confirmation and bail out with [`Cancelled`] on no
    pub fn require_confirmation(&self, prompt: &str) -> anyhow::Result<()> {
        if self.confirm(prompt)? {
            Ok(())
        } else {
            Err(Cancelled.into())
        }
    }
}
