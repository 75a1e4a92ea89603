//! CLI definitions and entry point

use clap::{Parser, Subcommand};

use super::commands;
use super::context::Context;
use pyscript::output::OutputMode;

/// pyscript - Centralize your Python utility scripts
#[derive(Parser, Debug)]
#[command(
    name = "pyscript",
    version,
    about = "Centralize your Python utility scripts",
    long_about = "Store, run and share personal Python scripts.\n\n\
                  Each script gets its own virtual environment built from its imports.\n\
                  Standard scripts can be downloaded and updated from the hub."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a script, forwarding any extra arguments
    Run {
        /// Script name
        script: String,

        /// Arguments passed to the script's main()
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Add a script from a .py file
    Add {
        /// Path of the script file
        path: String,

        /// Metadata file to use instead of extracting it
        #[arg(short, long, value_name = "FILE")]
        metadata: Option<String>,

        /// Script description
        #[arg(short, long)]
        description: Option<String>,

        /// Dependencies, e.g. "requests=2.31 rich"
        #[arg(short = 'p', long, num_args = 1.., value_name = "PKG")]
        dependencies: Option<Vec<String>>,
    },

    /// List installed scripts
    List {
        /// List the scripts available on the hub instead
        #[arg(long)]
        remote: bool,
    },

    /// Remove a script, its metadata, environment or dependencies
    Remove {
        /// Script name
        script: String,

        /// Remove only the metadata file
        #[arg(short, long)]
        metadata: bool,

        /// Remove only the virtual environment
        #[arg(short, long, conflicts_with = "dependencies")]
        venv: bool,

        /// Uninstall packages from the script's environment
        #[arg(short = 'p', long, num_args = 1.., value_name = "PKG")]
        dependencies: Option<Vec<String>>,
    },

    /// Update a script from a file or from the hub
    Update {
        /// Script name
        script: Option<String>,

        /// New script file
        #[arg(short, long, value_name = "FILE")]
        path: Option<String>,

        /// New metadata file
        #[arg(short, long, value_name = "FILE")]
        metadata: Option<String>,

        /// Update every standard script
        #[arg(short, long)]
        all: bool,
    },

    /// Download scripts from the hub
    Download {
        /// Script names
        scripts: Vec<String>,

        /// Download every script of a category
        #[arg(short, long, value_name = "NAME")]
        category: Option<String>,
    },

    /// Remove orphan metadata, orphan environments and caches
    Clean,
}

/// Run the CLI, returning the process exit code
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let ctx = Context::init(output_mode, cli.yes)?;

    match cli.command {
        Command::Run { script, args } => commands::run(&ctx, &script, &args),
        Command::Add {
            path,
            metadata,
            description,
            dependencies,
        } => commands::add(&ctx, &path, metadata.as_deref(), description.as_deref(), dependencies)
            .map(|()| 0),
        Command::List { remote } => commands::list(&ctx, remote).map(|()| 0),
        Command::Remove {
            script,
            metadata,
            venv,
            dependencies,
        } => commands::remove(&ctx, &script, metadata, venv, dependencies).map(|()| 0),
        Command::Update {
            script,
            path,
            metadata,
            all,
        } => commands::update(&ctx, script.as_deref(), path.as_deref(), metadata.as_deref(), all)
            .map(|()| 0),
        Command::Download { scripts, category } => {
            commands::download(&ctx, &scripts, category.as_deref()).map(|()| 0)
        },
        Command::Clean => commands::clean(&ctx).map(|()| 0),
    }
}
