//! grove — manifest-driven codebase manager.
//!
//! # Usage
//!
//! ```text
//! grove init [--remote <url>] [--import] <path>
//! grove clone <remote> [<path>]
//! grove add [--git-config k=v]... <remote> [<path>]
//! grove sync [--delete-removed]
//! grove pwd
//! grove ls [--json]
//! grove run <script> [args...]          (shortcut: grove <script> [args...])
//! grove bulk-git <args>...
//! grove script [--global] <name> [<command>...]
//! grove mv <src> <dst>
//! grove rm [--delete] <path>
//! grove hook <script>
//! ```

mod commands;
mod editor;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    git::BulkGitArgs,
    init::{CloneArgs, InitArgs},
    project::{AddArgs, LsArgs, MvArgs, RmArgs},
    script::{HookArgs, RunArgs, ScriptArgs},
    sync::SyncArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "grove",
    version,
    about = "Manage a manifest-driven codebase of git repositories",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty codebase.
    Init(InitArgs),

    /// Clone a codebase and install its projects.
    Clone(CloneArgs),

    /// Add a project (git repository) to the codebase.
    Add(AddArgs),

    /// Synchronize the codebase with the linked remote.
    Sync(SyncArgs),

    /// Print the working directory relative to the codebase root.
    Pwd,

    /// Display the codebase projects.
    Ls(LsArgs),

    /// Run a codebase script in the current project.
    Run(RunArgs),

    /// Execute a git command over all projects.
    BulkGit(BulkGitArgs),

    /// Define a script, globally or for the current project.
    Script(ScriptArgs),

    /// Move a project.
    Mv(MvArgs),

    /// Remove a project.
    Rm(RmArgs),

    /// Set the current project's pre-push hook.
    Hook(HookArgs),

    /// Shortcut: `grove <script> [args...]` runs a codebase script.
    #[command(external_subcommand)]
    External(Vec<String>),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Clone(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Pwd => commands::project::pwd(),
        Commands::Ls(args) => args.run(),
        Commands::Run(args) => args.run(),
        Commands::BulkGit(args) => args.run(),
        Commands::Script(args) => args.run(),
        Commands::Mv(args) => args.run(),
        Commands::Rm(args) => args.run(),
        Commands::Hook(args) => args.run(),
        Commands::External(args) => commands::script::run_external(args),
    }
}
