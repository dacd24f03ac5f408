//! `grove init` and `grove clone`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use grove_core::JsonStore;
use grove_engine::Codebase;
use grove_git::GitCli;

use super::absolute;

/// Arguments for `grove init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the codebase in.
    pub path: PathBuf,

    /// Remote of the codebase meta repository.
    #[arg(long)]
    pub remote: Option<String>,

    /// Import existing git repositories located in the codebase.
    #[arg(long)]
    pub import: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = absolute(self.path)?;
        let (_, imported) = Codebase::init(
            Box::new(GitCli),
            Box::new(JsonStore),
            &path,
            self.remote.as_deref(),
            self.import,
        )
        .context("failed to initialize codebase")?;

        println!(
            "Successfully initialized new codebase at: {}",
            path.display()
        );
        for entry in &imported {
            println!("Imported {} -> /{}", entry.project.remote, entry.path);
        }
        Ok(())
    }
}

/// Arguments for `grove clone`.
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Remote of the codebase meta repository.
    pub remote: String,

    /// Target directory (defaults to the current directory).
    pub path: Option<PathBuf>,
}

impl CloneArgs {
    pub fn run(self) -> Result<()> {
        let path = absolute(self.path.unwrap_or_else(|| PathBuf::from(".")))?;
        let (_, installed) = Codebase::clone(
            Box::new(GitCli),
            Box::new(JsonStore),
            &self.remote,
            &path,
        )
        .with_context(|| format!("failed to clone codebase from {}", self.remote))?;

        for entry in &installed {
            println!("Cloned {} -> /{}", entry.project.remote, entry.path);
        }
        println!(
            "Successfully cloned codebase from {} to: {}",
            self.remote,
            path.display()
        );
        Ok(())
    }
}
