//! `grove sync` — reconcile the codebase with its remote.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::open_codebase;

/// Arguments for `grove sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Delete removed projects from disk.
    #[arg(long)]
    pub delete_removed: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        let report = codebase
            .sync(self.delete_removed)
            .context("sync failed")?;

        for entry in &report.added {
            println!("{} {} -> {}", "[+]".green(), entry.project.remote, entry.path);
        }
        for entry in &report.removed {
            println!("{} {} -> {}", "[-]".red(), entry.project.remote, entry.path);
        }
        for failure in &report.soft {
            eprintln!("{} {failure}", "warning:".yellow());
        }

        println!("Successfully synchronized codebase");
        Ok(())
    }
}
