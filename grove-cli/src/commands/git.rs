//! `grove bulk-git` — one git command across every project.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::open_codebase;

/// Arguments for `grove bulk-git`.
#[derive(Args, Debug)]
pub struct BulkGitArgs {
    /// Arguments passed verbatim to `git` in every project.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

impl BulkGitArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        let outputs = codebase.bulk_git(&self.args).context("bulk git failed")?;

        for (path, output) in outputs {
            println!("{}", format!("/{path}").bold());
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Ok(())
    }
}
