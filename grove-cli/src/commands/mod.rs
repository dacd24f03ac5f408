//! Subcommand implementations.

pub mod git;
pub mod init;
pub mod project;
pub mod script;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

use grove_core::JsonStore;
use grove_engine::Codebase;
use grove_git::GitCli;

/// Open the codebase containing the current working directory.
pub(crate) fn open_codebase() -> Result<Codebase> {
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    Codebase::open(Box::new(GitCli), Box::new(JsonStore), &cwd)
        .context("failed to open codebase — run `grove init` first")
}

/// Resolve a user-supplied path against the current directory.
pub(crate) fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    Ok(cwd.join(path))
}
