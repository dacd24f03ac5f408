//! Project registry commands: `grove add`, `grove mv`, `grove rm`,
//! `grove ls`, `grove pwd`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::open_codebase;

/// Arguments for `grove add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Remote of the project repository.
    pub remote: String,

    /// Path inside the codebase (defaults to a name derived from the remote).
    pub path: Option<String>,

    /// Git configuration to apply (format key=value, repeatable).
    #[arg(long = "git-config", value_name = "KEY=VALUE")]
    pub git_config: Vec<String>,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        let path = self.path.unwrap_or_default();
        codebase
            .add(&self.remote, &path, &parse_git_config(&self.git_config))
            .with_context(|| format!("failed to add {}", self.remote))?;

        println!("Successfully added {} to: /{}", self.remote, path);
        Ok(())
    }
}

/// Arguments for `grove mv`.
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Current project path.
    pub src: String,

    /// New project path.
    pub dst: String,
}

impl MvArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        codebase
            .move_project(&self.src, &self.dst)
            .with_context(|| format!("failed to move {}", self.src))?;
        println!("Successfully moved from {} to {}", self.src, self.dst);
        Ok(())
    }
}

/// Arguments for `grove rm`.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Project path to remove.
    pub path: String,

    /// Also delete the project from disk.
    #[arg(long)]
    pub delete: bool,
}

impl RmArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        codebase
            .rm_project(&self.path, self.delete)
            .with_context(|| format!("failed to remove {}", self.path))?;
        println!("Successfully deleted {}", self.path);
        Ok(())
    }
}

/// Arguments for `grove ls`.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "remote")]
    remote: String,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "branch")]
    branch: String,
}

#[derive(Serialize)]
struct ProjectJson {
    path: String,
    remote: String,
    branch: String,
    dirty: bool,
}

impl LsArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        let statuses = codebase
            .project_statuses()
            .context("failed to list projects")?;

        if self.json {
            let rows: Vec<ProjectJson> = statuses
                .iter()
                .map(|status| ProjectJson {
                    path: status.path.clone(),
                    remote: status.remote.clone(),
                    branch: status.branch.clone(),
                    dirty: status.dirty,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if statuses.is_empty() {
            println!("No projects in codebase");
            println!("Tips: add a project using `grove add git@github.com:someone/blog.git Personal/blog`");
            return Ok(());
        }

        let rows: Vec<ProjectRow> = statuses
            .iter()
            .map(|status| ProjectRow {
                remote: status.remote.clone(),
                path: format!("/{}", status.path),
                branch: if status.dirty {
                    format!("{}(*)", status.branch).yellow().italic().to_string()
                } else {
                    status.branch.clone()
                },
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::blank()));
        Ok(())
    }
}

/// `grove pwd`.
pub fn pwd() -> Result<()> {
    let codebase = open_codebase()?;
    println!("/{}", codebase.local_path());
    Ok(())
}

/// Parse repeated `key=value` flags; malformed entries are ignored.
fn parse_git_config(args: &[String]) -> BTreeMap<String, String> {
    args.iter()
        .filter_map(|arg| arg.split_once('='))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_config_pairs_are_parsed() {
        let parsed = parse_git_config(&[
            "user.email=jane@doe.dev".to_owned(),
            "commit.gpgsign=true".to_owned(),
            "malformed".to_owned(),
        ]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["user.email"], "jane@doe.dev");
        assert_eq!(parsed["commit.gpgsign"], "true");
    }

    #[test]
    fn git_config_value_may_contain_equals() {
        let parsed = parse_git_config(&["alias.lg=log --format=%s".to_owned()]);
        assert_eq!(parsed["alias.lg"], "log --format=%s");
    }
}
