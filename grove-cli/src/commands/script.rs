//! Script commands: `grove script`, `grove run`, `grove hook`.

use anyhow::{Context, Result};
use clap::Args;

use crate::editor;

use super::open_codebase;

/// Arguments for `grove script`.
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Script name.
    pub name: String,

    /// Script command; opens `$EDITOR` when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Define the script at codebase (global) level.
    #[arg(long)]
    pub global: bool,
}

impl ScriptArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;

        let script = if self.command.is_empty() {
            // Seed the editor with the current definition, if any.
            let manifest = codebase.manifest()?;
            let previous = if self.global {
                manifest.scripts.get(&self.name).cloned()
            } else {
                manifest
                    .projects
                    .get(codebase.local_path())
                    .and_then(|project| project.scripts.get(&self.name).cloned())
            }
            .unwrap_or_default();

            let edited =
                editor::capture(&previous).context("failed to capture script from $EDITOR")?;
            if edited.is_empty() || edited == previous {
                return Ok(()); // nothing to do
            }
            edited
        } else {
            vec![self.command.join(" ")]
        };

        codebase
            .set_script(&self.name, script, self.global)
            .with_context(|| format!("failed to set script `{}`", self.name))?;
        Ok(())
    }
}

/// Arguments for `grove run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script name.
    pub script: String,

    /// Arguments passed to the script as `$1`, `$2`, …
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        run_script(&self.script, &self.args)
    }
}

/// `grove <script> [args...]` — the external-subcommand shortcut.
pub fn run_external(args: Vec<String>) -> Result<()> {
    let (script, args) = args.split_first().context("missing script name")?;
    run_script(script, args)
}

fn run_script(script: &str, args: &[String]) -> Result<()> {
    let codebase = open_codebase()?;
    let output = codebase
        .run_script(script, args)
        .with_context(|| format!("failed to run `{script}`"))?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Arguments for `grove hook`.
#[derive(Args, Debug)]
pub struct HookArgs {
    /// Script to materialize as the pre-push hook.
    pub script: String,
}

impl HookArgs {
    pub fn run(self) -> Result<()> {
        let codebase = open_codebase()?;
        codebase
            .set_hook(&self.script)
            .with_context(|| format!("failed to set hook `{}`", self.script))?;
        println!(
            "Successfully applied hook `{}` to /{}",
            self.script,
            codebase.local_path()
        );
        Ok(())
    }
}
