//! Script management, hook materialization, and execution.

use std::path::Path;
use std::process::Command;

use grove_core::{ManifestError, Script};
use grove_git::process::exec_with_output;

use crate::codebase::Codebase;
use crate::error::{io_err, EngineError};

const PRE_PUSH_HOOK: &str = "pre-push";

impl Codebase {
    /// Store a script, globally or on the caller's current project.
    pub fn set_script(
        &self,
        name: &str,
        script: Script,
        global: bool,
    ) -> Result<(), EngineError> {
        let mut manifest = self.manifest()?;
        let message = if global {
            manifest.scripts.insert(name.to_owned(), script);
            format!("Add global script `{name}`")
        } else {
            let path = self.local_path().to_owned();
            let project = manifest
                .projects
                .get_mut(&path)
                .ok_or_else(|| ManifestError::ProjectNotFound { path: path.clone() })?;
            project.scripts.insert(name.to_owned(), script);
            format!("Add script `{name}` to /{path}")
        };
        self.persist(&manifest, &message)
    }

    /// Designate `name` as the current project's pre-push hook and write
    /// the resolved script to the hook file.
    pub fn set_hook(&self, name: &str) -> Result<(), EngineError> {
        let mut manifest = self.manifest()?;
        let path = self.local_path().to_owned();
        let script = manifest.resolve_script(&path, name)?;
        write_pre_push_hook(self.root(), &path, &script)?;

        // resolve_script guaranteed the project exists.
        if let Some(project) = manifest.projects.get_mut(&path) {
            project.hook = Some(name.to_owned());
        }
        self.persist(&manifest, &format!("Set pre-push hook `{name}` for {path}"))
    }

    /// Resolve and execute a script in the current project's directory,
    /// returning its output.
    ///
    /// Lines are joined and run through `sh -c`, so `$1`, `$2`, … inside
    /// the script refer to `args`.
    pub fn run_script(&self, name: &str, args: &[String]) -> Result<String, EngineError> {
        let manifest = self.manifest()?;
        let script = manifest.resolve_script(self.local_path(), name)?;

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(script.join("\n"))
            .arg("sh")
            .args(args)
            .current_dir(self.root().join(self.local_path()));
        Ok(exec_with_output(&mut cmd)?)
    }

    /// Run one raw git command per project, in manifest (sorted) order,
    /// collecting per-project output. The first failure aborts.
    pub fn bulk_git(&self, args: &[String]) -> Result<Vec<(String, String)>, EngineError> {
        let manifest = self.manifest()?;
        let mut outputs = Vec::with_capacity(manifest.projects.len());
        for path in manifest.projects.keys() {
            let repo = self.gateway().open(&self.root().join(path))?;
            outputs.push((path.clone(), repo.raw_cmd(args)?));
        }
        Ok(outputs)
    }
}

/// Overwrite the project's pre-push hook file with `script`, newline-joined,
/// executable on unix.
pub(crate) fn write_pre_push_hook(
    root: &Path,
    project_path: &str,
    script: &[String],
) -> Result<(), EngineError> {
    let hooks_dir = root.join(project_path).join(".git").join("hooks");
    std::fs::create_dir_all(&hooks_dir).map_err(|e| io_err(&hooks_dir, e))?;

    let hook_path = hooks_dir.join(PRE_PUSH_HOOK);
    std::fs::write(&hook_path, script.join("\n")).map_err(|e| io_err(&hook_path, e))?;
    set_executable(&hook_path)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), EngineError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), EngineError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
