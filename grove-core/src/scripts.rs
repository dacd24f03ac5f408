//! Script lookup with one-level alias resolution.

use crate::error::ManifestError;
use crate::types::{Manifest, Script};

impl Manifest {
    /// Resolve the script `name` for the project at `project_path`.
    ///
    /// A local value of exactly `["@target"]` is substituted with the global
    /// script `target`. Exactly one substitution is performed: a target that
    /// is itself an alias is returned as-is, never chased further.
    pub fn resolve_script(&self, project_path: &str, name: &str) -> Result<Script, ManifestError> {
        let project =
            self.projects
                .get(project_path)
                .ok_or_else(|| ManifestError::ProjectNotFound {
                    path: project_path.to_owned(),
                })?;

        let script = project
            .scripts
            .get(name)
            .ok_or_else(|| ManifestError::ScriptNotFound {
                name: name.to_owned(),
            })?;

        match alias_target(script) {
            Some(target) => {
                self.scripts
                    .get(target)
                    .cloned()
                    .ok_or_else(|| ManifestError::ScriptNotFound {
                        name: target.to_owned(),
                    })
            }
            None => Ok(script.clone()),
        }
    }
}

/// `["@name"]` → `Some("name")`; anything else is a literal script.
fn alias_target(script: &[String]) -> Option<&str> {
    match script {
        [single] => single.strip_prefix('@'),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
