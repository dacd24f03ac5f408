//! Project Registry operations.
//!
//! Every mutation re-reads the manifest, mutates it in memory, writes it
//! back wholesale, and commits to the meta repository. On failure nothing
//! is persisted — there is no partial manifest write.

use std::collections::BTreeMap;

use grove_core::{scope, ManifestError, Project};

use crate::codebase::Codebase;
use crate::error::{io_err, EngineError};

/// Branch / dirty state of one registered project, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatus {
    pub path: String,
    pub remote: String,
    pub branch: String,
    pub dirty: bool,
}

impl Codebase {
    /// Register `remote` as a project at `path`.
    ///
    /// An empty `path` defaults to a name derived from the remote's last
    /// segment. The path is scoped to the caller's location before use.
    /// Returns the newly inserted project.
    pub fn add(
        &self,
        remote: &str,
        path: &str,
        config: &BTreeMap<String, String>,
    ) -> Result<Project, EngineError> {
        let path = if path.is_empty() {
            scope::derive_project_name(remote)
        } else {
            path.to_owned()
        };
        let path = self.scoped(&path);

        let mut manifest = self.manifest()?;
        if manifest.projects.contains_key(&path) {
            return Err(EngineError::PathTaken { path });
        }

        let repo = self.gateway().clone(remote, &self.root().join(&path))?;
        let mut project = Project {
            remote: remote.to_owned(),
            ..Project::default()
        };
        for (key, value) in config {
            repo.set_config(key, value)?;
            project.config.insert(key.clone(), value.clone());
        }

        manifest.projects.insert(path.clone(), project.clone());
        self.persist(&manifest, &format!("Add {remote} to {path}"))?;
        tracing::info!(%remote, %path, "project added");
        Ok(project)
    }

    /// Move a project, in the manifest and on disk.
    pub fn move_project(&self, src: &str, dst: &str) -> Result<(), EngineError> {
        let src = self.scoped(src);
        let dst = self.scoped(dst);

        let mut manifest = self.manifest()?;
        let project = manifest
            .projects
            .get(&src)
            .cloned()
            .ok_or_else(|| ManifestError::ProjectNotFound { path: src.clone() })?;
        if manifest.projects.contains_key(&dst) {
            return Err(EngineError::PathTaken { path: dst });
        }

        let dst_dir = self.root().join(&dst);
        if let Some(parent) = dst_dir.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let src_dir = self.root().join(&src);
        std::fs::rename(&src_dir, &dst_dir).map_err(|e| io_err(&src_dir, e))?;

        manifest.projects.remove(&src);
        let remote = project.remote.clone();
        manifest.projects.insert(dst.clone(), project);
        self.persist(&manifest, &format!("Moved {remote} from {src} to {dst}"))
    }

    /// Remove a project from the manifest, and from disk when `delete` is
    /// requested.
    pub fn rm_project(&self, path: &str, delete: bool) -> Result<(), EngineError> {
        let path = self.scoped(path);

        let mut manifest = self.manifest()?;
        if manifest.projects.remove(&path).is_none() {
            return Err(ManifestError::ProjectNotFound { path }.into());
        }
        self.persist(&manifest, &format!("Remove {path}"))?;

        if delete {
            let dir = self.root().join(&path);
            std::fs::remove_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        }
        Ok(())
    }

    /// Branch / dirty status of every project, in manifest (sorted) order.
    pub fn project_statuses(&self) -> Result<Vec<ProjectStatus>, EngineError> {
        let manifest = self.manifest()?;
        let mut statuses = Vec::with_capacity(manifest.projects.len());
        for (path, project) in &manifest.projects {
            let repo = self.gateway().open(&self.root().join(path))?;
            statuses.push(ProjectStatus {
                path: path.clone(),
                remote: project.remote.clone(),
                branch: repo.head()?,
                dirty: repo.is_dirty()?,
            });
        }
        Ok(statuses)
    }
}
