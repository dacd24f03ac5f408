//! The reconciler: diff the manifest around a remote pull and apply the
//! side effects.
//!
//! Events are pull-based: `sync` returns a [`SyncReport`] the caller drains
//! after the fact — there is no channel to consume concurrently. Exactly
//! one entry per changed path; no ordering guarantee across paths.

use std::fmt;
use std::path::Path;

use rayon::prelude::*;

use grove_core::{Manifest, Project, ProjectEntry};
use grove_git::{GitError, RepoProvider};

use crate::codebase::Codebase;
use crate::error::EngineError;
use crate::scripts::write_pre_push_hook;

/// A recorded-but-non-fatal outcome of a sync pass.
#[derive(Debug)]
pub enum SoftFailure {
    /// Pulling the meta repository failed (commonly: nothing to pull yet).
    Pull { source: GitError },

    /// Cloning a newly-added project failed; it stays recorded in the
    /// manifest but unpopulated on disk.
    Clone { path: String, source: GitError },

    /// Deleting a removed project's subtree failed.
    Remove {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for SoftFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftFailure::Pull { source } => write!(f, "pull failed: {source}"),
            SoftFailure::Clone { path, source } => write!(f, "clone of {path} failed: {source}"),
            SoftFailure::Remove { path, source } => {
                write!(f, "removal of {path} failed: {source}")
            }
        }
    }
}

/// Everything one sync pass did (or declined to do).
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Projects present after the pull but not before.
    pub added: Vec<ProjectEntry>,
    /// Projects present before the pull but not after.
    pub removed: Vec<ProjectEntry>,
    /// Best-effort steps that failed without aborting the pass.
    pub soft: Vec<SoftFailure>,
}

impl Codebase {
    /// Synchronize the codebase with its remote.
    ///
    /// Pulls the meta repository (best-effort), pushes it (fatal on
    /// failure), then reconciles the on-disk tree against the manifest
    /// delta: newly-listed projects are cloned, every listed project gets
    /// its config re-applied and its hook re-materialized, and projects
    /// that vanished are reported (and deleted when `delete_removed`).
    ///
    /// Per-path reconciliation runs concurrently, one task per project;
    /// the first config/hook failure aborts the group and is returned.
    pub fn sync(&self, delete_removed: bool) -> Result<SyncReport, EngineError> {
        let before = self.manifest()?;
        let mut report = SyncReport::default();

        let branch = self.repo().head()?;
        if let Err(source) = self.repo().pull("origin", &branch) {
            tracing::warn!(%source, "pull failed; continuing");
            report.soft.push(SoftFailure::Pull { source });
        }
        self.repo().push("origin", &branch)?;

        let after = self.manifest()?;
        if before == after {
            tracing::debug!("manifest unchanged; nothing to reconcile");
            return Ok(report);
        }

        let soft_results = after
            .projects
            .par_iter()
            .map(|(path, project)| {
                install_project(self.gateway(), self.root(), &after, path, project, true)
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        report.soft.extend(soft_results.into_iter().flatten());

        for (path, project) in &after.projects {
            if !before.projects.contains_key(path) {
                report.added.push(ProjectEntry {
                    path: path.clone(),
                    project: project.clone(),
                });
            }
        }

        for (path, project) in &before.projects {
            if after.projects.contains_key(path) {
                continue;
            }
            report.removed.push(ProjectEntry {
                path: path.clone(),
                project: project.clone(),
            });
            if delete_removed {
                let dir = self.root().join(path);
                if let Err(source) = std::fs::remove_dir_all(&dir) {
                    tracing::warn!(%path, %source, "failed to delete removed project");
                    report.soft.push(SoftFailure::Remove {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }

        tracing::info!(
            added = report.added.len(),
            removed = report.removed.len(),
            soft = report.soft.len(),
            "codebase synchronized"
        );
        Ok(report)
    }
}

/// Bring one project in line with its manifest entry: clone it if missing
/// on disk, re-apply every config entry, re-materialize the hook.
///
/// With `tolerate_clone_failure`, a failed clone is returned as a
/// [`SoftFailure`] and config/hook are skipped for that path; config and
/// hook failures are always fatal.
pub(crate) fn install_project(
    gateway: &dyn RepoProvider,
    root: &Path,
    manifest: &Manifest,
    path: &str,
    project: &Project,
    tolerate_clone_failure: bool,
) -> Result<Option<SoftFailure>, EngineError> {
    let dest = root.join(path);
    if !gateway.exists(&dest) {
        tracing::info!(path, remote = %project.remote, "cloning project");
        if let Err(source) = gateway.clone(&project.remote, &dest) {
            if !tolerate_clone_failure {
                return Err(source.into());
            }
            tracing::warn!(path, %source, "clone failed; project left unpopulated");
            return Ok(Some(SoftFailure::Clone {
                path: path.to_owned(),
                source,
            }));
        }
    }

    let repo = gateway.open(&dest)?;
    for (key, value) in &project.config {
        repo.set_config(key, value)?;
    }

    if let Some(hook) = &project.hook {
        let script = manifest.resolve_script(path, hook)?;
        write_pre_push_hook(root, path, &script)?;
    }

    Ok(None)
}
