//! Codebase lifecycle: init, open, clone.
//!
//! A codebase is a root directory whose `.grove/` subdirectory is a git
//! working copy holding `manifest.json`. The meta repository's commit
//! history is the only audit trail of manifest changes, so every mutation
//! goes through [`Codebase::persist`].

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use grove_core::{scope, Manifest, ManifestStore, Project, ProjectEntry, MANIFEST_FILE};
use grove_git::{RepoProvider, Repository};

use crate::error::{io_err, EngineError};
use crate::reconcile::install_project;

/// Name of the meta-repository directory marking a codebase root.
pub const META_DIR: &str = ".grove";

/// An opened codebase: the root directory, the caller's location inside it,
/// and the injected gateway + store collaborators.
pub struct Codebase {
    root: PathBuf,
    local_path: String,
    repo: Box<dyn Repository>,
    gateway: Box<dyn RepoProvider>,
    store: Box<dyn ManifestStore>,
}

impl std::fmt::Debug for Codebase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codebase")
            .field("root", &self.root)
            .field("local_path", &self.local_path)
            .finish_non_exhaustive()
    }
}

impl Codebase {
    /// Create an empty codebase at `path`.
    ///
    /// With `import`, existing git working copies under `path` are
    /// registered in the initial manifest, their remote taken from
    /// `remote.origin.url`. Returns the codebase plus one entry per
    /// imported project.
    pub fn init(
        gateway: Box<dyn RepoProvider>,
        store: Box<dyn ManifestStore>,
        path: &Path,
        remote: Option<&str>,
        import: bool,
    ) -> Result<(Self, Vec<ProjectEntry>), EngineError> {
        let meta = path.join(META_DIR);
        if meta.exists() {
            return Err(EngineError::CodebaseExists {
                path: path.to_path_buf(),
            });
        }

        std::fs::create_dir_all(&meta).map_err(|e| io_err(&meta, e))?;
        let repo = gateway.init(&meta)?;

        let mut manifest = Manifest::default();
        let mut imported = Vec::new();
        if import {
            for (project_path, project) in discover_repositories(gateway.as_ref(), path)? {
                tracing::info!(path = %project_path, remote = %project.remote, "importing repository");
                imported.push(ProjectEntry {
                    path: project_path.clone(),
                    project: project.clone(),
                });
                manifest.projects.insert(project_path, project);
            }
        }

        store.write(&meta.join(MANIFEST_FILE), &manifest)?;
        let readme = meta.join("README.md");
        std::fs::write(&readme, readme_md(remote)).map_err(|e| io_err(&readme, e))?;
        repo.commit_files("Initial commit", &[MANIFEST_FILE, "README.md"])?;

        if let Some(remote) = remote {
            repo.add_remote("origin", remote)?;
        }

        Ok((
            Self {
                root: path.to_path_buf(),
                local_path: String::new(),
                repo,
                gateway,
                store,
            },
            imported,
        ))
    }

    /// Open the codebase containing `dir`.
    ///
    /// Walks `dir` and its ancestors looking for the meta marker; the local
    /// path is the remainder below the discovered root, computed once here.
    /// Fails closed with [`EngineError::CodebaseNotFound`] when no marker
    /// exists up to the filesystem root.
    pub fn open(
        gateway: Box<dyn RepoProvider>,
        store: Box<dyn ManifestStore>,
        dir: &Path,
    ) -> Result<Self, EngineError> {
        let root = dir
            .ancestors()
            .find(|ancestor| ancestor.join(META_DIR).is_dir())
            .ok_or_else(|| EngineError::CodebaseNotFound {
                path: dir.to_path_buf(),
            })?
            .to_path_buf();

        let local_path = dir
            .strip_prefix(&root)
            .map(scope::path_key)
            .unwrap_or_default();

        let repo = gateway.open(&root.join(META_DIR))?;
        Ok(Self {
            root,
            local_path,
            repo,
            gateway,
            store,
        })
    }

    /// Clone a codebase from `url` into `path` and install every project
    /// it lists: clone, re-apply config, materialize hooks.
    ///
    /// Project installation runs concurrently, one task per project; the
    /// first failure aborts the group.
    pub fn clone(
        gateway: Box<dyn RepoProvider>,
        store: Box<dyn ManifestStore>,
        url: &str,
        path: &Path,
    ) -> Result<(Self, Vec<ProjectEntry>), EngineError> {
        let meta = path.join(META_DIR);
        if meta.exists() {
            return Err(EngineError::CodebaseExists {
                path: path.to_path_buf(),
            });
        }

        let repo = gateway.clone(url, &meta)?;
        let codebase = Self {
            root: path.to_path_buf(),
            local_path: String::new(),
            repo,
            gateway,
            store,
        };

        let manifest = codebase.manifest()?;
        let installed = manifest
            .projects
            .par_iter()
            .map(|(project_path, project)| {
                install_project(
                    codebase.gateway(),
                    codebase.root(),
                    &manifest,
                    project_path,
                    project,
                    false,
                )?;
                Ok(ProjectEntry {
                    path: project_path.clone(),
                    project: project.clone(),
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok((codebase, installed))
    }

    /// Absolute path of the codebase root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The caller's location inside the codebase, `/`-separated, empty at
    /// the root.
    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    /// Read the manifest in full.
    pub fn manifest(&self) -> Result<Manifest, EngineError> {
        Ok(self.store.read(&self.manifest_path())?)
    }

    pub(crate) fn repo(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    pub(crate) fn gateway(&self) -> &dyn RepoProvider {
        self.gateway.as_ref()
    }

    pub(crate) fn manifest_path(&self) -> PathBuf {
        self.root.join(META_DIR).join(MANIFEST_FILE)
    }

    /// Scope a caller-relative path to a manifest key.
    pub(crate) fn scoped(&self, path: &str) -> String {
        scope::scoped_path(&self.local_path, path)
    }

    /// Write the manifest back wholesale and commit it to the meta
    /// repository with `message`.
    pub(crate) fn persist(&self, manifest: &Manifest, message: &str) -> Result<(), EngineError> {
        self.store.write(&self.manifest_path(), manifest)?;
        self.repo.commit_files(message, &[MANIFEST_FILE])?;
        Ok(())
    }
}

/// Find git working copies under `root` (excluding the meta directory) and
/// describe them as manifest projects. Repositories without an `origin`
/// remote are skipped.
fn discover_repositories(
    gateway: &dyn RepoProvider,
    root: &Path,
) -> Result<Vec<(String, Project)>, EngineError> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| io_err(root, e.into()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == std::ffi::OsStr::new(META_DIR) {
            walker.skip_current_dir();
            continue;
        }
        if !gateway.exists(entry.path()) {
            continue;
        }

        // A repository found; never descend into it.
        walker.skip_current_dir();

        let repo = gateway.open(entry.path())?;
        let remote = match repo.config("remote.origin.url") {
            Ok(remote) => remote,
            Err(_) => continue,
        };
        let key = entry
            .path()
            .strip_prefix(root)
            .map(scope::path_key)
            .unwrap_or_default();
        found.push((
            key,
            Project {
                remote,
                ..Project::default()
            },
        ));
    }

    Ok(found)
}

fn readme_md(remote: Option<&str>) -> String {
    let mut readme = String::new();
    readme.push_str("# .grove\n\n");
    readme.push_str("This repository contains a grove codebase manifest.\n");

    if let Some(remote) = remote {
        readme.push_str("\n## How to use it\n\n");
        readme.push_str("One can restore this codebase by issuing the following command:\n\n");
        readme.push_str("```\n");
        readme.push_str(&format!("$ grove clone {remote} code\n"));
        readme.push_str("```\n");
    }

    readme
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_without_remote_has_no_reclone_section() {
        let readme = readme_md(None);
        assert!(readme.starts_with("# .grove"));
        assert!(!readme.contains("grove clone"));
    }

    #[test]
    fn readme_with_remote_mentions_the_clone_command() {
        let readme = readme_md(Some("git@example.com:me/dot-grove.git"));
        assert!(readme.contains("$ grove clone git@example.com:me/dot-grove.git code"));
    }
}
