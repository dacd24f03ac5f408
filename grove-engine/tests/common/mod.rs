//! Hand-rolled gateway double shared by the engine integration tests.
//!
//! The fake records every interesting call into a shared state cell and can
//! be scripted to fail pulls, pushes, or specific clones, and to rewrite
//! the meta manifest on pull (simulating remote changes arriving).

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use grove_core::{JsonStore, Manifest, ManifestStore, Project, MANIFEST_FILE};
use grove_engine::{Codebase, META_DIR};
use grove_git::{GitError, RepoProvider, Repository};

/// Observable and scriptable state shared by every fake handle.
#[derive(Default)]
pub struct GatewayState {
    /// `set_config` calls per repository directory.
    pub configs: BTreeMap<PathBuf, Vec<(String, String)>>,
    /// `(url, destination)` of every successful clone.
    pub cloned: Vec<(String, PathBuf)>,
    /// Commit messages in order, across all repositories.
    pub commits: Vec<String>,
    pub pulls: usize,
    pub pushes: usize,
    pub fail_pull: bool,
    pub fail_push: bool,
    /// Remotes whose clone must fail.
    pub fail_clone_urls: Vec<String>,
    /// Manifest written into the meta working copy by the next pull.
    pub pull_manifest: Option<Manifest>,
    /// Manifest written into a freshly cloned meta working copy.
    pub clone_manifest: Option<Manifest>,
    /// Where the meta manifest lives once the codebase root is known.
    pub manifest_path: Option<PathBuf>,
}

#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl FakeGateway {
    pub fn state(&self) -> MutexGuard<'_, GatewayState> {
        self.state.lock().expect("gateway state poisoned")
    }

    pub fn boxed(&self) -> Box<dyn RepoProvider> {
        Box::new(Clone::clone(self))
    }
}

struct FakeRepo {
    dir: PathBuf,
    state: Arc<Mutex<GatewayState>>,
}

fn failed(op: &str) -> GitError {
    GitError::CommandFailed {
        command: format!("fake git {op}"),
        stderr: format!("{op} failed"),
    }
}

impl Repository for FakeRepo {
    fn commit_files(&self, message: &str, _files: &[&str]) -> Result<(), GitError> {
        self.state
            .lock()
            .expect("state")
            .commits
            .push(message.to_owned());
        Ok(())
    }

    fn push(&self, _remote: &str, _refname: &str) -> Result<(), GitError> {
        let mut state = self.state.lock().expect("state");
        state.pushes += 1;
        if state.fail_push {
            return Err(failed("push"));
        }
        Ok(())
    }

    fn pull(&self, _remote: &str, _refname: &str) -> Result<(), GitError> {
        let mut state = self.state.lock().expect("state");
        state.pulls += 1;
        if state.fail_pull {
            return Err(failed("pull"));
        }
        if let (Some(manifest), Some(path)) =
            (state.pull_manifest.take(), state.manifest_path.clone())
        {
            JsonStore
                .write(&path, &manifest)
                .expect("write pulled manifest");
        }
        Ok(())
    }

    fn add_remote(&self, _name: &str, _url: &str) -> Result<(), GitError> {
        Ok(())
    }

    fn set_config(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.state
            .lock()
            .expect("state")
            .configs
            .entry(self.dir.clone())
            .or_default()
            .push((key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn config(&self, _key: &str) -> Result<String, GitError> {
        Err(failed("config"))
    }

    fn raw_cmd(&self, args: &[String]) -> Result<String, GitError> {
        Ok(format!("ran: {}", args.join(" ")))
    }

    fn head(&self) -> Result<String, GitError> {
        Ok("main".to_owned())
    }

    fn is_dirty(&self) -> Result<bool, GitError> {
        Ok(false)
    }
}

impl RepoProvider for FakeGateway {
    fn init(&self, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        std::fs::create_dir_all(path.join(".git")).expect("create fake repo");
        Ok(Box::new(FakeRepo {
            dir: path.to_path_buf(),
            state: self.state.clone(),
        }))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        if !path.join(".git").exists() {
            return Err(failed("open"));
        }
        Ok(Box::new(FakeRepo {
            dir: path.to_path_buf(),
            state: self.state.clone(),
        }))
    }

    fn clone(&self, url: &str, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        let mut state = self.state.lock().expect("state");
        if state.fail_clone_urls.iter().any(|candidate| candidate == url) {
            return Err(failed("clone"));
        }
        state.cloned.push((url.to_owned(), path.to_path_buf()));
        std::fs::create_dir_all(path.join(".git").join("hooks")).expect("create fake clone");

        let is_meta = path.file_name() == Some(std::ffi::OsStr::new(META_DIR));
        if is_meta {
            if let Some(manifest) = state.clone_manifest.clone() {
                JsonStore
                    .write(&path.join(MANIFEST_FILE), &manifest)
                    .expect("write cloned manifest");
            }
        }
        Ok(Box::new(FakeRepo {
            dir: path.to_path_buf(),
            state: self.state.clone(),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        path.join(".git").exists()
    }
}

/// Lay a codebase on disk (meta marker + manifest) and open it with fakes,
/// from `dir` (which must be `root` or a directory below it).
pub fn open_codebase_at(
    gateway: &FakeGateway,
    root: &Path,
    dir: &Path,
    manifest: &Manifest,
) -> Codebase {
    let meta = root.join(META_DIR);
    std::fs::create_dir_all(meta.join(".git")).expect("meta dirs");
    JsonStore
        .write(&meta.join(MANIFEST_FILE), manifest)
        .expect("seed manifest");
    gateway.state().manifest_path = Some(meta.join(MANIFEST_FILE));
    std::fs::create_dir_all(dir).expect("caller dir");
    Codebase::open(gateway.boxed(), Box::new(JsonStore), dir).expect("open codebase")
}

/// Create a project working copy on disk so the fake gateway can open it.
pub fn put_project_dir(root: &Path, path: &str) {
    std::fs::create_dir_all(root.join(path).join(".git").join("hooks"))
        .expect("project dirs");
}

/// Shorthand for a project with just a remote.
pub fn project(remote: &str) -> Project {
    Project {
        remote: remote.to_owned(),
        ..Project::default()
    }
}

/// Build a manifest from `(path, project)` pairs.
pub fn manifest_of(projects: &[(&str, Project)]) -> Manifest {
    let mut manifest = Manifest::default();
    for (path, project) in projects {
        manifest
            .projects
            .insert((*path).to_owned(), project.clone());
    }
    manifest
}
