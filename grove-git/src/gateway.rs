//! Gateway contract consumed by the engine.

use std::path::Path;

use crate::error::GitError;

/// A single version-controlled working copy.
pub trait Repository: Send + Sync {
    /// Stage `files` (paths relative to the working copy) and record a
    /// commit with `message`.
    fn commit_files(&self, message: &str, files: &[&str]) -> Result<(), GitError>;

    fn push(&self, remote: &str, refname: &str) -> Result<(), GitError>;

    fn pull(&self, remote: &str, refname: &str) -> Result<(), GitError>;

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError>;

    fn set_config(&self, key: &str, value: &str) -> Result<(), GitError>;

    fn config(&self, key: &str) -> Result<String, GitError>;

    /// Run an arbitrary git command in the working copy, returning its
    /// output.
    fn raw_cmd(&self, args: &[String]) -> Result<String, GitError>;

    /// Name of the current branch.
    fn head(&self) -> Result<String, GitError>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self) -> Result<bool, GitError>;
}

/// Something that can init, open, or clone a [`Repository`].
pub trait RepoProvider: Send + Sync {
    fn init(&self, path: &Path) -> Result<Box<dyn Repository>, GitError>;

    fn open(&self, path: &Path) -> Result<Box<dyn Repository>, GitError>;

    fn clone(&self, url: &str, path: &Path) -> Result<Box<dyn Repository>, GitError>;

    /// Whether `path` is a version-controlled working copy.
    fn exists(&self, path: &Path) -> bool;
}
