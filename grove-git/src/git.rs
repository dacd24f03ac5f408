//! Subprocess-`git` implementation of the gateway.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::GitError;
use crate::gateway::{RepoProvider, Repository};
use crate::process::exec_with_output;

/// Gateway backed by the system `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

/// A working copy driven through `git -C <dir>`.
pub struct GitRepository {
    dir: PathBuf,
}

impl GitRepository {
    fn git(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.dir).args(args);
        exec_with_output(&mut cmd)
    }
}

impl Repository for GitRepository {
    fn commit_files(&self, message: &str, files: &[&str]) -> Result<(), GitError> {
        let mut add = vec!["add", "--"];
        add.extend_from_slice(files);
        self.git(&add)?;
        // --allow-empty keeps the mutation-then-commit invariant even when
        // the staged rewrite is byte-identical.
        self.git(&["commit", "--allow-empty", "-m", message])?;
        Ok(())
    }

    fn push(&self, remote: &str, refname: &str) -> Result<(), GitError> {
        self.git(&["push", remote, refname]).map(drop)
    }

    fn pull(&self, remote: &str, refname: &str) -> Result<(), GitError> {
        self.git(&["pull", remote, refname]).map(drop)
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.git(&["remote", "add", name, url]).map(drop)
    }

    fn set_config(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.git(&["config", key, value]).map(drop)
    }

    fn config(&self, key: &str) -> Result<String, GitError> {
        self.git(&["config", "--get", key])
    }

    fn raw_cmd(&self, args: &[String]) -> Result<String, GitError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.git(&args)
    }

    fn head(&self) -> Result<String, GitError> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn is_dirty(&self) -> Result<bool, GitError> {
        Ok(!self.git(&["status", "--porcelain"])?.is_empty())
    }
}

impl RepoProvider for GitCli {
    fn init(&self, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("init").arg(path);
        exec_with_output(&mut cmd)?;

        let repo = GitRepository {
            dir: path.to_path_buf(),
        };
        // Pin fresh repositories to `main` regardless of the host's
        // init.defaultBranch.
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"])?;
        Ok(Box::new(repo))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        let repo = GitRepository {
            dir: path.to_path_buf(),
        };
        repo.git(&["rev-parse", "--git-dir"])?;
        Ok(Box::new(repo))
    }

    fn clone(&self, url: &str, path: &Path) -> Result<Box<dyn Repository>, GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("clone").arg(url).arg(path);
        exec_with_output(&mut cmd)?;
        Ok(Box::new(GitRepository {
            dir: path.to_path_buf(),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        path.join(".git").exists()
    }
}

// ---------------------------------------------------------------------------
// Tests — these drive the real `git` binary inside temp directories.
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn init_repo(dir: &Path) -> Box<dyn Repository> {
        let repo = GitCli.init(dir).expect("git init");
        repo.set_config("user.name", "Grove Test").expect("config");
        repo.set_config("user.email", "grove@test.invalid")
            .expect("config");
        repo
    }

    #[test]
    fn init_creates_a_working_copy_on_main() {
        let dir = TempDir::new().expect("tempdir");
        let repo = init_repo(dir.path());
        assert!(GitCli.exists(dir.path()));

        std::fs::write(dir.path().join("README.md"), "hello").expect("write");
        repo.commit_files("Initial commit", &["README.md"])
            .expect("commit");
        assert_eq!(repo.head().expect("head"), "main");
    }

    #[test]
    fn open_rejects_a_plain_directory() {
        let dir = TempDir::new().expect("tempdir");
        assert!(GitCli.open(dir.path()).is_err());
        assert!(!GitCli.exists(dir.path()));
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().expect("tempdir");
        let repo = init_repo(dir.path());
        repo.set_config("grove.sentinel", "42").expect("set");
        assert_eq!(repo.config("grove.sentinel").expect("get"), "42");
        assert!(repo.config("grove.absent").is_err());
    }

    #[test]
    fn is_dirty_tracks_uncommitted_changes() {
        let dir = TempDir::new().expect("tempdir");
        let repo = init_repo(dir.path());
        std::fs::write(dir.path().join("file.txt"), "v1").expect("write");
        assert!(repo.is_dirty().expect("dirty"));

        repo.commit_files("Add file", &["file.txt"]).expect("commit");
        assert!(!repo.is_dirty().expect("clean"));
    }

    #[test]
    fn commit_is_recorded_even_when_nothing_changed() {
        let dir = TempDir::new().expect("tempdir");
        let repo = init_repo(dir.path());
        std::fs::write(dir.path().join("file.txt"), "v1").expect("write");
        repo.commit_files("First", &["file.txt"]).expect("commit");
        repo.commit_files("Second", &["file.txt"])
            .expect("empty commit");

        let log = repo
            .raw_cmd(&["log".to_owned(), "--format=%s".to_owned()])
            .expect("log");
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["Second", "First"]);
    }

    #[test]
    fn clone_from_a_local_repository() {
        let src = TempDir::new().expect("tempdir");
        let repo = init_repo(src.path());
        std::fs::write(src.path().join("README.md"), "origin copy").expect("write");
        repo.commit_files("Initial commit", &["README.md"])
            .expect("commit");

        let dst = TempDir::new().expect("tempdir");
        let target = dst.path().join("cloned");
        RepoProvider::clone(&GitCli, &src.path().to_string_lossy(), &target)
            .expect("clone");
        assert!(GitCli.exists(&target));
        assert_eq!(
            std::fs::read_to_string(target.join("README.md")).expect("read"),
            "origin copy"
        );
    }
}
