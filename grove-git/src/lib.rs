//! # grove-git
//!
//! The Repository Gateway: the trait contract the engine consumes, plus the
//! subprocess-`git` implementation used everywhere outside tests.
//!
//! Every gateway call is synchronous and blocking; failures are surfaced
//! as [`GitError`] and never retried here.

pub mod error;
pub mod gateway;
pub mod git;
pub mod process;

pub use error::GitError;
pub use gateway::{RepoProvider, Repository};
pub use git::GitCli;
