//! Error types for grove-engine.

use std::path::PathBuf;

use thiserror::Error;

use grove_core::ManifestError;
use grove_git::GitError;

/// All errors that can arise from codebase operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A codebase (meta directory) is already present at the target path.
    #[error("a codebase already exists at {path}")]
    CodebaseExists { path: PathBuf },

    /// No meta marker was found in the starting directory or any ancestor.
    #[error("no codebase found in {path} or its parent directories")]
    CodebaseNotFound { path: PathBuf },

    /// The destination manifest path is already occupied by a project.
    #[error("path {path} is already taken by another project")]
    PathTaken { path: String },

    /// An error from the manifest layer (store, resolver, lookups).
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// An error from the Repository Gateway.
    #[error(transparent)]
    Git(#[from] GitError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
