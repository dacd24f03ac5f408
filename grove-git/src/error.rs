//! Error types for grove-git.

use thiserror::Error;

/// All errors that can arise from gateway operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The command could not be spawned at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero; stderr is carried verbatim.
    #[error("error while running `{command}`: {stderr}")]
    CommandFailed { command: String, stderr: String },
}
