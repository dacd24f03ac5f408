//! Blocking subprocess execution with captured output.

use std::process::Command;

use crate::error::GitError;

/// Run `cmd` to completion and return its trimmed stdout.
///
/// A non-zero exit collects stderr into [`GitError::CommandFailed`] so the
/// caller's error message carries the underlying tool's diagnostics.
pub fn exec_with_output(cmd: &mut Command) -> Result<String, GitError> {
    let command = render(cmd);
    tracing::debug!(%command, "exec");

    let output = cmd.output().map_err(|source| GitError::Spawn {
        command: command.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .trim_end_matches('\n')
        .to_owned())
}

fn render(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_without_trailing_newline() {
        let out = exec_with_output(Command::new("echo").arg("hello")).expect("echo");
        assert_eq!(out, "hello");
    }

    #[test]
    fn nonzero_exit_carries_stderr() {
        let err = exec_with_output(Command::new("sh").args(["-c", "echo oops >&2; exit 3"]))
            .unwrap_err();
        match err {
            GitError::CommandFailed { stderr, .. } => assert_eq!(stderr, "oops"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let err = exec_with_output(&mut Command::new("definitely-not-a-binary")).unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
    }
}
