//! `$EDITOR` capture for `grove script`.

use std::io::Write;
use std::process::Command;

use anyhow::{ensure, Context, Result};
use tempfile::NamedTempFile;

/// Open `$EDITOR` (default `vi`) on a scratch file seeded with `initial`
/// and return the edited lines. An emptied-out file returns no lines.
pub fn capture(initial: &[String]) -> Result<Vec<String>> {
    let mut file = NamedTempFile::new().context("failed to create scratch file")?;
    if !initial.is_empty() {
        file.write_all(initial.join("\n").as_bytes())
            .context("failed to seed scratch file")?;
        file.flush().context("failed to flush scratch file")?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_owned());
    let status = Command::new(&editor)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch editor `{editor}`"))?;
    ensure!(status.success(), "editor `{editor}` exited with failure");

    let contents = std::fs::read_to_string(file.path()).context("failed to read scratch file")?;
    let trimmed = contents.trim_end_matches('\n');
    if trimmed.is_empty() {
        return Ok(vec![]);
    }
    Ok(trimmed.split('\n').map(str::to_owned).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
