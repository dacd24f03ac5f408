//! Caller-relative path scoping.
//!
//! Manifest keys are always relative to the codebase root, `/`-separated.
//! A caller sitting somewhere inside the codebase supplies paths relative
//! to its own location; these helpers turn them into manifest keys.

use std::path::Path;

/// Join the caller's location inside the codebase with a user-supplied
/// relative path, producing a manifest key. Empty-safe on both sides.
pub fn scoped_path(local_path: &str, path: &str) -> String {
    let local = local_path.trim_matches('/');
    let path = path.trim_matches('/');
    match (local.is_empty(), path.is_empty()) {
        (true, _) => path.to_owned(),
        (_, true) => local.to_owned(),
        _ => format!("{local}/{path}"),
    }
}

/// Default project name for `remote`: its last `/`- or `:`-segment with a
/// trailing `.git` stripped.
pub fn derive_project_name(remote: &str) -> String {
    let trimmed = remote.trim_end_matches('/');
    let tail = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    tail.strip_suffix(".git").unwrap_or(tail).to_owned()
}

/// Render a relative filesystem path as a `/`-separated manifest key.
pub fn path_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "test", "test")]
    #[case("", "Test-folder/Another/test", "Test-folder/Another/test")]
    #[case("test/b/c/d", "test", "test/b/c/d/test")]
    #[case("test/d/a/b", "Test-folder/Another/test", "test/d/a/b/Test-folder/Another/test")]
    #[case("a/b", "", "a/b")]
    #[case("", "", "")]
    #[case("a/", "/b", "a/b")]
    fn scoping(#[case] local: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(scoped_path(local, path), expected);
    }

    #[rstest]
    #[case("git@github.com:someone/test.git", "test")]
    #[case("git@example.com:test.git", "test")]
    #[case("https://example.com/group/project.git", "project")]
    #[case("https://example.com/group/project", "project")]
    #[case("https://example.com/group/project/", "project")]
    #[case("local-repo", "local-repo")]
    fn name_derivation(#[case] remote: &str, #[case] expected: &str) {
        assert_eq!(derive_project_name(remote), expected);
    }

    #[test]
    fn path_key_joins_components_with_slashes() {
        assert_eq!(path_key(Path::new("a/b/c")), "a/b/c");
        assert_eq!(path_key(Path::new("")), "");
    }
}
