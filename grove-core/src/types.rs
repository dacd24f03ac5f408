//! Domain types for the grove manifest.
//!
//! All manifest maps are `BTreeMap` so serialized output is deterministic
//! and commits of `manifest.json` stay minimal. Absent maps deserialize to
//! empty maps and empty maps are skipped on serialization, so a write/read
//! round trip is structurally identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named command sequence: one shell line per element.
pub type Script = Vec<String>;

/// A single version-controlled project registered in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Remote the project was cloned from (and re-clones from).
    pub remote: String,

    /// Git configuration applied to the local clone. Idempotently
    /// re-appliable: setting the same key/value twice is a no-op.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,

    /// Project-local scripts. A single-element `@name` value aliases the
    /// global script `name`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, Script>,

    /// Name of the script materialized as the project's pre-push hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
}

/// The manifest: every project of the codebase plus the global scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Projects keyed by their path relative to the codebase root,
    /// `/`-separated. Key uniqueness is the map's own invariant.
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,

    /// Global scripts, addressable from project scripts via `@name`.
    #[serde(default)]
    pub scripts: BTreeMap<String, Script>,
}

/// A `(path, project)` pair, reported by clone and sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub path: String,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
