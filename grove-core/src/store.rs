//! JSON manifest store.
//!
//! The manifest is always read fully and written back wholesale — there is
//! no partial update. Write flow: serialize → `.tmp` sibling → `rename`.
//! The `.tmp` is always in the same directory as the target (same
//! filesystem — the rename stays atomic).

use std::path::Path;

use crate::error::{io_err, ManifestError};
use crate::types::Manifest;

/// File name of the manifest inside the meta directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Durable whole-document storage for a [`Manifest`].
///
/// A trait seam so the engine can be exercised against an in-memory store
/// in tests; production code uses [`JsonStore`].
pub trait ManifestStore: Send + Sync {
    /// Read the manifest at `path` in full.
    fn read(&self, path: &Path) -> Result<Manifest, ManifestError>;

    /// Replace the manifest at `path` wholesale.
    fn write(&self, path: &Path, manifest: &Manifest) -> Result<(), ManifestError>;
}

/// Manifest store backed by a pretty-printed JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStore;

impl ManifestStore for JsonStore {
    fn read(&self, path: &Path) -> Result<Manifest, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        serde_json::from_str(&contents).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn write(&self, path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
        let mut json = serde_json::to_string_pretty(manifest)?;
        json.push('\n');

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
