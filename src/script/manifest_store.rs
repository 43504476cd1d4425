//! Where cached depot manifests are looked up.

use std::path::{Path, PathBuf};

use crate::constants::{DEPOT_CACHE_DIR, MANIFEST_EXTENSION};
use crate::utils::fs::is_non_empty_file;

/// File name of a cached manifest: `<depot_id>_<manifest_id>.manifest`.
pub fn manifest_file_name(depot_id: &str, manifest_id: u64) -> String {
    format!("{depot_id}_{manifest_id}.{MANIFEST_EXTENSION}")
}

/// Source of binary depot manifests.
pub trait ManifestStore {
    /// Location the manifest would have in this store.
    fn manifest_path(&self, depot_id: &str, manifest_id: u64) -> PathBuf;

    /// True when the manifest exists and is non-empty.
    fn has_manifest(&self, depot_id: &str, manifest_id: u64) -> bool {
        is_non_empty_file(&self.manifest_path(depot_id, manifest_id))
    }
}

/// The `depotcache` directory of a Steam install.
#[derive(Debug, Clone)]
pub struct DepotCache {
    dir: PathBuf,
}

impl DepotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
        }
    }

    /// `<steam_path>/depotcache`.
    pub fn for_steam(steam_path: &Path) -> Self {
        Self::new(steam_path.join(DEPOT_CACHE_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ManifestStore for DepotCache {
    fn manifest_path(&self, depot_id: &str, manifest_id: u64) -> PathBuf {
        self.dir.join(manifest_file_name(depot_id, manifest_id))
    }
}
