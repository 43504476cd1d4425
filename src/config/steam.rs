//! Locating the Steam install.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::{DEPOT_CACHE_DIR, KEY_STORE_RELATIVE_PATH};
use crate::core::PermaError;
use crate::utils::platform::steam_path_candidates;

/// A located Steam install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamInstall {
    root: PathBuf,
}

impl SteamInstall {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Pick the install: an explicit path wins, then the configured one, then
    /// the first platform candidate that has a `config` directory.
    ///
    /// Explicit and configured paths are trusted as given.
    pub fn locate(
        explicit: Option<&Path>,
        configured: Option<&Path>,
    ) -> Result<Self, PermaError> {
        if let Some(path) = explicit.or(configured) {
            debug!("Using Steam install at {}", path.display());
            return Ok(Self::new(path));
        }

        Self::locate_in(&steam_path_candidates()).ok_or(PermaError::SteamPathNotFound)
    }

    /// First of `candidates` that looks like a Steam install.
    pub fn locate_in(candidates: &[PathBuf]) -> Option<Self> {
        candidates.iter().find(|path| path.join("config").is_dir()).map(|path| {
            debug!("Found Steam install at {}", path.display());
            Self::new(path.clone())
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<steam>/config/config.vdf`.
    pub fn key_store_path(&self) -> PathBuf {
        KEY_STORE_RELATIVE_PATH.iter().fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// `<steam>/depotcache`.
    pub fn depot_cache_dir(&self) -> PathBuf {
        self.root.join(DEPOT_CACHE_DIR)
    }
}
