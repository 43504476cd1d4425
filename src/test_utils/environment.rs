//! Temporary Steam install layout for filesystem-level tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use super::fixtures::KeyStoreBuilder;

/// A throwaway directory tree shaped like a Steam install plus side folders.
///
/// ```text
/// <temp>/
/// ├── steam/config/config.vdf
/// ├── steam/depotcache/<depot>_<manifest>.manifest
/// ├── appinfo/<appid>.vdf
/// └── out/
/// ```
pub struct TestSteam {
    temp: TempDir,
    keys: KeyStoreBuilder,
}

impl TestSteam {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        for dir in ["steam/config", "steam/depotcache", "appinfo", "out"] {
            fs::create_dir_all(temp.path().join(dir))?;
        }
        Ok(Self {
            temp,
            keys: KeyStoreBuilder::new(),
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn steam_path(&self) -> PathBuf {
        self.root().join("steam")
    }

    pub fn appinfo_dir(&self) -> PathBuf {
        self.root().join("appinfo")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn key_store_path(&self) -> PathBuf {
        self.steam_path().join("config").join("config.vdf")
    }

    /// Add a key and rewrite `config.vdf`.
    pub fn add_key(&mut self, depot_id: &str, key: &str) -> Result<()> {
        self.keys = std::mem::take(&mut self.keys).key(depot_id, key);
        self.write_key_store(&self.keys.build())
    }

    pub fn write_key_store(&self, text: &str) -> Result<()> {
        fs::write(self.key_store_path(), text).context("Failed to write config.vdf")
    }

    /// Place a manifest file in `depotcache`.
    pub fn add_manifest(&self, depot_id: &str, manifest_id: u64, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.steam_path().join("depotcache").join(format!("{depot_id}_{manifest_id}.manifest"));
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Save an app-info payload for offline fetching.
    pub fn add_appinfo(&self, app_id: u32, text: &str) -> Result<()> {
        fs::write(self.appinfo_dir().join(format!("{app_id}.vdf")), text)
            .context("Failed to write app info")
    }
}
