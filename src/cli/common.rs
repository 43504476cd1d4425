//! Shared plumbing for the CLI commands.
//!
//! [`CommandContext`] turns the global flags and the configuration file into
//! the pieces every command needs (fetcher, Steam install, output directory).
//! [`generate_bundle`] is the full pipeline used by both `generate` and the
//! interactive shell.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::CliConfig;
use crate::bundle::{BundleSummary, write_bundle};
use crate::config::{GlobalConfig, SteamInstall};
use crate::core::PermaError;
use crate::fetch::{AppInfoFetcher, AppInfoSource, DirectoryFetcher, HttpFetcher};
use crate::keystore::KeyStore;
use crate::resolver::{DepotRecord, DepotResolver};
use crate::script::{DepotCache, MaterializationPlan, materialize};
use crate::utils::progress::ProgressSpinner;

/// Everything a command needs, resolved from flags and the config file.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub global: GlobalConfig,
    pub config_path: Option<PathBuf>,
    pub steam_path: Option<PathBuf>,
    pub appinfo_dir: Option<PathBuf>,
    pub no_progress: bool,
}

impl CommandContext {
    /// Load the configuration file named by the flags (or the default one).
    pub async fn load(cli: &CliConfig) -> Result<Self> {
        let global = GlobalConfig::load_with_optional(cli.config_path.clone()).await?;
        Ok(Self {
            global,
            config_path: cli.config_path.clone(),
            steam_path: cli.steam_path.clone(),
            appinfo_dir: cli.appinfo_dir.clone(),
            no_progress: cli.no_progress,
        })
    }

    /// Offline directory source if `--appinfo-dir` was given, HTTP otherwise.
    pub fn fetcher(&self) -> Result<AppInfoSource> {
        if let Some(dir) = &self.appinfo_dir {
            return Ok(AppInfoSource::Directory(DirectoryFetcher::new(dir)));
        }
        let http = HttpFetcher::new(
            self.global.appinfo_url.clone(),
            self.global.request_timeout(),
            self.global.fetch_retries,
        )?;
        Ok(AppInfoSource::Http(http))
    }

    pub fn steam(&self) -> Result<SteamInstall> {
        let configured = self.global.steam_path()?;
        Ok(SteamInstall::locate(self.steam_path.as_deref(), configured.as_deref())?)
    }

    /// `-o` if given, else the configured output directory.
    pub fn output_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => self.global.output_dir(),
        }
    }

    pub fn spinner(&self) -> ProgressSpinner {
        ProgressSpinner::new(!self.no_progress)
    }
}

/// Result of a successful [`generate_bundle`] run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub app_id: u32,
    pub records: Vec<DepotRecord>,
    pub plan: MaterializationPlan,
    pub bundle: BundleSummary,
}

impl GenerateOutcome {
    pub fn game_name(&self) -> &str {
        self.records.first().map(|r| r.game_name.as_str()).unwrap_or_default()
    }
}

/// Resolve `app_id` and attach decryption keys from `steam`'s key store.
///
/// An unreadable key store is reported as a warning and leaves every key
/// empty. Returns the records and how many of them got a key.
pub async fn resolve_with_keys<F: AppInfoFetcher + Sync>(
    fetcher: &F,
    app_id: u32,
    steam: &SteamInstall,
    spinner: &ProgressSpinner,
) -> Result<(Vec<DepotRecord>, usize)> {
    spinner.set_message(format!("Resolving app {app_id}"));
    let resolved = DepotResolver::new(fetcher).resolve(app_id).await;
    spinner.finish_and_clear();
    let mut records = resolved?;

    let found = match KeyStore::load(&steam.key_store_path()) {
        Ok(store) => store.apply(&mut records),
        Err(e) => {
            warn!("{e}");
            eprintln!("{}: {e}", "warning".yellow().bold());
            0
        }
    };
    Ok((records, found))
}

/// The full pipeline: resolve, look up keys, plan, write.
///
/// Nothing is written when resolution yields no records or no record has a key.
pub async fn generate_bundle<F: AppInfoFetcher + Sync>(
    fetcher: &F,
    app_id: u32,
    steam: &SteamInstall,
    output_root: &Path,
    spinner: &ProgressSpinner,
) -> Result<GenerateOutcome> {
    let (records, found) = resolve_with_keys(fetcher, app_id, steam, spinner).await?;

    if records.is_empty() {
        return Err(PermaError::NoDepotsFound {
            app_id,
        }
        .into());
    }
    if found == 0 {
        return Err(PermaError::NoDecryptionKeys {
            app_id,
        }
        .into());
    }

    let plan = materialize(app_id, &records, &DepotCache::new(steam.depot_cache_dir()));
    let bundle = write_bundle(&plan, output_root)
        .with_context(|| format!("Failed to write bundle for app {app_id}"))?;

    Ok(GenerateOutcome {
        app_id,
        records,
        plan,
        bundle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AppInfoBuilder, MockFetcher, TestSteam};

    fn fixture() -> (TestSteam, MockFetcher) {
        let mut steam = TestSteam::new().unwrap();
        steam.add_key("11", "aa").unwrap();
        steam.add_manifest("11", 100, b"m").unwrap();
        let fetcher = MockFetcher::new().with_payload(
            10,
            AppInfoBuilder::new(10).name("Game").depot(11, 100, 2048).depot(12, 120, 1).dlc(&[13]).build(),
        );
        (steam, fetcher)
    }

    #[tokio::test]
    async fn test_generate_writes_bundle() {
        let (steam, fetcher) = fixture();
        let install = SteamInstall::new(steam.steam_path());

        let outcome =
            generate_bundle(&fetcher, 10, &install, &steam.output_dir(), &ProgressSpinner::hidden())
                .await
                .unwrap();

        assert_eq!(outcome.game_name(), "Game");
        assert_eq!(outcome.plan.copies.len(), 1);
        assert_eq!(
            std::fs::read_to_string(&outcome.bundle.script_path).unwrap(),
            "addappid(10)\naddappid(11,1,\"aa\")\nsetManifestid(11,\"100\",2048)\naddappid(13)\n"
        );
    }

    #[tokio::test]
    async fn test_no_keys_writes_nothing() {
        let (steam, fetcher) = fixture();
        steam.write_key_store("\"InstallConfigStore\" { }").unwrap();
        let install = SteamInstall::new(steam.steam_path());

        let err =
            generate_bundle(&fetcher, 10, &install, &steam.output_dir(), &ProgressSpinner::hidden())
                .await
                .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PermaError>(),
            Some(PermaError::NoDecryptionKeys { app_id: 10 })
        ));
        assert!(!steam.output_dir().join("10").exists());
    }

    #[tokio::test]
    async fn test_missing_key_store_is_no_keys() {
        let (steam, fetcher) = fixture();
        std::fs::remove_file(steam.key_store_path()).unwrap();
        let install = SteamInstall::new(steam.steam_path());

        let (records, found) =
            resolve_with_keys(&fetcher, 10, &install, &ProgressSpinner::hidden()).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(found, 0);
    }

    #[tokio::test]
    async fn test_empty_resolution_is_no_depots() {
        let steam = TestSteam::new().unwrap();
        let fetcher = MockFetcher::new().with_payload(5, AppInfoBuilder::new(5).build());
        let install = SteamInstall::new(steam.steam_path());

        let err =
            generate_bundle(&fetcher, 5, &install, &steam.output_dir(), &ProgressSpinner::hidden())
                .await
                .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PermaError>(),
            Some(PermaError::NoDepotsFound { app_id: 5 })
        ));
    }
}
