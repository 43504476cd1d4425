//! Global configuration for permascript.
//!
//! User-wide settings live in a TOML file:
//!
//! - **Unix/macOS**: `~/.permascript/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\permascript\config.toml`
//!
//! Every field is optional in the file; missing fields take their defaults.
//!
//! ```toml
//! # Steam install to read config/config.vdf and depotcache/ from
//! steam_path = "~/.local/share/Steam"
//!
//! # Where <appid>/ bundles are written
//! output_dir = "~/permascript-out"
//!
//! # App-info endpoint, {appid} is substituted
//! appinfo_url = "https://steamui.com/get_appinfo.php?appid={appid}"
//!
//! request_timeout_secs = 30
//! fetch_retries = 3
//! cache_capacity = 64
//! ```
//!
//! Path values go through `~` and `$VAR` expansion when used.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    DEFAULT_APPINFO_URL, DEFAULT_CACHE_CAPACITY, DEFAULT_FETCH_RETRIES,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::core::PermaError;
use crate::utils::platform::resolve_path;

/// Keys accepted by [`GlobalConfig::set`].
pub const CONFIG_KEYS: [&str; 6] = [
    "steam_path",
    "output_dir",
    "appinfo_url",
    "request_timeout_secs",
    "fetch_retries",
    "cache_capacity",
];

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_appinfo_url() -> String {
    DEFAULT_APPINFO_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

const fn default_fetch_retries() -> usize {
    DEFAULT_FETCH_RETRIES
}

const fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

/// User-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Steam install directory. Unset means "look in the usual places".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_path: Option<String>,

    /// Directory bundles are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// App-info URL template.
    #[serde(default = "default_appinfo_url")]
    pub appinfo_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries for transient fetch failures.
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: usize,

    /// Payloads kept by the interactive shell's cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            steam_path: None,
            output_dir: default_output_dir(),
            appinfo_url: default_appinfo_url(),
            request_timeout_secs: default_request_timeout_secs(),
            fetch_retries: default_fetch_retries(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl GlobalConfig {
    /// Load from the default location, or defaults if there is no file.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, else from the default location.
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .map_err(PermaError::from)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    /// Save to a specific file, creating parent directories.
    ///
    /// On Unix the file is made readable by its owner only.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Platform location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("permascript")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".permascript")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Configuration written by `config init`.
    #[must_use]
    pub fn init_example() -> Self {
        Self {
            steam_path: Some("~/.local/share/Steam".to_string()),
            ..Self::default()
        }
    }

    /// Update one field from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PermaError> {
        let number = |value: &str| {
            value.trim().parse::<u64>().map_err(|_| PermaError::ConfigError {
                message: format!("'{key}' expects a non-negative integer, got '{value}'"),
            })
        };

        match key {
            "steam_path" => {
                self.steam_path = (!value.is_empty()).then(|| value.to_string());
            }
            "output_dir" => self.output_dir = value.to_string(),
            "appinfo_url" => self.appinfo_url = value.to_string(),
            "request_timeout_secs" => self.request_timeout_secs = number(value)?,
            "fetch_retries" => self.fetch_retries = number(value)? as usize,
            "cache_capacity" => self.cache_capacity = number(value)? as usize,
            _ => {
                return Err(PermaError::ConfigError {
                    message: format!(
                        "Unknown key '{key}'. Valid keys: {}",
                        CONFIG_KEYS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// `output_dir` with `~` and variables expanded.
    pub fn output_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.output_dir)
    }

    /// `steam_path` with `~` and variables expanded, if set.
    pub fn steam_path(&self) -> Result<Option<PathBuf>> {
        self.steam_path.as_deref().map(resolve_path).transpose()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
