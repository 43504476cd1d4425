//! `permascript config`: inspect and edit the global configuration.
//!
//! # Examples
//!
//! ```bash
//! permascript config                       # same as `config show`
//! permascript config path
//! permascript config init --force
//! permascript config set steam_path ~/.local/share/Steam
//! permascript config set fetch_retries 5
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::GlobalConfig;

/// Command to manage the global configuration file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Print the effective configuration (defaults filled in)
    Show,

    /// Print the configuration file location
    Path,

    /// Write an example configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set one key and save
    Set {
        /// One of: steam_path, output_dir, appinfo_url, request_timeout_secs,
        /// fetch_retries, cache_capacity
        key: String,
        value: String,
    },
}

fn resolve_config_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => GlobalConfig::default_path(),
    }
}

impl ConfigCommand {
    /// Execute against `config_path` (the `--config` flag) or the default file.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let path = resolve_config_path(config_path)?;
        match self.command {
            Some(ConfigSubcommands::Show) | None => Self::show(&path).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", path.display());
                Ok(())
            }
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(&path, force).await,
            Some(ConfigSubcommands::Set {
                key,
                value,
            }) => Self::set(&path, &key, &value).await,
        }
    }

    async fn show(path: &Path) -> Result<()> {
        let config = GlobalConfig::load_with_optional(Some(path.to_path_buf())).await?;

        println!("{}", "Global Configuration".bold());
        println!("Location: {}", path.display());
        if !path.exists() {
            println!("{}", "(file does not exist, showing defaults)".dimmed());
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }

    async fn init(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            println!("❌ Global config already exists at: {}", path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = GlobalConfig::init_example();
        config.save_to(path).await?;

        println!("✅ Created global config at: {}", path.display());
        println!("\n{}", "Example configuration:".bold());
        println!("{}", toml::to_string_pretty(&config)?);
        println!("{}", "Next steps:".yellow());
        println!("  1. Point steam_path at your Steam install");
        println!("  2. Set output_dir to where bundles should be written");
        Ok(())
    }

    async fn set(path: &Path, key: &str, value: &str) -> Result<()> {
        let mut config = GlobalConfig::load_with_optional(Some(path.to_path_buf())).await?;
        config.set(key, value)?;
        config.save_to(path).await?;

        println!("✅ Set {key} in {}", path.display());
        Ok(())
    }
}
