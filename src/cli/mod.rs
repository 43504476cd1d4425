//! Command-line interface for permascript.
//!
//! # Available Commands
//!
//! - `generate` - Resolve an app, look up its keys and write a bundle
//! - `resolve` - Print the resolved depot records without writing anything
//! - `shell` - Interactive prompt that runs `generate` for each entered id
//! - `config` - Inspect and edit the global configuration
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to a custom config file
//! - `--steam-path` - Steam installation to read keys and manifests from
//! - `--appinfo-dir` - Read `<appid>.vdf` files from a directory instead of the network
//! - `--no-progress` - Disable spinners
//!
//! # Example
//!
//! ```bash
//! permascript generate 730 -o ./bundles
//! permascript resolve 730 --keys --format json
//! permascript --appinfo-dir ./snapshots shell
//! ```

pub mod common;
mod config;
mod generate;
pub mod report;
mod resolve;
pub mod shell;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use common::CommandContext;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and library callers can build a
/// [`CommandContext`] without going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Disable spinners.
    pub no_progress: bool,

    /// Custom path to the global configuration file.
    pub config_path: Option<PathBuf>,

    /// Steam installation root, overriding the config file and auto-detection.
    pub steam_path: Option<PathBuf>,

    /// Offline app info source.
    pub appinfo_dir: Option<PathBuf>,
}

#[derive(Parser)]
#[command(
    name = "permascript",
    about = "Resolve Steam depots and generate unlock script bundles",
    version,
    long_about = "permascript resolves every depot of a Steam app (DLC included), attaches the \
                  decryption keys found in the local Steam install and writes a Lua script plus \
                  the matching manifest files."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the global config file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Steam installation root
    #[arg(long, global = true, value_name = "DIR", env = "PERMASCRIPT_STEAM_PATH")]
    steam_path: Option<PathBuf>,

    /// Read app info from `<DIR>/<appid>.vdf` instead of the network
    #[arg(long, global = true, value_name = "DIR")]
    appinfo_dir: Option<PathBuf>,

    /// Disable progress spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an unlock bundle for an app
    Generate(generate::GenerateCommand),

    /// Show the depots an app resolves to
    Resolve(resolve::ResolveCommand),

    /// Interactive prompt
    Shell(shell::ShellCommand),

    /// Manage the global configuration
    Config(config::ConfigCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            no_progress: self.no_progress,
            config_path: self.config.clone(),
            steam_path: self.steam_path.clone(),
            appinfo_dir: self.appinfo_dir.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        // `config` works on the file itself and must not fail on a broken one
        if let Commands::Config(cmd) = self.command {
            return cmd.execute(config.config_path).await;
        }

        let ctx = CommandContext::load(&config).await?;
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&ctx).await,
            Commands::Resolve(cmd) => cmd.execute(&ctx).await,
            Commands::Shell(cmd) => cmd.execute(&ctx).await,
            Commands::Config(_) => Ok(()),
        }
    }
}
