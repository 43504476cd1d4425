//! Common helpers for permascript integration tests
//!
//! [`TestProject`] wraps a fake Steam install plus an app info snapshot
//! directory and runs the compiled binary against them, fully offline.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use permascript::test_utils::TestSteam;
use std::path::{Path, PathBuf};

pub use permascript::test_utils::AppInfoBuilder;

/// Captured result of one binary run.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub struct TestProject {
    steam: TestSteam,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            steam: TestSteam::new()?,
        })
    }

    pub fn steam(&mut self) -> &mut TestSteam {
        &mut self.steam
    }

    pub fn root(&self) -> &Path {
        self.steam.root()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.steam.output_dir()
    }

    pub fn key_store_path(&self) -> PathBuf {
        self.steam.key_store_path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.steam.root().join("config.toml")
    }

    /// Command preconfigured with the project's config file, Steam install
    /// and snapshot directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("permascript").expect("binary is built");
        cmd.arg("--no-progress")
            .arg("--config")
            .arg(self.config_path())
            .arg("--steam-path")
            .arg(self.steam.steam_path())
            .arg("--appinfo-dir")
            .arg(self.steam.appinfo_dir())
            .env_remove("RUST_LOG")
            .env_remove("PERMASCRIPT_STEAM_PATH")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run_permascript(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command().args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
