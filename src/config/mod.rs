//! Configuration for permascript
//!
//! - [`GlobalConfig`] - user-wide settings from `~/.permascript/config.toml`
//! - [`SteamInstall`] - the Steam directory holding the key store and manifests
//!
//! Command-line flags override both: `--config` picks another file and
//! `--steam-path` bypasses Steam discovery.

mod global;
mod steam;

pub use global::{CONFIG_KEYS, GlobalConfig};
pub use steam::SteamInstall;
