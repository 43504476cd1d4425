//! permascript - Steam depot resolution and unlock script generation
//!
//! Given a Steam app id, permascript fetches the app's metadata (a VDF text
//! document), walks its depots and its DLC tree, attaches the depot decryption
//! keys found in the local Steam install and writes a bundle: a Lua script
//! (`<appid>.lua`) plus the manifest files it references.
//!
//! # Pipeline
//!
//! ```text
//! app id ──▶ fetch ──▶ vdf::parse ──▶ resolver ──▶ keystore ──▶ script ──▶ bundle
//!              ▲                         │
//!              └──── DLC ids (recursive) ┘
//! ```
//!
//! # Core Modules
//!
//! - [`vdf`] - Parser for Valve's KeyValues text format
//! - [`fetch`] - App info sources (HTTP, directory snapshots, in-memory cache)
//! - [`resolver`] - Recursive depot/DLC resolution with a shared visited set
//! - [`keystore`] - Decryption key lookup in Steam's `config.vdf`
//! - [`script`] - Lua instruction planning
//! - [`bundle`] - Writing the script and manifests to disk
//!
//! # Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Global configuration and Steam install discovery
//! - [`core`] - Error types and user-facing error formatting
//! - [`constants`] - Endpoints, file names and defaults
//! - [`utils`] - File system, platform, progress and formatting helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use permascript::fetch::DirectoryFetcher;
//! use permascript::resolver::DepotResolver;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = DirectoryFetcher::new("./appinfo");
//! let records = DepotResolver::new(fetcher).resolve(730).await?;
//! for record in &records {
//!     println!("{} {}", record.depot_id, record.manifest_id);
//! }
//! # Ok(())
//! # }
//! ```

// Pipeline
pub mod bundle;
pub mod fetch;
pub mod keystore;
pub mod resolver;
pub mod script;
pub mod vdf;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
