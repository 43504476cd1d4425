//! Test utilities for permascript
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`MockFetcher`] - in-memory app-info source that records requests
//! - [`AppInfoBuilder`] / [`KeyStoreBuilder`] - VDF payload builders
//! - [`TestSteam`] - temporary Steam directory layout
//!
//! # Example
//!
//! ```rust,no_run
//! use permascript::test_utils::{AppInfoBuilder, TestSteam};
//!
//! let mut steam = TestSteam::new().unwrap();
//! steam.add_appinfo(10, &AppInfoBuilder::new(10).depot(11, 100, 5000).build()).unwrap();
//! steam.add_key("11", "abcd").unwrap();
//! steam.add_manifest("11", 100, b"manifest").unwrap();
//! ```

pub mod environment;
pub mod fixtures;
pub mod mock;

pub use environment::TestSteam;
pub use fixtures::{AppInfoBuilder, KeyStoreBuilder};
pub use mock::MockFetcher;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored, and without either nothing is installed.
///
/// ```bash
/// RUST_LOG=permascript=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
