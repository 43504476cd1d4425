//! Global constants used throughout the permascript codebase.
//!
//! This module contains the remote endpoint defaults, retry parameters, and
//! Steam directory layout names that are used across multiple modules.
//! Defining them centrally keeps magic strings discoverable.

use std::time::Duration;

/// Default app-info endpoint. `{appid}` is replaced with the requested identifier.
pub const DEFAULT_APPINFO_URL: &str = "https://steamui.com/get_appinfo.php?appid={appid}";

/// Placeholder substituted in [`DEFAULT_APPINFO_URL`] and user-provided templates.
pub const APPID_PLACEHOLDER: &str = "{appid}";

/// Marker the app-info endpoint embeds in its body when the identifier is unknown.
///
/// A payload containing this marker is treated exactly like a failed fetch.
pub const REMOTE_ERROR_MARKER: &str = "\"error\":";

/// Default per-request timeout for app-info fetches.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for transient app-info fetch failures.
pub const DEFAULT_FETCH_RETRIES: usize = 3;

/// Default number of app-info payloads kept by the interactive shell cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Base of the exponential backoff between fetch retries, in milliseconds.
///
/// Combined with [`BACKOFF_FACTOR`] the first retry waits 100ms, the second 1s.
pub const BACKOFF_BASE_MS: u64 = 10;

/// Multiplier applied to every backoff step.
pub const BACKOFF_FACTOR: u64 = 10;

/// Maximum backoff delay between fetch retries (2 seconds).
pub const MAX_BACKOFF_DELAY_MS: u64 = 2_000;

/// Convenience accessor for [`MAX_BACKOFF_DELAY_MS`].
pub fn max_backoff_delay() -> Duration {
    Duration::from_millis(MAX_BACKOFF_DELAY_MS)
}

/// Path segments leading from the key store root to the per-depot nodes.
///
/// Matched case-insensitively; `config.vdf` has used both `Software` and `software`.
pub const KEY_STORE_DEPOTS_PATH: [&str; 4] = ["software", "valve", "steam", "depots"];

/// Attribute holding a depot's decryption key inside the key store.
pub const DECRYPTION_KEY_ATTRIBUTE: &str = "DecryptionKey";

/// Key store location relative to the Steam install directory.
pub const KEY_STORE_RELATIVE_PATH: [&str; 2] = ["config", "config.vdf"];

/// Manifest cache directory relative to the Steam install directory.
pub const DEPOT_CACHE_DIR: &str = "depotcache";

/// Extension of cached depot manifest files.
pub const MANIFEST_EXTENSION: &str = "manifest";

/// Extension used for downloaded app-info documents in offline mode.
pub const APPINFO_EXTENSION: &str = "vdf";

/// Extension of the generated unlock script.
pub const SCRIPT_EXTENSION: &str = "lua";
