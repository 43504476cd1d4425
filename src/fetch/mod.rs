//! App-info sources
//!
//! The resolver never talks to the network directly. It asks an
//! [`AppInfoFetcher`] for the raw VDF text of an application and parses the
//! answer itself, so the same resolution logic runs against the live endpoint,
//! a directory of saved payloads, or an in-memory mock in tests.
//!
//! # Implementations
//!
//! - [`HttpFetcher`] - GET against a URL template with timeout and retries
//! - [`DirectoryFetcher`] - reads `<dir>/<appid>.vdf` (offline mode)
//! - [`CachedFetcher`] - memoises another fetcher's successful payloads
//! - [`AppInfoSource`] - one of the first two, picked from command-line flags
//!
//! # Error payloads
//!
//! The public endpoint answers unknown identifiers with HTTP 200 and a JSON
//! body such as `{"error": "..."}`. Fetchers return that body unchanged;
//! [`is_error_payload`] is the single place that recognises it.

mod cache;
mod directory;
mod http;

pub use cache::CachedFetcher;
pub use directory::DirectoryFetcher;
pub use http::HttpFetcher;

use std::future::Future;

use crate::constants::REMOTE_ERROR_MARKER;
use crate::core::PermaError;

/// Source of raw app-info documents.
///
/// Implementations return the payload text exactly as received. Transport
/// problems are reported as [`PermaError::FetchFailed`] and missing documents as
/// [`PermaError::AppNotFound`].
pub trait AppInfoFetcher {
    /// Fetch the raw app-info text for `app_id`.
    fn fetch_app_info(&self, app_id: u32)
    -> impl Future<Output = Result<String, PermaError>> + Send;
}

impl<F: AppInfoFetcher + Sync> AppInfoFetcher for &F {
    fn fetch_app_info(
        &self,
        app_id: u32,
    ) -> impl Future<Output = Result<String, PermaError>> + Send {
        (**self).fetch_app_info(app_id)
    }
}

/// The fetcher chosen at runtime by the CLI.
#[derive(Debug, Clone)]
pub enum AppInfoSource {
    Http(HttpFetcher),
    Directory(DirectoryFetcher),
}

impl AppInfoFetcher for AppInfoSource {
    async fn fetch_app_info(&self, app_id: u32) -> Result<String, PermaError> {
        match self {
            Self::Http(fetcher) => fetcher.fetch_app_info(app_id).await,
            Self::Directory(fetcher) => fetcher.fetch_app_info(app_id).await,
        }
    }
}

/// Returns true when a payload carries no usable app info.
///
/// Empty (or whitespace-only) bodies and bodies containing the remote error
/// marker are both treated as "not found".
pub fn is_error_payload(text: &str) -> bool {
    text.trim().is_empty() || text.contains(REMOTE_ERROR_MARKER)
}
