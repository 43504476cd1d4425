//! Offline app-info source backed by a directory of saved payloads.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::AppInfoFetcher;
use crate::constants::APPINFO_EXTENSION;
use crate::core::PermaError;

/// Reads `<root>/<appid>.vdf` instead of calling the remote endpoint.
///
/// Used by `--appinfo-dir` and throughout the test suite. A missing file is
/// reported as [`PermaError::AppNotFound`], so it behaves like an unknown id.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the payload for `app_id`.
    pub fn path_for(&self, app_id: u32) -> PathBuf {
        self.root.join(format!("{app_id}.{APPINFO_EXTENSION}"))
    }
}

impl AppInfoFetcher for DirectoryFetcher {
    async fn fetch_app_info(&self, app_id: u32) -> Result<String, PermaError> {
        let path = self.path_for(app_id);
        debug!("Reading app info for {app_id} from {}", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PermaError::AppNotFound {
                app_id,
                reason: format!("{} does not exist", path.display()),
            }),
            Err(e) => Err(PermaError::FetchFailed {
                app_id,
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }
}
