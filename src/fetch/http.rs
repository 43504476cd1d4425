//! HTTP app-info fetcher.

use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

use super::AppInfoFetcher;
use crate::constants::{
    APPID_PLACEHOLDER, BACKOFF_BASE_MS, BACKOFF_FACTOR, DEFAULT_APPINFO_URL,
    DEFAULT_FETCH_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, max_backoff_delay,
};
use crate::core::PermaError;

/// Fetches app info with a GET request against a URL template.
///
/// `{appid}` in the template is replaced with the requested identifier. If the
/// template has no placeholder the identifier is appended, which keeps plain
/// `...?appid=` style configuration working.
///
/// Transport errors and 5xx responses are retried with exponential backoff
/// (100ms, 1s, then capped at 2s). Any other non-success status fails at once.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url_template: String,
    retries: usize,
}

#[derive(Debug)]
enum Attempt {
    Transient(String),
    Permanent(String),
}

impl Attempt {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    fn into_reason(self) -> String {
        match self {
            Self::Transient(reason) | Self::Permanent(reason) => reason,
        }
    }
}

impl HttpFetcher {
    /// Build a fetcher with an explicit template, timeout and retry budget.
    pub fn new(
        url_template: impl Into<String>,
        timeout: Duration,
        retries: usize,
    ) -> Result<Self, PermaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("permascript/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PermaError::Other {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            url_template: url_template.into(),
            retries,
        })
    }

    /// Fetcher for the public endpoint with default timeout and retries.
    pub fn with_defaults() -> Result<Self, PermaError> {
        Self::new(
            DEFAULT_APPINFO_URL,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            DEFAULT_FETCH_RETRIES,
        )
    }

    /// The URL requested for `app_id`.
    pub fn url_for(&self, app_id: u32) -> String {
        if self.url_template.contains(APPID_PLACEHOLDER) {
            self.url_template.replace(APPID_PLACEHOLDER, &app_id.to_string())
        } else {
            format!("{}{app_id}", self.url_template)
        }
    }

    async fn get_once(&self, url: &str) -> Result<String, Attempt> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Attempt::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(Attempt::Transient(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(Attempt::Permanent(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| Attempt::Transient(e.to_string()))
    }
}

impl AppInfoFetcher for HttpFetcher {
    async fn fetch_app_info(&self, app_id: u32) -> Result<String, PermaError> {
        let url = self.url_for(app_id);
        debug!("Fetching app info for {app_id} from {url}");

        let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE_MS)
            .factor(BACKOFF_FACTOR)
            .max_delay(max_backoff_delay())
            .take(self.retries);

        RetryIf::start(
            strategy,
            || self.get_once(&url),
            |attempt: &Attempt| {
                if attempt.is_transient() {
                    warn!("Retrying app info fetch for {app_id}: {attempt:?}");
                }
                attempt.is_transient()
            },
        )
        .await
        .map_err(|attempt| PermaError::FetchFailed {
            app_id,
            reason: attempt.into_reason(),
        })
    }
}
