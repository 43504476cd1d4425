//! In-memory app-info source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::PermaError;
use crate::fetch::AppInfoFetcher;

#[derive(Debug, Clone)]
enum Response {
    Payload(String),
    Failure(String),
}

/// Fetcher answering from a fixed table and recording every request.
///
/// Ids without an entry are answered with [`PermaError::AppNotFound`].
///
/// ```rust,no_run
/// use permascript::test_utils::{AppInfoBuilder, MockFetcher};
///
/// let fetcher = MockFetcher::new()
///     .with_payload(10, AppInfoBuilder::new(10).name("Game").depot(11, 100, 5000).build())
///     .with_failure(30, "connection reset");
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<u32, Response>,
    calls: Mutex<Vec<u32>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `app_id` with `text`.
    pub fn with_payload(mut self, app_id: u32, text: impl Into<String>) -> Self {
        self.responses.insert(app_id, Response::Payload(text.into()));
        self
    }

    /// Answer `app_id` with a transport failure.
    pub fn with_failure(mut self, app_id: u32, reason: impl Into<String>) -> Self {
        self.responses.insert(app_id, Response::Failure(reason.into()));
        self
    }

    /// Ids requested so far, in order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl AppInfoFetcher for MockFetcher {
    async fn fetch_app_info(&self, app_id: u32) -> Result<String, PermaError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(app_id);
        }

        match self.responses.get(&app_id) {
            Some(Response::Payload(text)) => Ok(text.clone()),
            Some(Response::Failure(reason)) => Err(PermaError::FetchFailed {
                app_id,
                reason: reason.clone(),
            }),
            None => Err(PermaError::AppNotFound {
                app_id,
                reason: "no mock response".to_string(),
            }),
        }
    }
}
