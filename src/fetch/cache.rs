//! In-memory memoisation of app-info payloads.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tracing::debug;

use super::{AppInfoFetcher, is_error_payload};
use crate::core::PermaError;

/// Wraps a fetcher and remembers its successful payloads.
///
/// Only bodies that carry app info are stored; errors and error payloads are
/// always fetched again. When `capacity` entries are held, the oldest insertion
/// is evicted first. A capacity of zero disables caching.
///
/// The interactive shell keeps one instance for the whole session so that DLC
/// shared between several base games is fetched once.
#[derive(Debug)]
pub struct CachedFetcher<F> {
    inner: F,
    capacity: usize,
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<u32, String>,
    order: VecDeque<u32>,
}

impl<F> CachedFetcher<F> {
    pub fn new(inner: F, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Number of cached payloads.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached payload.
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.clear();
            state.order.clear();
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn lookup(&self, app_id: u32) -> Option<String> {
        self.state.lock().ok()?.entries.get(&app_id).cloned()
    }

    fn store(&self, app_id: u32, text: &str) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.entries.contains_key(&app_id) {
            return;
        }
        while state.entries.len() >= self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }
        state.entries.insert(app_id, text.to_string());
        state.order.push_back(app_id);
    }
}

impl<F: AppInfoFetcher + Sync> AppInfoFetcher for CachedFetcher<F> {
    async fn fetch_app_info(&self, app_id: u32) -> Result<String, PermaError> {
        if let Some(text) = self.lookup(app_id) {
            debug!("App info cache hit for {app_id}");
            return Ok(text);
        }

        let text = self.inner.fetch_app_info(app_id).await?;
        if !is_error_payload(&text) {
            self.store(app_id, &text);
        }
        Ok(text)
    }
}
