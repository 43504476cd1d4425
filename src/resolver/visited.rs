//! Bookkeeping shared by every level of one resolution.

use std::collections::HashSet;

/// Identifiers already seen during a single top-level resolution.
///
/// One instance is created per top-level call and threaded by `&mut` through
/// the whole DLC expansion, so sibling branches see each other's work:
///
/// - `apps` holds every application id that has been entered (or given up on).
///   Entering an id that is already present is refused, which breaks cycles.
/// - `depots` holds every depot id already emitted. A depot is emitted at most
///   once, and a DLC id equal to an emitted depot id is not expanded.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    apps: HashSet<u32>,
    depots: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `app_id` as entered. Returns false if it already was.
    pub fn enter_app(&mut self, app_id: u32) -> bool {
        self.apps.insert(app_id)
    }

    pub fn has_app(&self, app_id: u32) -> bool {
        self.apps.contains(&app_id)
    }

    /// Claim `depot_id` for output. Returns false if it was already emitted.
    pub fn claim_depot(&mut self, depot_id: &str) -> bool {
        if self.depots.contains(depot_id) {
            return false;
        }
        self.depots.insert(depot_id.to_string())
    }

    pub fn has_depot(&self, depot_id: &str) -> bool {
        self.depots.contains(depot_id)
    }

    /// True if a DLC id needs no further work: it was entered as an app or
    /// already emitted as a depot.
    pub fn covers_dlc(&self, dlc_id: u32) -> bool {
        self.has_app(dlc_id) || self.has_depot(&dlc_id.to_string())
    }

    pub fn app_count(&self) -> usize {
        self.apps.len()
    }

    pub fn depot_count(&self) -> usize {
        self.depots.len()
    }
}
