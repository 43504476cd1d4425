//! Depot resolution for an application and its DLC.
//!
//! Given a root app id, the resolver fetches and parses its app-info document,
//! collects every depot that has a public manifest, and then walks the
//! `extended.listofdlc` list recursively. The result is a flat list of
//! [`DepotRecord`]s in first-seen order that the key store lookup and the
//! script materializer work on.
//!
//! # Algorithm
//!
//! Resolution is a sequential depth-first expansion:
//!
//! 1. Mark the app id as entered in the shared [`VisitedSet`]
//! 2. Fetch the payload; an empty body or one carrying the remote error marker
//!    counts as "not found", as does any fetch failure
//! 3. Parse it and read the display name from `appinfo.common.name`, falling back
//!    to `common.name`
//! 4. Emit one record per digit-only child of `depots` that carries numeric
//!    `manifests.public.gid` and `manifests.public.size`, skipping ids that
//!    were already emitted
//! 5. For every DLC id not yet covered, recurse with the same visited set.
//!    A DLC whose expansion fails or yields nothing becomes a placeholder
//!    record with `manifest_id == 0`
//!
//! The top-level call then stamps the root's display name on every record.
//!
//! # Failure policy
//!
//! Only failures for the root id are returned. Anything that goes wrong below
//! a DLC is logged and folded into that DLC's placeholder.
//!
//! # Example
//!
//! ```rust,no_run
//! use permascript::fetch::HttpFetcher;
//! use permascript::resolver::DepotResolver;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let fetcher = HttpFetcher::with_defaults()?;
//! let records = DepotResolver::new(&fetcher).resolve(730).await?;
//! for record in &records {
//!     println!("{} {}", record.depot_id, record.manifest_id);
//! }
//! # Ok(())
//! # }
//! ```

mod visited;

#[cfg(test)]
mod tests;

pub use visited::VisitedSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::PermaError;
use crate::fetch::{AppInfoFetcher, is_error_payload};
use crate::vdf::{self, VdfNode};

/// One depot (or DLC reference) in a resolution's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepotRecord {
    /// Decimal depot id, unique within one resolution
    pub depot_id: String,
    /// Public manifest id; `0` marks a reference-only entry
    pub manifest_id: u64,
    /// Manifest size in bytes, meaningful only when `manifest_id != 0`
    pub size_bytes: u64,
    /// Filled in by the key store lookup; empty when unknown
    pub decryption_key: String,
    /// Display name of the root application
    pub game_name: String,
}

impl DepotRecord {
    /// Reference-only record for a DLC that contributed no depots of its own.
    pub fn placeholder(dlc_id: u32) -> Self {
        Self {
            depot_id: dlc_id.to_string(),
            manifest_id: 0,
            size_bytes: 0,
            decryption_key: String::new(),
            game_name: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.manifest_id == 0
    }

    pub fn has_key(&self) -> bool {
        !self.decryption_key.is_empty()
    }
}

/// Name and records gathered for one app id before the top-level stamp.
struct Expansion {
    game_name: String,
    records: Vec<DepotRecord>,
}

/// Resolves an app id into depot records using an [`AppInfoFetcher`].
///
/// The resolver owns no state between calls. Pass a
/// [`CachedFetcher`](crate::fetch::CachedFetcher) if payloads should be reused.
pub struct DepotResolver<F> {
    fetcher: F,
}

impl<F: AppInfoFetcher> DepotResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve `app_id` with a fresh visited set.
    pub async fn resolve(&self, app_id: u32) -> Result<Vec<DepotRecord>, PermaError> {
        let mut visited = VisitedSet::new();
        self.resolve_with_visited(app_id, &mut visited).await
    }

    /// Resolve `app_id`, recording progress in a caller-provided set.
    ///
    /// Ids already present in `visited` are treated as done, so a set reused
    /// across calls suppresses depots emitted by earlier resolutions.
    pub async fn resolve_with_visited(
        &self,
        app_id: u32,
        visited: &mut VisitedSet,
    ) -> Result<Vec<DepotRecord>, PermaError> {
        let Expansion {
            game_name,
            mut records,
        } = self.expand(app_id, visited).await?;

        for record in &mut records {
            record.game_name.clone_from(&game_name);
        }

        debug!(
            "Resolved app {app_id} ('{game_name}'): {} records, {} apps visited",
            records.len(),
            visited.app_count()
        );
        Ok(records)
    }

    async fn expand(&self, app_id: u32, visited: &mut VisitedSet) -> Result<Expansion, PermaError> {
        visited.enter_app(app_id);

        let text = self.fetcher.fetch_app_info(app_id).await.map_err(|e| {
            debug!("Fetch for app {app_id} failed: {e}");
            PermaError::AppNotFound {
                app_id,
                reason: e.to_string(),
            }
        })?;

        if is_error_payload(&text) {
            return Err(PermaError::AppNotFound {
                app_id,
                reason: "empty or error payload".to_string(),
            });
        }

        let root = vdf::parse(&text).map_err(|source| PermaError::MalformedAppInfo {
            app_id,
            source,
        })?;

        check_declared_app_id(&root, app_id);
        let game_name = display_name(&root).to_string();

        let mut records = Vec::new();
        collect_depots(&root, app_id, visited, &mut records);

        for dlc_id in dlc_ids(&root, app_id) {
            if visited.covers_dlc(dlc_id) {
                debug!("DLC {dlc_id} of app {app_id} already covered");
                continue;
            }

            match Box::pin(self.expand(dlc_id, visited)).await {
                Ok(expansion) if !expansion.records.is_empty() => {
                    records.extend(expansion.records);
                    continue;
                }
                Ok(_) => debug!("DLC {dlc_id} has no depots of its own"),
                Err(e) => debug!("DLC {dlc_id} could not be expanded: {e}"),
            }

            visited.enter_app(dlc_id);
            if visited.claim_depot(&dlc_id.to_string()) {
                records.push(DepotRecord::placeholder(dlc_id));
            }
        }

        Ok(Expansion {
            game_name,
            records,
        })
    }
}

/// `appinfo.common.name`, else `common.name`, else empty.
fn display_name(root: &VdfNode) -> &str {
    root.attribute_path(&["appinfo", "common"], "name")
        .or_else(|| root.attribute_path(&["common"], "name"))
        .unwrap_or_default()
}

fn check_declared_app_id(root: &VdfNode, app_id: u32) {
    match root.attribute("appid").map(str::parse::<u32>) {
        Some(Ok(declared)) if declared == app_id => {}
        Some(Ok(declared)) => warn!("App info for {app_id} declares appid {declared}"),
        Some(Err(_)) => warn!("App info for {app_id} has a non-numeric appid"),
        None => debug!("App info for {app_id} has no appid attribute"),
    }
}

fn is_depot_id(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// `(gid, size)` of a depot's public manifest, when both are present and numeric.
fn public_manifest(depot: &VdfNode) -> Option<(u64, u64)> {
    let public = depot.child_path(&["manifests", "public"])?;
    let gid = public.attribute("gid")?.trim().parse().ok()?;
    let size = public.attribute("size")?.trim().parse().ok()?;
    Some((gid, size))
}

fn collect_depots(
    root: &VdfNode,
    app_id: u32,
    visited: &mut VisitedSet,
    records: &mut Vec<DepotRecord>,
) {
    let Some(depots) = root.child("depots") else {
        debug!("App {app_id} has no depots block");
        return;
    };

    for (key, depot) in depots.children() {
        if !is_depot_id(key) {
            continue;
        }
        let Some((manifest_id, size_bytes)) = public_manifest(depot) else {
            debug!("Depot {key} of app {app_id} has no usable public manifest");
            continue;
        };
        if !visited.claim_depot(key) {
            debug!("Depot {key} already emitted, skipping");
            continue;
        }
        records.push(DepotRecord {
            depot_id: key.to_string(),
            manifest_id,
            size_bytes,
            decryption_key: String::new(),
            game_name: String::new(),
        });
    }
}

/// DLC ids listed in `extended.listofdlc`, in order.
fn dlc_ids(root: &VdfNode, app_id: u32) -> Vec<u32> {
    let Some(list) = root.attribute_path(&["extended"], "listofdlc") else {
        return Vec::new();
    };

    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring non-numeric DLC entry '{entry}' of app {app_id}");
                None
            }
        })
        .collect()
}
