//! Decryption key lookup in the local Steam key store.
//!
//! Steam keeps the keys of every depot it has downloaded in
//! `<steam>/config/config.vdf` under `Software/Valve/Steam/depots/<id>`. The
//! casing of those segments has varied between client versions, so every
//! segment and the `DecryptionKey` attribute are matched ignoring ASCII case.

use std::path::Path;

use tracing::debug;

use crate::constants::{DECRYPTION_KEY_ATTRIBUTE, KEY_STORE_DEPOTS_PATH};
use crate::core::PermaError;
use crate::resolver::DepotRecord;
use crate::vdf::{self, VdfNode, VdfParseError};

/// A parsed key store.
#[derive(Debug)]
pub struct KeyStore {
    root: VdfNode,
}

impl KeyStore {
    /// Parse key store text.
    pub fn parse(text: &str) -> Result<Self, VdfParseError> {
        Ok(Self {
            root: vdf::parse(text)?,
        })
    }

    /// Read and parse the key store at `path`.
    ///
    /// Any failure is reported as [`PermaError::KeyStoreUnavailable`]; callers
    /// treat that as "no keys" after warning the user.
    pub fn load(path: &Path) -> Result<Self, PermaError> {
        let unavailable = |reason: String| PermaError::KeyStoreUnavailable {
            path: path.display().to_string(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        Self::parse(&text).map_err(|e| unavailable(e.to_string()))
    }

    /// Decryption key of `depot_id`, if the store has a non-empty one.
    pub fn decryption_key(&self, depot_id: &str) -> Option<&str> {
        let mut path = KEY_STORE_DEPOTS_PATH.to_vec();
        path.push(depot_id);
        self.root
            .attribute_ci_path(&path, DECRYPTION_KEY_ATTRIBUTE)
            .filter(|key| !key.is_empty())
    }

    /// Fill in `decryption_key` on every record the store knows.
    ///
    /// Records without a key keep an empty one. Returns how many records
    /// received a key.
    pub fn apply(&self, records: &mut [DepotRecord]) -> usize {
        let mut found = 0;
        for record in records.iter_mut() {
            match self.decryption_key(&record.depot_id) {
                Some(key) => {
                    record.decryption_key = key.to_string();
                    found += 1;
                }
                None => debug!("No decryption key for depot {}", record.depot_id),
            }
        }
        found
    }
}

/// Parse `key_store_text` and enrich `records` in place.
///
/// On a parse error no record is modified.
pub fn enrich(records: &mut [DepotRecord], key_store_text: &str) -> Result<usize, VdfParseError> {
    let store = KeyStore::parse(key_store_text)?;
    Ok(store.apply(records))
}
