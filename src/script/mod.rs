//! Lua unlock script generation.
//!
//! [`materialize`] turns a resolved (and key-enriched) record list into a
//! [`MaterializationPlan`]: the ordered script instructions plus the manifest
//! files that have to be copied next to the script. The plan is pure data;
//! writing it to disk is the job of [`crate::bundle`].
//!
//! # Script format
//!
//! ```text
//! addappid(730)
//! addappid(731,1,"5a3c...")
//! setManifestid(731,"7617088375292372759",28034875131)
//! addappid(2000)
//! ```
//!
//! - The first line always references the root app id
//! - A depot with a key and a cached manifest adds a key line and a manifest line
//! - A reference-only record (`manifest_id == 0`) adds a bare `addappid`
//! - A depot missing its key or its manifest is left out of the script and
//!   reported in [`MaterializationPlan::omitted`]

mod manifest_store;

pub use manifest_store::{DepotCache, ManifestStore, manifest_file_name};

use std::fmt;
use std::path::PathBuf;

use crate::resolver::DepotRecord;

/// One line of the generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `addappid(<id>)`
    AddApp(String),
    /// `addappid(<depot>,1,"<key>")`
    AddDepotKey {
        depot_id: String,
        key: String,
    },
    /// `setManifestid(<depot>,"<manifest>",<size>)`
    SetManifest {
        depot_id: String,
        manifest_id: u64,
        size_bytes: u64,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddApp(id) => write!(f, "addappid({id})"),
            Self::AddDepotKey {
                depot_id,
                key,
            } => write!(f, "addappid({depot_id},1,\"{key}\")"),
            Self::SetManifest {
                depot_id,
                manifest_id,
                size_bytes,
            } => write!(f, "setManifestid({depot_id},\"{manifest_id}\",{size_bytes})"),
        }
    }
}

/// A manifest file to copy into the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestCopy {
    pub depot_id: String,
    pub manifest_id: u64,
    pub size_bytes: u64,
    /// Where the manifest currently lives
    pub source: PathBuf,
    /// Name it gets inside the bundle
    pub file_name: String,
}

/// Why a depot with a manifest id did not make it into the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitReason {
    MissingKey,
    MissingManifest,
}

impl fmt::Display for OmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey => f.write_str("no decryption key"),
            Self::MissingManifest => f.write_str("manifest not found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedDepot {
    pub depot_id: String,
    pub manifest_id: u64,
    pub size_bytes: u64,
    pub reason: OmitReason,
}

/// Everything needed to write one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationPlan {
    pub app_id: u32,
    pub instructions: Vec<Instruction>,
    pub copies: Vec<ManifestCopy>,
    pub omitted: Vec<OmittedDepot>,
}

impl MaterializationPlan {
    /// The script text, one instruction per `\n`-terminated line.
    pub fn render_script(&self) -> String {
        let mut out = String::new();
        for instruction in &self.instructions {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }

    /// Total size of the depots whose manifests are copied.
    pub fn total_copied_size(&self) -> u64 {
        self.copies.iter().map(|c| c.size_bytes).sum()
    }

    /// Ids referenced with a bare `addappid`, excluding the root.
    pub fn referenced_ids(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().skip(1).filter_map(|instruction| match instruction {
            Instruction::AddApp(id) => Some(id.as_str()),
            _ => None,
        })
    }
}

/// Build the plan for `app_id` from its records.
///
/// Records are processed in order and never deduplicated here.
pub fn materialize(
    app_id: u32,
    records: &[DepotRecord],
    manifests: &impl ManifestStore,
) -> MaterializationPlan {
    let mut plan = MaterializationPlan {
        app_id,
        instructions: vec![Instruction::AddApp(app_id.to_string())],
        copies: Vec::new(),
        omitted: Vec::new(),
    };

    for record in records {
        if record.is_placeholder() {
            plan.instructions.push(Instruction::AddApp(record.depot_id.clone()));
            continue;
        }

        let omit = |reason| OmittedDepot {
            depot_id: record.depot_id.clone(),
            manifest_id: record.manifest_id,
            size_bytes: record.size_bytes,
            reason,
        };

        if !record.has_key() {
            plan.omitted.push(omit(OmitReason::MissingKey));
            continue;
        }
        if !manifests.has_manifest(&record.depot_id, record.manifest_id) {
            plan.omitted.push(omit(OmitReason::MissingManifest));
            continue;
        }

        plan.instructions.push(Instruction::AddDepotKey {
            depot_id: record.depot_id.clone(),
            key: record.decryption_key.clone(),
        });
        plan.instructions.push(Instruction::SetManifest {
            depot_id: record.depot_id.clone(),
            manifest_id: record.manifest_id,
            size_bytes: record.size_bytes,
        });
        plan.copies.push(ManifestCopy {
            depot_id: record.depot_id.clone(),
            manifest_id: record.manifest_id,
            size_bytes: record.size_bytes,
            source: manifests.manifest_path(&record.depot_id, record.manifest_id),
            file_name: manifest_file_name(&record.depot_id, record.manifest_id),
        });
    }

    plan
}
