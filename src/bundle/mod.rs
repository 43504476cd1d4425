//! Writing a materialization plan to disk.
//!
//! A bundle is a directory named after the app id holding the generated script
//! and a copy of every manifest the script refers to:
//!
//! ```text
//! <output_root>/730/
//! ├── 730.lua
//! ├── 731_7617088375292372759.manifest
//! └── 732_1234567890123456789.manifest
//! ```
//!
//! The directory is removed first, so stale manifests from an earlier run do
//! not survive.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::constants::SCRIPT_EXTENSION;
use crate::script::MaterializationPlan;
use crate::utils::fs::{atomic_write, copy_file, ensure_dir, remove_dir_all};

/// What [`write_bundle`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    /// `<output_root>/<appid>`
    pub directory: PathBuf,
    /// Path of the written script
    pub script_path: PathBuf,
    /// Paths of the copied manifests, in plan order
    pub manifests: Vec<PathBuf>,
}

/// Replace `<output_root>/<appid>/` with the script and manifests of `plan`.
pub fn write_bundle(plan: &MaterializationPlan, output_root: &Path) -> Result<BundleSummary> {
    let directory = output_root.join(plan.app_id.to_string());

    remove_dir_all(&directory)
        .with_context(|| format!("Failed to clear previous bundle: {}", directory.display()))?;
    ensure_dir(&directory)?;

    let mut manifests = Vec::with_capacity(plan.copies.len());
    for copy in &plan.copies {
        let target = directory.join(&copy.file_name);
        let bytes = copy_file(&copy.source, &target)
            .with_context(|| format!("Failed to copy manifest for depot {}", copy.depot_id))?;
        debug!("Copied {} ({bytes} bytes)", copy.file_name);
        manifests.push(target);
    }

    let script_path = directory.join(format!("{}.{SCRIPT_EXTENSION}", plan.app_id));
    atomic_write(&script_path, plan.render_script().as_bytes())?;
    info!("Wrote {}", script_path.display());

    Ok(BundleSummary {
        directory,
        script_path,
        manifests,
    })
}
