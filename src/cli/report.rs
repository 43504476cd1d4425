//! Console output for `generate`, `resolve` and the shell.

use colored::Colorize;
use std::fmt::Write as _;

use super::common::GenerateOutcome;
use crate::resolver::DepotRecord;
use crate::script::OmitReason;
use crate::utils::format::format_size;

fn name_or_unknown(name: &str) -> &str {
    if name.is_empty() { "<unknown>" } else { name }
}

/// Per-depot details and summary of a generated bundle.
pub fn render_generate(outcome: &GenerateOutcome) -> String {
    let mut out = String::new();
    let plan = &outcome.plan;

    let _ = writeln!(out, "{} {}", "Game:".bold(), name_or_unknown(outcome.game_name()));
    let _ = writeln!(out, "{} {}", "AppID:".bold(), outcome.app_id);
    let _ = writeln!(out);

    for record in outcome.records.iter().filter(|r| !r.is_placeholder()) {
        let copied = plan.copies.iter().any(|c| c.depot_id == record.depot_id);
        let omitted = plan.omitted.iter().find(|o| o.depot_id == record.depot_id);

        let _ = writeln!(out, "{} {}", "DepotID:".cyan(), record.depot_id);
        let _ = writeln!(out, "  ManifestID: {}", record.manifest_id);
        let _ = writeln!(out, "  Size:       {}", format_size(record.size_bytes));
        if record.has_key() {
            let _ = writeln!(out, "  Key:        {}", record.decryption_key);
        } else {
            let _ = writeln!(out, "  Key:        {}", "no key".yellow());
        }
        let status = match (copied, omitted.map(|o| o.reason)) {
            (true, _) => "copied".green(),
            (false, Some(OmitReason::MissingManifest)) => "not found".yellow(),
            (false, _) => "skipped".yellow(),
        };
        let _ = writeln!(out, "  Manifest:   {status}");
    }

    let dlc: Vec<&str> = plan.referenced_ids().collect();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Summary".bold());
    let _ = writeln!(out, "  Valid depots: {}", plan.copies.len());
    let _ = writeln!(out, "  Total size:   {}", format_size(plan.total_copied_size()));
    if dlc.is_empty() {
        let _ = writeln!(out, "  DLC:          none");
    } else {
        let _ = writeln!(out, "  DLC:          {}", dlc.join(", "));
    }
    if plan.copies.is_empty() {
        let _ = writeln!(
            out,
            "{}: no manifest files were copied; the script only references apps",
            "warning".yellow().bold()
        );
    }
    let _ = writeln!(out, "{} {}", "Output:".bold(), outcome.bundle.directory.display());

    out
}

/// Aligned table of resolved records.
pub fn render_table(app_id: u32, records: &[DepotRecord]) -> String {
    let mut out = String::new();
    let name = records.first().map(|r| r.game_name.as_str()).unwrap_or_default();

    let _ = writeln!(out, "{} {} ({app_id})", "Game:".bold(), name_or_unknown(name));
    let _ = writeln!(out, "{:<12} {:<22} {:>12}  KEY", "DEPOT", "MANIFEST", "SIZE");
    for record in records {
        let (manifest, size) = if record.is_placeholder() {
            ("-".to_string(), "-".to_string())
        } else {
            (record.manifest_id.to_string(), format_size(record.size_bytes))
        };
        let key = if record.has_key() { record.decryption_key.as_str() } else { "-" };
        let _ = writeln!(out, "{:<12} {:<22} {:>12}  {key}", record.depot_id, manifest, size);
    }
    let _ = writeln!(out, "{} records", records.len());

    out
}
