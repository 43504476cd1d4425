//! Integration tests for `permascript resolve`.

use crate::common::{AppInfoBuilder, TestProject};
use anyhow::Result;
use predicates::prelude::*;

/// Root app 10 with DLC 20 (own depot) and 30 (shared sub-DLC 40 with 20).
fn dlc_tree() -> Result<TestProject> {
    let mut project = TestProject::new()?;
    let steam = project.steam();
    steam.add_appinfo(10, &AppInfoBuilder::new(10).name("Base").depot(11, 1, 100).dlc(&[20, 30]).build())?;
    steam.add_appinfo(20, &AppInfoBuilder::new(20).name("DLC A").depot(21, 2, 200).dlc(&[40]).build())?;
    steam.add_appinfo(30, &AppInfoBuilder::new(30).name("DLC B").dlc(&[40]).build())?;
    steam.add_appinfo(40, &AppInfoBuilder::new(40).depot(41, 4, 400).build())?;
    steam.add_key("21", "k21")?;
    Ok(project)
}

#[test]
fn test_resolve_json_lists_records_in_order() -> Result<()> {
    let project = dlc_tree()?;

    let output = project.run_permascript(&["resolve", "10", "--format", "json"])?;
    assert!(output.success, "Stderr: {}", output.stderr);

    let records: serde_json::Value = serde_json::from_str(&output.stdout)?;
    let depots: Vec<&str> =
        records.as_array().unwrap().iter().map(|r| r["depot_id"].as_str().unwrap()).collect();
    assert_eq!(depots, vec!["11", "21", "41", "30"]);

    assert!(records.as_array().unwrap().iter().all(|r| r["game_name"] == "Base"));
    assert_eq!(records[3]["manifest_id"], 0);
    // keys are only looked up with --keys
    assert_eq!(records[1]["decryption_key"], "");
    Ok(())
}

#[test]
fn test_resolve_with_keys() -> Result<()> {
    let project = dlc_tree()?;

    let output = project.run_permascript(&["resolve", "10", "--keys", "--format", "json"])?;
    assert!(output.success, "Stderr: {}", output.stderr);

    let records: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(records[1]["decryption_key"], "k21");
    assert_eq!(records[0]["decryption_key"], "");
    Ok(())
}

#[test]
fn test_resolve_keys_with_missing_key_store_warns() -> Result<()> {
    let project = dlc_tree()?;
    std::fs::remove_file(project.key_store_path())?;

    project
        .command()
        .args(["resolve", "10", "--keys"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Key store unavailable"))
        .stdout(predicate::str::contains("4 records"));
    Ok(())
}

#[test]
fn test_resolve_table() -> Result<()> {
    let project = dlc_tree()?;

    project
        .command()
        .args(["resolve", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base (10)"))
        .stdout(predicate::str::contains("DEPOT"))
        .stdout(predicate::str::contains("4 records"));
    Ok(())
}

#[test]
fn test_resolve_malformed_root_fails() -> Result<()> {
    let mut project = TestProject::new()?;
    project.steam().add_appinfo(50, "\"appinfo\" { \"common\" {")?;

    project
        .command()
        .args(["resolve", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("App info for app 50 is malformed"));
    Ok(())
}

#[test]
fn test_resolve_error_payload_root_fails() -> Result<()> {
    let mut project = TestProject::new()?;
    project.steam().add_appinfo(60, "{\"error\": \"not found\"}")?;

    project
        .command()
        .args(["resolve", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No app info available for app 60"));
    Ok(())
}
