//! Integration tests for `permascript generate`.

use crate::common::{AppInfoBuilder, TestProject};
use anyhow::Result;
use predicates::prelude::*;

/// App 10 with two keyed depots, one keyless depot, one depot without a
/// manifest id and a DLC (30) that has no snapshot.
fn standard_project() -> Result<TestProject> {
    let mut project = TestProject::new()?;
    let steam = project.steam();
    steam.add_appinfo(
        10,
        &AppInfoBuilder::new(10)
            .name("Test Game")
            .depot(11, 111, 1024)
            .depot(12, 122, 2048)
            .depot(13, 133, 10)
            .depot_without_manifest(14)
            .dlc(&[30])
            .build(),
    )?;
    steam.add_key("11", "aabb")?;
    steam.add_key("12", "ccdd")?;
    steam.add_manifest("11", 111, b"manifest-11")?;
    steam.add_manifest("12", 122, b"manifest-12")?;
    steam.add_manifest("13", 133, b"manifest-13")?;
    Ok(project)
}

#[test]
fn test_generate_writes_script_and_manifests() -> Result<()> {
    let project = standard_project()?;
    let out = project.output_dir();

    project
        .command()
        .args(["generate", "10", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Game"))
        .stdout(predicate::str::contains("Valid depots: 2"))
        .stdout(predicate::str::contains("DLC:          30"));

    let bundle = out.join("10");
    assert_eq!(
        std::fs::read_to_string(bundle.join("10.lua"))?,
        "addappid(10)\n\
         addappid(11,1,\"aabb\")\n\
         setManifestid(11,\"111\",1024)\n\
         addappid(12,1,\"ccdd\")\n\
         setManifestid(12,\"122\",2048)\n\
         addappid(30)\n"
    );
    assert_eq!(std::fs::read(bundle.join("11_111.manifest"))?, b"manifest-11");
    assert_eq!(std::fs::read(bundle.join("12_122.manifest"))?, b"manifest-12");
    assert!(!bundle.join("13_133.manifest").exists());
    Ok(())
}

#[test]
fn test_generate_replaces_previous_bundle() -> Result<()> {
    let project = standard_project()?;
    let out = project.output_dir();
    let stale = out.join("10").join("stale.txt");
    std::fs::create_dir_all(stale.parent().unwrap())?;
    std::fs::write(&stale, "old")?;

    project.command().args(["generate", "10", "-o"]).arg(&out).assert().success();

    assert!(!stale.exists());
    assert!(out.join("10").join("10.lua").exists());
    Ok(())
}

#[test]
fn test_generate_uses_configured_output_dir() -> Result<()> {
    let project = standard_project()?;
    let configured = project.root().join("configured");
    std::fs::write(
        project.config_path(),
        format!("output_dir = {:?}\n", configured.display().to_string()),
    )?;

    project.command().args(["generate", "10"]).assert().success();

    assert!(configured.join("10").join("10.lua").exists());
    Ok(())
}

#[test]
fn test_generate_without_keys_fails_and_writes_nothing() -> Result<()> {
    let project = standard_project()?;
    let out = project.output_dir();
    std::fs::remove_file(project.key_store_path())?;

    project
        .command()
        .args(["generate", "10", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No decryption keys found for app 10"));

    assert!(!out.join("10").exists());
    Ok(())
}

#[test]
fn test_generate_unknown_app_fails() -> Result<()> {
    let project = standard_project()?;

    let output = project.run_permascript(&["generate", "999"])?;
    assert!(!output.success);
    assert!(
        output.stderr.contains("No app info available for app 999"),
        "Stderr: {}",
        output.stderr
    );
    Ok(())
}

#[test]
fn test_generate_app_without_depots_fails() -> Result<()> {
    let mut project = TestProject::new()?;
    project.steam().add_appinfo(20, &AppInfoBuilder::new(20).name("Empty").build())?;

    let output = project.run_permascript(&["generate", "20"])?;
    assert!(!output.success);
    assert!(
        output.stderr.contains("No depot information found for app 20"),
        "Stderr: {}",
        output.stderr
    );
    Ok(())
}

#[test]
fn test_generate_rejects_non_numeric_app_id() -> Result<()> {
    let project = TestProject::new()?;
    project.command().args(["generate", "abc"]).assert().failure();
    Ok(())
}
