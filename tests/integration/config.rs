//! Integration tests for `permascript config`.

use crate::common::TestProject;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_config_path_prints_override() -> Result<()> {
    let project = TestProject::new()?;
    let expected = project.config_path().display().to_string();

    project
        .command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
    Ok(())
}

#[test]
fn test_config_show_defaults_when_missing() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("file does not exist"))
        .stdout(predicate::str::contains("fetch_retries = 3"))
        .stdout(predicate::str::contains("cache_capacity = 64"));
    Ok(())
}

#[test]
fn test_config_init_and_set() -> Result<()> {
    let project = TestProject::new()?;

    project.command().args(["config", "init"]).assert().success();
    assert!(project.config_path().exists());

    project.command().args(["config", "set", "fetch_retries", "7"]).assert().success();
    let content = std::fs::read_to_string(project.config_path())?;
    assert!(content.contains("fetch_retries = 7"), "Config: {content}");

    project
        .command()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn test_config_set_unknown_key_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key 'colour'"));
    Ok(())
}

#[test]
fn test_invalid_config_file_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    std::fs::write(project.config_path(), "fetch_retries = \"lots\"\n")?;

    project
        .command()
        .args(["resolve", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
    Ok(())
}
