//! Integration tests for `permascript shell`.

use crate::common::{AppInfoBuilder, TestProject};
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_shell_generates_until_exit() -> Result<()> {
    let mut project = TestProject::new()?;
    let steam = project.steam();
    steam.add_appinfo(10, &AppInfoBuilder::new(10).name("Shell Game").depot(11, 5, 50).build())?;
    steam.add_key("11", "ff")?;
    steam.add_manifest("11", 5, b"m")?;
    let out = project.output_dir();

    project
        .command()
        .arg("shell")
        .arg("-o")
        .arg(&out)
        .write_stdin("10\nnot-a-number\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shell Game"))
        .stderr(predicate::str::contains("Invalid app id"));

    assert!(out.join("10").join("10.lua").exists());
    Ok(())
}

#[test]
fn test_shell_continues_after_failure() -> Result<()> {
    let mut project = TestProject::new()?;
    let steam = project.steam();
    steam.add_appinfo(10, &AppInfoBuilder::new(10).depot(11, 5, 50).build())?;
    steam.add_key("11", "ff")?;
    let out = project.output_dir();

    project
        .command()
        .arg("shell")
        .arg("-o")
        .arg(&out)
        .write_stdin("999\n10\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No app info available for app 999"));

    // 10 has a key but no cached manifest: the script only references the app
    assert_eq!(std::fs::read_to_string(out.join("10").join("10.lua"))?, "addappid(10)\n");
    Ok(())
}
