//! Tests for `kiln config`

use super::common::kiln_command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_config_path_uses_kiln_home() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");

    kiln_command(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_show_creates_default() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");

    kiln_command(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http_timeout_secs: 30"));

    assert!(home.join("config.yaml").is_file());
}
