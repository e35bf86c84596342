//! Tests for `kiln install`

use super::common::{kiln_command, write_manifest};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_install_no_build_without_release() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        "http://127.0.0.1:9/user/project",
        "github_releases = false",
    );

    kiln_command(&temp.path().join("home"))
        .args(["install", "--no-build"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("local builds are disabled"));
}

#[test]
fn test_install_help() {
    let temp = TempDir::new().unwrap();

    kiln_command(temp.path())
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-build"));
}
