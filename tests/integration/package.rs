//! Tests for `kiln package`

use super::common::{kiln_command, write_manifest};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_package_rejects_unknown_target() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "https://github.com/user/project", "");

    kiln_command(&temp.path().join("home"))
        .args(["package", "--target", "mips-unknown-linux-gnu"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported target"));
}
