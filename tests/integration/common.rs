//! Common utilities for integration tests

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use kiln::build::Target;
use std::fs;
use std::path::Path;

/// `kiln` command with an isolated KILN_HOME
pub fn kiln_command(kiln_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.env("KILN_HOME", kiln_home);
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

/// Write a Cargo.toml for `fast-math 4.5.6` with the given kiln metadata
pub fn write_manifest(dir: &Path, repository: &str, metadata: &str) {
    fs::write(
        dir.join("Cargo.toml"),
        format!(
            r#"[package]
name = "fast-math"
version = "4.5.6"
repository = "{}"

[package.metadata.kiln]
{}

[lib]
crate-type = ["cdylib"]
"#,
            repository, metadata
        ),
    )
    .unwrap();
}

/// Tarball name the host would request for `version`
pub fn host_tarball(version: &str) -> String {
    Target::host().tarball_filename("fast_math", version)
}

/// Gzipped tarball holding a single fake library
pub fn library_tarball() -> Vec<u8> {
    let data = b"fake native library";
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_data(&mut header, "libfast_math.so", &data[..])
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}
