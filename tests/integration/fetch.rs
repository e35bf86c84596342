//! Tests for `kiln fetch`

use super::common::{host_tarball, kiln_command, library_tarball, write_manifest};
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <link rel="alternate" type="text/html" href="https://github.com/user/project/releases/tag/v0.2.0-rust"/>
    <title>v0.2.0-rust</title>
  </entry>
  <entry>
    <link rel="alternate" type="text/html" href="https://github.com/user/project/releases/tag/v0.2.0"/>
    <title>v0.2.0</title>
  </entry>
</feed>
"#;

/// Run the binary off the async runtime so the mock server keeps serving
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[test]
fn test_fetch_disabled_exits_not_found() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        "http://127.0.0.1:9/user/project",
        "github_releases = false",
    );

    kiln_command(&temp.path().join("home"))
        .arg("fetch")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No prebuilt binary"));

    assert!(!temp.path().join("lib").exists());
}

#[test]
fn test_fetch_without_manifest() {
    let temp = TempDir::new().unwrap();

    kiln_command(&temp.path().join("home"))
        .arg("fetch")
        .arg("--manifest-path")
        .arg(temp.path().join("Cargo.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cargo.toml"));
}

#[test]
fn test_fetch_invalid_tag_regex() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        "http://127.0.0.1:9/user/project",
        "github_releases = true\ngit_tag_regex = \"^v\\\\d+$\"",
    );

    kiln_command(&temp.path().join("home"))
        .arg("fetch")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("capture group"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_cargo_version_end_to_end() {
    let mock_server = MockServer::start().await;
    let tarball_path = format!(
        "/user/project/releases/download/v4.5.6/{}",
        host_tarball("4.5.6")
    );
    let redirect_to = format!("{}/storage/blob", mock_server.uri());

    Mock::given(method("GET"))
        .and(path(tarball_path.as_str()))
        .respond_with(ResponseTemplate::new(302).insert_header("location", redirect_to.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(library_tarball()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        &format!("{}/user/project.git", mock_server.uri()),
        "github_releases = true",
    );

    let mut cmd = kiln_command(&temp.path().join("home"));
    cmd.arg("fetch").current_dir(temp.path());
    let output = run_blocking(cmd).await;

    output
        .assert()
        .success()
        .stderr(predicate::str::contains("v4.5.6"));
    assert_eq!(
        fs::read(temp.path().join("lib").join("libfast_math.so")).unwrap(),
        b"fake native library"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_client_error_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        &format!("{}/user/project", mock_server.uri()),
        "github_releases = true",
    );

    let mut cmd = kiln_command(&temp.path().join("home"));
    cmd.args(["fetch", "--json"]).current_dir(temp.path());
    let output = run_blocking(cmd).await;

    output
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"found\": false"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_server_error_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        &format!("{}/user/project", mock_server.uri()),
        "github_releases = true",
    );

    let mut cmd = kiln_command(&temp.path().join("home"));
    cmd.arg("fetch").current_dir(temp.path());
    let output = run_blocking(cmd).await;

    output
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_latest_release_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/project/releases.atom"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&mock_server)
        .await;
    let tarball_path = format!(
        "/user/project/releases/download/v0.2.0-rust/{}",
        host_tarball("0.2.0")
    );
    Mock::given(method("GET"))
        .and(path(tarball_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(library_tarball()))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out");
    write_manifest(
        temp.path(),
        &format!("{}/user/project", mock_server.uri()),
        "github_releases = true\ngithub_release_type = \"latest\"\ngit_tag_regex = \"^v(.*)-rust$\"",
    );

    let mut cmd = kiln_command(&temp.path().join("home"));
    cmd.args(["fetch", "--json", "--dest"])
        .arg(&dest)
        .current_dir(temp.path());
    let output = run_blocking(cmd).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], true);
    assert_eq!(report["release"]["tag"], "v0.2.0-rust");
    assert_eq!(report["release"]["version"], "0.2.0");
    assert!(dest.join("libfast_math.so").is_file());
}
