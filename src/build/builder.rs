use crate::build::targets::Target;
use crate::core::path::ensure_dir;
use crate::core::{KilnError, KilnResult};
use crate::package::manifest::PackageManifest;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Compiles the package's native library with cargo
///
/// Used when no prebuilt binary could be fetched, and by `kiln package` to
/// produce the library that goes into a release tarball.
pub struct LocalBuilder<'a> {
    manifest: &'a PackageManifest,
    target: Option<Target>,
}

impl<'a> LocalBuilder<'a> {
    pub fn new(manifest: &'a PackageManifest) -> Self {
        Self {
            manifest,
            target: None,
        }
    }

    /// Cross-compile for `target` instead of the host
    pub fn with_target(mut self, target: Option<Target>) -> Self {
        self.target = target;
        self
    }

    /// Target the library is built for
    pub fn target(&self) -> Target {
        self.target.clone().unwrap_or_else(Target::host)
    }

    /// Run `cargo build --release` and return the built library
    ///
    /// The library path comes from cargo's JSON messages, so workspace
    /// members and any `CARGO_TARGET_DIR` or `build.target-dir` setting are
    /// located correctly.
    pub fn build(&self) -> KilnResult<PathBuf> {
        let cargo = which::which("cargo").map_err(|_| {
            KilnError::Build("cargo not found on PATH; cannot build locally".to_string())
        })?;

        // Run from the package directory so its .cargo/config.toml applies
        let mut cmd = Command::new(cargo);
        cmd.current_dir(&self.manifest.root)
            .arg("build")
            .arg("--release")
            .arg("--lib")
            .arg("--manifest-path")
            .arg("Cargo.toml")
            .arg("--message-format=json-render-diagnostics")
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(ref target) = self.target {
            cmd.arg("--target").arg(&target.triple);
        }

        info!(package = %self.manifest.package.name, "building with cargo");
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(KilnError::Build(format!(
                "Cargo build failed with exit code: {}",
                output.status.code().unwrap_or(1)
            )));
        }

        let file_name = self
            .target()
            .library_filename(&self.manifest.package.lib_name);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let library = find_library_artifact(&stdout, &file_name).ok_or_else(|| {
            KilnError::Build(format!(
                "Cargo did not produce {} (is crate-type = [\"cdylib\"] set?)",
                file_name
            ))
        })?;
        debug!(library = %library.display(), "cargo produced library");
        Ok(library)
    }

    /// Build, then copy the library into `dest_dir`
    pub fn build_and_install(&self, dest_dir: &Path) -> KilnResult<PathBuf> {
        let library = self.build()?;
        install_file(&library, dest_dir)
    }
}

/// Find `file_name` among the files of cargo's `compiler-artifact` messages
///
/// `stdout` is the output of `cargo build --message-format=json`, one JSON
/// object per line. Lines that are not JSON are ignored.
fn find_library_artifact(stdout: &str, file_name: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter(|message| message["reason"] == "compiler-artifact")
        .filter_map(|message| match message.get("filenames") {
            Some(Value::Array(files)) => Some(files.clone()),
            _ => None,
        })
        .flatten()
        .filter_map(|file| file.as_str().map(PathBuf::from))
        .find(|path| path.file_name().is_some_and(|name| name == file_name))
}

fn install_file(file: &Path, dest_dir: &Path) -> KilnResult<PathBuf> {
    ensure_dir(dest_dir)?;
    let file_name = file
        .file_name()
        .ok_or_else(|| KilnError::Path(format!("Invalid library path: {}", file.display())))?;
    let dest = dest_dir.join(file_name);
    fs::copy(file, &dest)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn manifest(root: &Path) -> PackageManifest {
        PackageManifest::parse(
            "[package]\nname = \"fast-math\"\nversion = \"1.0.0\"\n",
            root.to_path_buf(),
        )
        .unwrap()
    }

    const WORKSPACE_MESSAGES: &str = r#"{"reason":"compiler-artifact","package_id":"path+file:///ws/util#0.1.0","target":{"kind":["lib"],"name":"util"},"filenames":["/ws/target/release/libutil.rlib"],"fresh":false}
{"reason":"compiler-artifact","package_id":"path+file:///ws/fast-math#1.0.0","target":{"kind":["cdylib"],"name":"fast_math"},"filenames":["/ws/target/release/libfast_math.so"],"fresh":false}
{"reason":"build-finished","success":true}"#;

    #[test]
    fn test_find_library_artifact_in_workspace_target_dir() {
        assert_eq!(
            find_library_artifact(WORKSPACE_MESSAGES, "libfast_math.so"),
            Some(PathBuf::from("/ws/target/release/libfast_math.so"))
        );
    }

    #[test]
    fn test_find_library_artifact_picks_requested_file() {
        let stdout = r#"{"reason":"compiler-artifact","filenames":["/out/release/libfast_math.rlib","/out/release/fast_math.dll"]}"#;
        assert_eq!(
            find_library_artifact(stdout, "fast_math.dll"),
            Some(PathBuf::from("/out/release/fast_math.dll"))
        );
    }

    #[test]
    fn test_find_library_artifact_missing() {
        assert_eq!(find_library_artifact(WORKSPACE_MESSAGES, "libother.so"), None);
        assert_eq!(find_library_artifact("Compiling fast-math\n", "libfast_math.so"), None);
    }

    #[test]
    #[serial]
    fn test_build_workspace_member_uses_workspace_target_dir() {
        if which::which("cargo").is_err() {
            return;
        }
        std::env::remove_var("CARGO_TARGET_DIR");

        let temp = TempDir::new().unwrap();
        let ws = temp.path().canonicalize().unwrap().join("ws");
        let member = ws.join("fast-math");
        fs::create_dir_all(member.join("src")).unwrap();
        fs::write(
            ws.join("Cargo.toml"),
            "[workspace]\nmembers = [\"fast-math\"]\nresolver = \"2\"\n",
        )
        .unwrap();
        fs::write(
            member.join("Cargo.toml"),
            "[package]\nname = \"fast-math\"\nversion = \"1.0.0\"\nedition = \"2021\"\n\n[lib]\ncrate-type = [\"cdylib\"]\n",
        )
        .unwrap();
        fs::write(
            member.join("src/lib.rs"),
            "#[no_mangle]\npub extern \"C\" fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n",
        )
        .unwrap();

        let manifest = PackageManifest::load(&member.join("Cargo.toml")).unwrap();
        let library = LocalBuilder::new(&manifest).build().unwrap();

        assert!(library.is_file());
        assert!(library.starts_with(ws.join("target")));
        assert!(!member.join("target").exists());
        assert_eq!(
            library.file_name().unwrap(),
            Target::host().library_filename("fast_math").as_str()
        );
    }

    #[test]
    fn test_install_file() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("libfast_math.so");
        fs::write(&lib, b"ELF").unwrap();

        let dest = install_file(&lib, &temp.path().join("out")).unwrap();
        assert_eq!(dest, temp.path().join("out").join("libfast_math.so"));
        assert_eq!(fs::read(dest).unwrap(), b"ELF");
    }

    #[test]
    #[serial]
    fn test_build_fails_without_package_sources() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(temp.path());
        let builder = LocalBuilder::new(&manifest);

        // Either cargo is missing or the build fails on the empty directory
        assert!(matches!(
            builder.build(),
            Err(KilnError::Build(_)) | Err(KilnError::Io(_))
        ));
    }
}
