use crate::core::{KilnError, KilnResult};

/// Targets release tarballs are published for
pub const SUPPORTED_TARGETS: &[&str] = &[
    "x86_64-unknown-linux-gnu",
    "x86_64-unknown-linux-musl",
    "aarch64-unknown-linux-gnu",
    "x86_64-pc-windows-gnu",
    "x86_64-pc-windows-msvc",
    "x86_64-apple-darwin",
    "aarch64-apple-darwin",
];

/// A platform a native library is built for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub triple: String,
}

impl Target {
    pub fn new(triple: &str) -> KilnResult<Self> {
        if !SUPPORTED_TARGETS.contains(&triple) {
            return Err(KilnError::Config(format!(
                "Unsupported target '{}'. Supported targets: {}",
                triple,
                SUPPORTED_TARGETS.join(", ")
            )));
        }
        Ok(Self {
            triple: triple.to_string(),
        })
    }

    /// The platform this binary runs on
    ///
    /// Not restricted to [`SUPPORTED_TARGETS`]: an unlisted host simply won't
    /// find a release tarball and falls back to building.
    pub fn host() -> Self {
        use std::env::consts::{ARCH, OS};

        let triple = match OS {
            "linux" => format!("{}-unknown-linux-gnu", ARCH),
            "macos" => format!("{}-apple-darwin", ARCH),
            "windows" => format!("{}-pc-windows-msvc", ARCH),
            other => format!("{}-unknown-{}", ARCH, other),
        };
        Self { triple }
    }

    /// CPU architecture, the first triple component
    pub fn arch(&self) -> &str {
        self.triple.split('-').next().unwrap_or(&self.triple)
    }

    /// Operating system name used in tarball names
    pub fn os(&self) -> &str {
        if self.triple.contains("windows") {
            "windows"
        } else if self.triple.contains("darwin") {
            "macos"
        } else if self.triple.contains("linux") {
            "linux"
        } else {
            self.triple.rsplit('-').next().unwrap_or(&self.triple)
        }
    }

    /// Get the file extension for dynamic libraries on this target
    pub fn library_extension(&self) -> &'static str {
        if self.triple.contains("windows") {
            ".dll"
        } else if self.triple.contains("darwin") {
            ".dylib"
        } else {
            ".so"
        }
    }

    /// File name cargo gives a `cdylib` called `lib_name` on this target
    pub fn library_filename(&self, lib_name: &str) -> String {
        let prefix = if self.triple.contains("windows") {
            ""
        } else {
            "lib"
        };
        format!("{}{}{}", prefix, lib_name, self.library_extension())
    }

    /// Name of the release tarball for a library version on this target
    pub fn tarball_filename(&self, lib_name: &str, version: &str) -> String {
        format!("{}-{}-{}-{}.tar.gz", lib_name, version, self.os(), self.arch())
    }
}
