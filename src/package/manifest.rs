//! Package descriptor (`Cargo.toml`) loading

use crate::core::{KilnError, KilnResult};
use crate::github::types::ReleaseType;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GIT_TAG_FORMAT: &str = "v%s";
pub const DEFAULT_GIT_TAG_REGEX: &str = r"^v(\d+\.\d+\.\d+)$";

/// The parts of `[package]` the resolver reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    /// Repository URL without trailing `/` or `.git`
    pub repository: Option<String>,
    /// Name of the compiled library (`[lib] name`, or the package name)
    pub lib_name: String,
}

/// Release download settings from `[package.metadata.kiln]`
#[derive(Debug, Clone)]
pub struct ReleaseSettings {
    pub github_releases: bool,
    pub github_release_type: ReleaseType,
    /// Tag template; its single `%s` is replaced by the version
    pub git_tag_format: String,
    /// Tag filter for the latest strategy; capture group 1 is the version
    pub git_tag_regex: Regex,
    /// Overrides the library name used in tarball names
    pub library_name: Option<String>,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            github_releases: false,
            github_release_type: ReleaseType::default(),
            git_tag_format: DEFAULT_GIT_TAG_FORMAT.to_string(),
            git_tag_regex: Regex::new(DEFAULT_GIT_TAG_REGEX).expect("default tag regex is valid"),
            library_name: None,
        }
    }
}

impl ReleaseSettings {
    /// Render `git_tag_format` for a version
    pub fn format_tag(&self, version: &str) -> String {
        self.git_tag_format.replacen("%s", version, 1)
    }

    /// Version captured from a tag, if the tag matches `git_tag_regex`
    pub fn match_tag<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.git_tag_regex
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn from_raw(raw: RawReleaseSettings) -> KilnResult<Self> {
        let defaults = Self::default();

        let git_tag_regex = match raw.git_tag_regex {
            Some(pattern) => compile_tag_regex(&pattern)?,
            None => defaults.git_tag_regex,
        };

        let git_tag_format = match raw.git_tag_format {
            Some(format) => check_tag_format(format)?,
            None => defaults.git_tag_format,
        };

        Ok(Self {
            github_releases: raw.github_releases.unwrap_or(defaults.github_releases),
            github_release_type: raw.github_release_type.unwrap_or_default(),
            git_tag_format,
            git_tag_regex,
            library_name: raw.library_name,
        })
    }
}

/// A tag template must contain exactly one `%s` placeholder
fn check_tag_format(format: String) -> KilnResult<String> {
    let placeholders = format.matches("%s").count();
    if placeholders != 1 {
        return Err(KilnError::Config(format!(
            "git_tag_format '{}' must contain exactly one %s (found {})",
            format, placeholders
        )));
    }
    Ok(format)
}

/// Compile a tag pattern, requiring exactly one capture group
pub fn compile_tag_regex(pattern: &str) -> KilnResult<Regex> {
    let regex = Regex::new(pattern)
        .map_err(|e| KilnError::Config(format!("Invalid git_tag_regex '{}': {}", pattern, e)))?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() != 2 {
        return Err(KilnError::Config(format!(
            "git_tag_regex '{}' must have exactly one capture group (the version)",
            pattern
        )));
    }
    Ok(regex)
}

/// A loaded `Cargo.toml`
#[derive(Debug, Clone)]
pub struct PackageManifest {
    /// Directory containing the manifest
    pub root: PathBuf,
    pub package: PackageMetadata,
    pub settings: ReleaseSettings,
}

#[derive(Deserialize)]
struct RawManifest {
    package: Option<RawPackage>,
    lib: Option<RawLib>,
}

#[derive(Deserialize)]
struct RawPackage {
    name: String,
    version: Option<toml::Value>,
    repository: Option<String>,
    metadata: Option<RawMetadata>,
}

#[derive(Deserialize)]
struct RawLib {
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawMetadata {
    kiln: Option<RawReleaseSettings>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawReleaseSettings {
    github_releases: Option<bool>,
    github_release_type: Option<ReleaseType>,
    git_tag_format: Option<String>,
    git_tag_regex: Option<String>,
    library_name: Option<String>,
}

impl PackageManifest {
    /// Load `Cargo.toml` from a file path
    pub fn load(manifest_path: &Path) -> KilnResult<Self> {
        let content = fs::read_to_string(manifest_path).map_err(|e| {
            KilnError::Manifest(format!(
                "Failed to read {}: {}",
                manifest_path.display(),
                e
            ))
        })?;
        let root = manifest_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::parse(&content, root)
    }

    /// Parse manifest content; `root` is recorded for local builds
    pub fn parse(content: &str, root: PathBuf) -> KilnResult<Self> {
        let raw: RawManifest = toml::from_str(content)?;
        let package = raw.package.ok_or_else(|| {
            KilnError::Manifest("Cargo.toml has no [package] table".to_string())
        })?;

        let version = match package.version {
            Some(toml::Value::String(v)) => v,
            Some(_) => {
                return Err(KilnError::Manifest(format!(
                    "Package '{}' must declare its version as a string",
                    package.name
                )))
            }
            None => {
                return Err(KilnError::Manifest(format!(
                    "Package '{}' has no version",
                    package.name
                )))
            }
        };

        let settings = ReleaseSettings::from_raw(
            package
                .metadata
                .and_then(|m| m.kiln)
                .unwrap_or_default(),
        )?;

        let lib_name = raw
            .lib
            .and_then(|lib| lib.name)
            .unwrap_or_else(|| package.name.replace('-', "_"));

        Ok(Self {
            root,
            package: PackageMetadata {
                repository: package.repository.as_deref().map(normalize_repository),
                name: package.name,
                version,
                lib_name,
            },
            settings,
        })
    }

    /// Library name used in release tarball names
    pub fn library_name(&self) -> &str {
        self.settings
            .library_name
            .as_deref()
            .unwrap_or(&self.package.lib_name)
    }
}

/// Strip whitespace, trailing slashes and a `.git` suffix from a repository URL
pub fn normalize_repository(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}
