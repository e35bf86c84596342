pub mod config;
pub mod fetch;
pub mod install;
pub mod package;

use kiln::core::path::find_manifest;
use kiln::core::{KilnError, KilnResult};
use kiln::package::PackageManifest;
use std::env;
use std::path::{Path, PathBuf};

/// Load the manifest given on the command line, or the nearest Cargo.toml
pub fn load_manifest(manifest_path: Option<PathBuf>) -> KilnResult<PackageManifest> {
    let path = match manifest_path {
        Some(path) => path,
        None => {
            let current_dir = env::current_dir().map_err(|e| {
                KilnError::Path(format!("Failed to get current directory: {}", e))
            })?;
            find_manifest(&current_dir)?
        }
    };
    PackageManifest::load(&path)
}

/// Install directory: `--dest`, or `lib/` next to Cargo.toml
pub fn install_dir(manifest: &PackageManifest, dest: Option<PathBuf>) -> PathBuf {
    dest.unwrap_or_else(|| default_install_dir(&manifest.root))
}

fn default_install_dir(root: &Path) -> PathBuf {
    root.join("lib")
}
