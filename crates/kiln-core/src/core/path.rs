use crate::core::error::{KilnError, KilnResult};
use std::path::{Path, PathBuf};

/// Get the Kiln home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\kiln
/// - Linux: ~/.config/kiln
/// - macOS: ~/Library/Application Support/kiln
pub fn kiln_home() -> KilnResult<PathBuf> {
    if let Ok(home) = std::env::var("KILN_HOME") {
        return Ok(PathBuf::from(home));
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| KilnError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("kiln"))
}

/// Get the config file path (`<kiln_home>/config.yaml`)
pub fn config_file() -> KilnResult<PathBuf> {
    Ok(kiln_home()?.join("config.yaml"))
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_dir(path: &Path) -> KilnResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            KilnError::Path(format!("Failed to create {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Walk up from `start` until a directory containing `Cargo.toml` is found
pub fn find_manifest(start: &Path) -> KilnResult<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join("Cargo.toml");
        if candidate.is_file() {
            return Ok(candidate);
        }
        current = dir.parent();
    }
    Err(KilnError::Manifest(format!(
        "Cargo.toml not found in {} or any parent directory",
        start.display()
    )))
}
