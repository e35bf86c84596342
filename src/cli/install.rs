use kiln::build::LocalBuilder;
use kiln::config::Config;
use kiln::core::{KilnError, KilnResult};
use std::path::PathBuf;

/// Fetch a prebuilt binary, falling back to `cargo build --release`
pub async fn run(
    manifest_path: Option<PathBuf>,
    dest: Option<PathBuf>,
    no_build: bool,
) -> KilnResult<()> {
    let manifest = super::load_manifest(manifest_path)?;
    let dest = super::install_dir(&manifest, dest);
    let config = Config::load()?;

    let fetched = super::fetch::fetch(manifest.clone(), &config, dest.clone(), true).await?;
    if let Some(binary) = fetched {
        super::fetch::report_installed(&binary);
        return Ok(());
    }

    if no_build {
        return Err(KilnError::Release(format!(
            "No prebuilt binary for {} {} and local builds are disabled",
            manifest.package.name, manifest.package.version
        )));
    }

    eprintln!("No prebuilt binary available, compiling locally...");
    let installed = LocalBuilder::new(&manifest).build_and_install(&dest)?;
    eprintln!("✓ Built and installed {}", installed.display());
    Ok(())
}
