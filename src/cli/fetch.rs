use indicatif::{ProgressBar, ProgressStyle};
use kiln::build::ReleaseResolver;
use kiln::config::Config;
use kiln::core::{KilnError, KilnResult};
use kiln::di::ServiceContainer;
use kiln::github::InstalledBinary;
use kiln::package::PackageManifest;
use std::path::PathBuf;
use std::time::Duration;

/// Fetch a prebuilt binary; returns whether one was installed
pub async fn run(
    manifest_path: Option<PathBuf>,
    dest: Option<PathBuf>,
    json: bool,
) -> KilnResult<bool> {
    let manifest = super::load_manifest(manifest_path)?;
    let dest = super::install_dir(&manifest, dest);
    let config = Config::load()?;

    let installed = fetch(manifest, &config, dest, !json).await?;

    if json {
        let report = serde_json::json!({
            "found": installed.is_some(),
            "release": &installed,
        });
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| KilnError::Release(format!("Failed to serialize result: {}", e)))?;
        println!("{}", rendered);
    } else if let Some(ref binary) = installed {
        report_installed(binary);
    } else {
        eprintln!("No prebuilt binary found for this version and platform");
    }

    Ok(installed.is_some())
}

/// Resolve and unpack with the production services
pub async fn fetch(
    manifest: PackageManifest,
    config: &Config,
    dest: PathBuf,
    show_progress: bool,
) -> KilnResult<Option<InstalledBinary>> {
    let services = ServiceContainer::new(config, dest)?;
    let name = manifest.package.name.clone();
    let version = manifest.package.version.clone();
    let resolver = ReleaseResolver::new(manifest, &services);

    let spinner = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Looking for a prebuilt {} {}...", name, version));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = resolver.download_binary().await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

pub fn report_installed(binary: &InstalledBinary) {
    eprintln!(
        "✓ Installed prebuilt binary from release {}",
        binary.candidate.tag
    );
    for file in &binary.files {
        eprintln!("  {}", file.display());
    }
}
